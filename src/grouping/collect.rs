//! Post collection: bucketing of accepted records by (target, group).
use std::collections::BTreeMap;
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::filtering::{Filter, RecordFilter};
use crate::io::reader;
use crate::record::{Field, Record};

/// group value -> records, in arrival order.
pub type Groups = BTreeMap<String, Vec<Record>>;

/// target value -> group value -> records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsByTarget {
    targets: BTreeMap<String, Groups>,
}

impl PostsByTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the bucket of `(target, group)`.
    pub fn push(&mut self, target: &str, group: &str, record: Record) {
        self.targets
            .entry(target.to_string())
            .or_default()
            .entry(group.to_string())
            .or_default()
            .push(record);
    }

    pub fn get(&self, target: &str) -> Option<&Groups> {
        self.targets.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Groups)> {
        self.targets.iter()
    }

    /// Number of targets, including the ones without any group left.
    pub fn nb_targets(&self) -> usize {
        self.targets.len()
    }

    /// Total number of records.
    pub fn nb_posts(&self) -> usize {
        self.targets
            .values()
            .flat_map(|groups| groups.values())
            .map(Vec::len)
            .sum()
    }

    /// `true` if no bucket holds any record.
    pub fn is_empty(&self) -> bool {
        self.nb_posts() == 0
    }

    /// Apply `f` to the groups of every target.
    pub fn map_groups<F>(self, mut f: F) -> Self
    where
        F: FnMut(Groups) -> Groups,
    {
        Self {
            targets: self
                .targets
                .into_iter()
                .map(|(target, groups)| (target, f(groups)))
                .collect(),
        }
    }

    /// Keep targets for which `f` returns `true`.
    pub fn retain<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&str, &Groups) -> bool,
    {
        self.targets.retain(|target, groups| f(target, groups));
        self
    }
}

impl IntoIterator for PostsByTarget {
    type Item = (String, Groups);
    type IntoIter = std::collections::btree_map::IntoIter<String, Groups>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

/// Scan `files` and bucket every record accepted by `filter` by its target and grouping values.
pub fn collect(
    target_field: Field,
    grouping_field: Field,
    files: &[PathBuf],
    filter: &RecordFilter,
) -> Result<PostsByTarget, Error> {
    let mut posts = PostsByTarget::new();
    let stats = reader::scan(files, |record| {
        if filter.detect(&record) {
            let target = record.get(target_field).to_string();
            let group = record.get(grouping_field).to_string();
            posts.push(&target, &group, record);
        }
        Ok(())
    })?;

    info!(
        "kept {} out of {} posts ({} {}s)",
        posts.nb_posts(),
        stats.records,
        posts.nb_targets(),
        target_field
    );
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempfile::tempdir;

    use crate::filtering::Limits;

    use super::*;

    fn shard(dir: &std::path::Path, records: &[Record]) -> Vec<PathBuf> {
        let path = dir.join("RC_1");
        let mut f = File::create(&path).unwrap();
        for r in records {
            writeln!(f, "{}", serde_json::to_string(r).unwrap()).unwrap();
        }
        vec![path]
    }

    #[test]
    fn buckets_in_arrival_order() {
        let dir = tempdir().unwrap();
        let files = shard(
            dir.path(),
            &[
                Record::new("A", "s", "de", "eins"),
                Record::new("A", "s", "en", "one"),
                Record::new("B", "s", "de", "zwei"),
                Record::new("A", "s", "de", "drei"),
            ],
        );

        let posts =
            collect(Field::Author, Field::Language, &files, &RecordFilter::default()).unwrap();
        assert_eq!(posts.nb_targets(), 2);
        assert_eq!(posts.nb_posts(), 4);

        let a_de: Vec<&str> = posts.get("A").unwrap()["de"]
            .iter()
            .map(|r| r.body.as_str())
            .collect();
        assert_eq!(a_de, vec!["eins", "drei"]);
    }

    #[test]
    fn applies_filter() {
        let dir = tempdir().unwrap();
        let files = shard(
            dir.path(),
            &[
                Record::new("A", "s", "de", "long enough"),
                Record::new("A", "s", "de", "short"),
                Record::new("B", "s", "de", "long enough"),
                Record::new("A", "s", "fr", "long enough"),
            ],
        );
        let filter = RecordFilter::new(
            6,
            Limits::from_lists(Some("A"), None, Some("de,en")),
        );

        let posts = collect(Field::Author, Field::Language, &files, &filter).unwrap();
        assert_eq!(posts.nb_posts(), 1);
        assert!(posts.get("B").is_none());
        assert_eq!(posts.get("A").unwrap().len(), 1);
    }

    #[test]
    fn nothing_accepted() {
        let dir = tempdir().unwrap();
        let files = shard(dir.path(), &[Record::new("A", "s", "de", "x")]);
        let posts = collect(
            Field::Author,
            Field::Language,
            &files,
            &RecordFilter::new(1000, Limits::default()),
        )
        .unwrap();
        assert!(posts.is_empty());
    }
}

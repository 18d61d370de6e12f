//! Field value restrictions.
use std::collections::BTreeSet;

use itertools::Itertools;

use crate::grouping::Scope;
use crate::record::{Field, Record};

use super::Filter;

/// Allowed values for each restrictable field.
///
/// `None` means unrestricted. `Some` holds the allowed values, and an empty set allows nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limits {
    author: Option<BTreeSet<String>>,
    subreddit: Option<BTreeSet<String>>,
    language: Option<BTreeSet<String>>,
}

impl Limits {
    /// Build limits from comma-separated lists, as given on the command line.
    ///
    /// Missing or blank lists leave the field unrestricted.
    pub fn from_lists(
        authors: Option<&str>,
        subreddits: Option<&str>,
        languages: Option<&str>,
    ) -> Self {
        Self {
            author: authors.and_then(parse_list),
            subreddit: subreddits.and_then(parse_list),
            language: languages.and_then(parse_list),
        }
    }

    pub fn get(&self, field: Field) -> Option<&BTreeSet<String>> {
        match field {
            Field::Author => self.author.as_ref(),
            Field::Subreddit => self.subreddit.as_ref(),
            Field::Language => self.language.as_ref(),
        }
    }

    /// Builder-style setter. Passing `None` lifts the restriction.
    pub fn with(mut self, field: Field, values: Option<BTreeSet<String>>) -> Self {
        match field {
            Field::Author => self.author = values,
            Field::Subreddit => self.subreddit = values,
            Field::Language => self.language = values,
        };
        self
    }

    /// `true` if `value` is allowed for `field`.
    #[inline]
    pub fn allows(&self, field: Field, value: &str) -> bool {
        match self.get(field) {
            None => true,
            Some(values) => values.contains(value),
        }
    }

    /// Narrow the target and grouping restrictions to a resolved [Scope].
    ///
    /// The grouping field becomes the scope's groups. The target field becomes the scope's
    /// targets, intersected with the current target restriction if there is one.
    /// Other fields are left as is.
    pub fn narrow(&self, target_field: Field, grouping_field: Field, scope: &Scope) -> Limits {
        let groups = match self.get(grouping_field) {
            Some(requested) => scope.groups.intersection(requested).cloned().collect(),
            None => scope.groups.clone(),
        };
        let targets = match self.get(target_field) {
            Some(requested) => scope.targets.intersection(requested).cloned().collect(),
            None => scope.targets.clone(),
        };

        self.clone()
            .with(grouping_field, Some(groups))
            .with(target_field, Some(targets))
    }

    /// Short description of subreddit and language restrictions, used in output directory names.
    ///
    /// Values are sorted, subreddits first. Empty if neither field is restricted.
    /// Values that would make the summary longer than `max_len` bytes are replaced
    /// by a `and_{n}_more` suffix.
    pub fn summary(&self, max_len: usize) -> String {
        let values: Vec<&String> = [&self.subreddit, &self.language]
            .into_iter()
            .flatten()
            .flat_map(|values| values.iter())
            .collect();

        let mut kept = 0;
        let mut len = 0;
        for value in &values {
            let next = if kept == 0 { value.len() } else { len + 1 + value.len() };
            if next > max_len {
                break;
            }
            len = next;
            kept += 1;
        }

        let summary = values[..kept].iter().join("_");
        match values.len() - kept {
            0 => summary,
            rest if kept == 0 => format!("and_{}_more", rest),
            rest => format!("{}_and_{}_more", summary, rest),
        }
    }
}

impl Filter<&Record> for Limits {
    fn detect(&self, record: &Record) -> bool {
        [Field::Author, Field::Subreddit, Field::Language]
            .into_iter()
            .all(|field| self.allows(field, record.get(field)))
    }
}

fn parse_list(list: &str) -> Option<BTreeSet<String>> {
    let values: BTreeSet<String> = list
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

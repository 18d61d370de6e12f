//! Cross-border corpus pipeline
//!
//! Builds corpora where every target (e.g. an author) has at least `m` posts
//! in every group (e.g. a language) of interest, and in these groups only.
//!
//! # Processing
//! 1. Get the target/group index, from its cache or by scanning the input files.
//! 1. Resolve the groups in scope and the targets that have been seen in all of them.
//!    Target and grouping restrictions are narrowed to this scope.
//! 1. Scan the input files again, keeping posts that are long enough and within restrictions,
//!    bucketed by target and group.
//! 1. Drop groups with fewer than `m` posts, then targets that do not cover every group in scope.
//! 1. Write the corpus in `{target}_{grouping}_{restrictions}_{m}_{c}_{timestamp}/target/group/NNNNNN.json`,
//!    where `restrictions` lists the requested subreddits and languages.
//!
//! Each step can leave nothing to store, in which case the pipeline stops with [CorpusOutcome::Empty].
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;
use crate::filtering::{Limits, RecordFilter};
use crate::grouping::{
    collect, compute_overlap, filter_desired_groups, filter_min_posts, materialize, IndexCache,
};
use crate::record::Field;

use super::pipeline::{timestamp, CorpusOutcome, CorpusSettings, Pipeline};

/// Byte budget of the restriction summary in corpus directory names.
const MAX_SUMMARY_LEN: usize = 128;

pub struct CrossBorder {
    settings: CorpusSettings,
    grouping_field: Field,
    index_dir: PathBuf,
}

impl CrossBorder {
    /// Fails if the target and grouping fields are the same.
    pub fn new(
        settings: CorpusSettings,
        grouping_field: Field,
        index_dir: &Path,
    ) -> Result<Self, Error> {
        if settings.target_field == grouping_field {
            return Err(Error::SameFields(grouping_field));
        }

        Ok(Self {
            settings,
            grouping_field,
            index_dir: index_dir.to_path_buf(),
        })
    }

    /// Name of the corpus directory, built from the fields, the requested restrictions and thresholds.
    fn corpus_name(&self, timestamp: &str) -> String {
        let s = &self.settings;
        let mut name = format!("{}_{}", s.target_field, self.grouping_field);
        let summary = s.limits.summary(MAX_SUMMARY_LEN);
        if !summary.is_empty() {
            name.push('_');
            name.push_str(&summary);
        }
        format!("{}_{}_{}_{}", name, s.min_posts, s.min_chars, timestamp)
    }

    fn no_posts(&self) -> CorpusOutcome {
        warn!("no posts left! exiting...");
        CorpusOutcome::Empty
    }
}

impl Pipeline<CorpusOutcome> for CrossBorder {
    fn run(&self) -> Result<CorpusOutcome, Error> {
        let s = &self.settings;
        let (target_field, grouping_field) = (s.target_field, self.grouping_field);
        info!("grouping by {} for every {}", grouping_field, target_field);

        let cache = IndexCache::new(&self.index_dir);
        let index = cache.get_or_build(target_field, grouping_field, &s.files)?;

        let scope = compute_overlap(&index, &s.limits)?;
        let limits = s.limits.narrow(target_field, grouping_field, &scope);
        let nb_targets = limits.get(target_field).map_or(0, |t| t.len());
        if nb_targets == 0 {
            warn!(
                "no {} has posts in every {} of {:?}",
                target_field, grouping_field, scope.groups
            );
            return Ok(self.no_posts());
        }

        info!("collecting posts from {} {}s", nb_targets, target_field);
        let filter = RecordFilter::new(s.min_chars, limits);
        let posts = collect(target_field, grouping_field, &s.files, &filter)?;
        if posts.is_empty() {
            return Ok(self.no_posts());
        }

        info!("filtering {}s with not enough posts", grouping_field);
        let posts = filter_min_posts(posts, s.min_posts);
        if posts.is_empty() {
            return Ok(self.no_posts());
        }

        info!("filtering {}s with not enough {}s", target_field, grouping_field);
        let posts = filter_desired_groups(posts, &scope.groups);
        if posts.is_empty() {
            return Ok(self.no_posts());
        }

        let dst = s.dst.join(self.corpus_name(&timestamp()));
        let root = materialize(&posts, &dst)?;
        Ok(CorpusOutcome::Stored(root))
    }
}

/*! Corpus processing

Offline operations on corpora that have already been generated:

- [postfilter]: stricter re-filtering of a grouped corpus by document length,
- [stats] and [dataset_stats]: descriptive statistics,
- [restructure]: conversion of flat corpora to the nested layout.
!*/
pub mod dataset_stats;
pub mod postfilter;
pub mod restructure;
pub mod stats;

pub use dataset_stats::{DatasetStats, DatasetSummary};
pub use postfilter::{PostFilter, PostFilterSummary};
pub use restructure::restructure;
pub use stats::{corpus_stats, single_stats, CorpusStats};

/*! Grouping of comments into corpora.

Cross-border corpora (target field + grouping field) are built in five steps:

1. An [Index] of the target values seen under each group is built or loaded from its cache ([IndexCache]).
1. [compute_overlap] resolves the groups in scope and the targets present in all of them.
1. [collect] buckets accepted posts by `(target, group)`.
1. [filter_min_posts] and [filter_desired_groups] keep targets having enough posts in every group of interest.
1. [materialize] writes the `target/group/NNNNNN.json` tree.

Corpora without a grouping field only need a single pass, buffering records by target with an [Accumulator].
!*/
mod accumulator;
mod collect;
mod index;
mod materialize;
mod overlap;
mod threshold;

pub use accumulator::{flush, Accumulator};
pub use collect::{collect, Groups, PostsByTarget};
pub use index::{Index, IndexCache, Lookup};
pub use materialize::materialize;
pub use overlap::{compute_overlap, Scope};
pub use threshold::{filter_desired_groups, filter_min_posts};

/*! Filtering utilities

Filters operate on record level, and implement [filter::Filter]:
two successive equal inputs give two equal outputs.

- [Limits] restricts the allowed values of the `author`, `subreddit` and `language` fields.
- [RecordFilter] combines [Limits] with a minimal body length, and is the predicate used by every scan over the input files.
! */
mod filter;
mod limits;
mod record;

pub use filter::Filter;
pub use limits::Limits;
pub use record::RecordFilter;

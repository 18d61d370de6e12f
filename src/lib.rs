//! # redcorpus
//!
//! Turns cleaned Reddit comment dumps into per-target, per-group text corpora.
//!
//! Comments (see [record::Record]) are grouped by a target field (author, subreddit or language),
//! and optionally cross-tabulated against a second, grouping field.
//! Corpora can then be made stricter ([processing::postfilter]) and described ([processing::stats]).
pub mod cli;
pub mod error;
pub mod filtering;
pub mod grouping;
pub mod io;
pub mod pipelines;
pub mod processing;
pub mod record;

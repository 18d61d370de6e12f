//! Pipeline trait and shared corpus settings.
use std::path::PathBuf;

use crate::error::Error;
use crate::filtering::Limits;
use crate::record::Field;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any custom pipeline that needs a return type can use the
/// trait aswell.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

/// What a corpus pipeline ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusOutcome {
    /// Corpus written in this directory.
    Stored(PathBuf),
    /// Nothing left to store after filtering. Not an error, but no corpus has been written.
    Empty,
}

/// Settings shared by the corpus pipelines.
#[derive(Debug, Clone)]
pub struct CorpusSettings {
    /// Input shards, in reading order.
    pub files: Vec<PathBuf>,
    pub target_field: Field,
    pub limits: Limits,
    /// minimal number of posts (per group, for cross-border corpora)
    pub min_posts: usize,
    /// minimal body length, in characters
    pub min_chars: usize,
    /// Directory in which the corpus directory is created.
    pub dst: PathBuf,
}

/// Timestamp used in generated corpus directory names.
pub fn timestamp() -> String {
    chrono::Local::now().format("%d-%m-%Y--%H-%M").to_string()
}

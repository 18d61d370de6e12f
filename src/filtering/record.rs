//! Record-level filtering.
use crate::record::Record;

use super::{Filter, Limits};

/// Keeps records that have a body of at least `min_chars` characters
/// and whose field values are allowed by [Limits].
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    min_chars: usize,
    limits: Limits,
}

impl RecordFilter {
    pub fn new(min_chars: usize, limits: Limits) -> Self {
        Self { min_chars, limits }
    }
}

impl Filter<&Record> for RecordFilter {
    fn detect(&self, record: &Record) -> bool {
        record.body_len() >= self.min_chars && self.limits.detect(record)
    }
}

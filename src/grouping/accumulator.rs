/*! Per-target buffering for corpora built without a grouping field.

Records are buffered by target value. Once a buffer reaches the threshold, it is emitted as a batch
and the target is marked as valid. At the end of a scan, what remains in the buffers of valid targets
is emitted too, and targets that never reached the threshold are dropped.
!*/
use std::collections::{BTreeSet, HashMap};

use crate::record::Record;

/// Split `buffer` into a batch holding every complete group of `threshold` records, and the remainder.
///
/// No batch is emitted while the buffer is below `threshold`.
pub fn flush(mut buffer: Vec<Record>, threshold: usize) -> (Option<Vec<Record>>, Vec<Record>) {
    let threshold = threshold.max(1);
    if buffer.len() < threshold {
        return (None, buffer);
    }

    let nb_full = buffer.len() - buffer.len() % threshold;
    let remaining = buffer.split_off(nb_full);
    (Some(buffer), remaining)
}

#[derive(Debug)]
pub struct Accumulator {
    threshold: usize,
    buffers: HashMap<String, Vec<Record>>,
    flushed: BTreeSet<String>,
}

impl Accumulator {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            buffers: HashMap::new(),
            flushed: BTreeSet::new(),
        }
    }

    /// Buffer `record` under `target`, returning a batch to write if the threshold has been reached.
    pub fn push(&mut self, target: &str, record: Record) -> Option<Vec<Record>> {
        let buffer = match self.buffers.get_mut(target) {
            Some(buffer) => buffer,
            None => self.buffers.entry(target.to_string()).or_default(),
        };
        buffer.push(record);
        if buffer.len() < self.threshold {
            return None;
        }

        let (batch, remaining) = flush(std::mem::take(buffer), self.threshold);
        *buffer = remaining;
        if !self.flushed.contains(target) {
            self.flushed.insert(target.to_string());
        }
        batch
    }

    /// Targets that have been emitted at least once.
    pub fn flushed(&self) -> &BTreeSet<String> {
        &self.flushed
    }

    /// Remaining batches of targets that have been emitted at least once, sorted by target.
    ///
    /// Buffers of the other targets are dropped.
    pub fn finish(mut self) -> Vec<(String, Vec<Record>)> {
        self.flushed
            .iter()
            .filter_map(|target| {
                self.buffers
                    .remove(target)
                    .filter(|b| !b.is_empty())
                    .map(|b| (target.clone(), b))
            })
            .collect()
    }
}

//! Descriptive statistics over generated corpora.
//!
//! Two layouts are supported:
//! - nested corpora (`target/group/NNNNNN.json`), see [corpus_stats],
//! - flat corpora (`target.json`, JSON lines), see [single_stats].
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::error::Error;
use crate::io::{is_json, sorted_entries, RecordReader};
use crate::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStats {
    /// number of targets
    pub targets: usize,
    /// average number of documents per target
    pub avg_docs: f64,
    /// average document length, in characters
    pub avg_doc_length: f64,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Statistics of a nested corpus.
///
/// Averages are first computed by group over targets, then over groups.
pub fn corpus_stats(src: &Path) -> Result<CorpusStats, Error> {
    // group -> one value per target
    let mut docs_by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut length_by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut targets = 0;

    for target_dir in sorted_entries(src)? {
        if !target_dir.is_dir() {
            continue;
        }
        targets += 1;
        for group_dir in sorted_entries(&target_dir)? {
            if !group_dir.is_dir() {
                continue;
            }
            let group = group_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut lengths = Vec::new();
            for doc in sorted_entries(&group_dir)?.into_iter().filter(|p| is_json(p)) {
                let record: Record = serde_json::from_reader(BufReader::new(File::open(&doc)?))?;
                lengths.push(record.body_len() as f64);
            }
            debug!("{:?}: {} documents", group_dir, lengths.len());

            docs_by_group
                .entry(group.clone())
                .or_default()
                .push(lengths.len() as f64);
            if !lengths.is_empty() {
                length_by_group.entry(group).or_default().push(mean(&lengths));
            }
        }
    }

    let avg_docs: Vec<f64> = docs_by_group.values().map(|v| mean(v)).collect();
    let avg_lengths: Vec<f64> = length_by_group.values().map(|v| mean(v)).collect();
    Ok(CorpusStats {
        targets,
        avg_docs: mean(&avg_docs),
        avg_doc_length: mean(&avg_lengths),
    })
}

/// Statistics of a flat corpus, one `target.json` file per target.
pub fn single_stats(src: &Path) -> Result<CorpusStats, Error> {
    let mut docs = Vec::new();
    let mut lengths = Vec::new();

    for path in sorted_entries(src)?.into_iter().filter(|p| is_json(p)) {
        let mut reader = RecordReader::from_path(&path)?;
        let target_lengths = (&mut reader)
            .map(|r| r.map(|r| r.body_len() as f64))
            .collect::<Result<Vec<_>, _>>()?;

        docs.push(target_lengths.len() as f64);
        if !target_lengths.is_empty() {
            lengths.push(mean(&target_lengths));
        }
    }

    Ok(CorpusStats {
        targets: docs.len(),
        avg_docs: mean(&docs),
        avg_doc_length: mean(&lengths),
    })
}

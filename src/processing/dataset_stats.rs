/*! Dataset statistics

Counts documents by author, subreddit and language over filtered comment shards, along with body lengths.
Shards are processed concurrently (one task per shard) and the results are merged.
!*/
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::io::RecordReader;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub no_documents: usize,
    pub authors: BTreeMap<String, usize>,
    pub subreddits: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    pub doc_lengths: Vec<usize>,
}

impl DatasetStats {
    /// Stats of a single shard.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let mut stats = Self::default();
        for record in RecordReader::from_path(path)? {
            let record = record?;
            *stats.authors.entry(record.author.clone()).or_insert(0) += 1;
            *stats.subreddits.entry(record.subreddit.clone()).or_insert(0) += 1;
            *stats.languages.entry(record.language.clone()).or_insert(0) += 1;
            stats.doc_lengths.push(record.body_len());
            stats.no_documents += 1;
        }
        Ok(stats)
    }

    /// Merge `other` into `self`. Lengths of `other` come after the ones of `self`.
    pub fn merge(mut self, other: Self) -> Self {
        fn add(into: &mut BTreeMap<String, usize>, from: BTreeMap<String, usize>) {
            for (k, v) in from {
                *into.entry(k).or_insert(0) += v;
            }
        }
        self.no_documents += other.no_documents;
        add(&mut self.authors, other.authors);
        add(&mut self.subreddits, other.subreddits);
        add(&mut self.languages, other.languages);
        self.doc_lengths.extend(other.doc_lengths);
        self
    }

    /// Corpus-level figures, printed after a `dataset-stats` run.
    pub fn summary(&self) -> DatasetSummary {
        let avg_docs_per_author = match self.authors.len() {
            0 => 0.0,
            nb => self.no_documents as f64 / nb as f64,
        };
        let avg_doc_size = match self.doc_lengths.len() {
            0 => 0.0,
            nb => self.doc_lengths.iter().sum::<usize>() as f64 / nb as f64,
        };

        DatasetSummary {
            comments: self.no_documents,
            authors: self.authors.len(),
            subreddits: self.subreddits.len(),
            avg_docs_per_author,
            avg_doc_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub comments: usize,
    pub authors: usize,
    pub subreddits: usize,
    pub avg_docs_per_author: f64,
    pub avg_doc_size: f64,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "COMMENTS:     {:12}", self.comments)?;
        writeln!(f, "AUTHORS:      {:12}", self.authors)?;
        writeln!(f, "SUBREDDITS:   {:12}", self.subreddits)?;
        writeln!(f, "AVG DOC/AUTH: {:12.3}", self.avg_docs_per_author)?;
        write!(f, "AVG DOCSIZE:  {:12.0}", self.avg_doc_size)
    }
}

/// Compute stats over `files` concurrently.
///
/// Errors are logged, and the first one is returned once every shard has been processed.
pub fn dataset_stats(files: &[PathBuf]) -> Result<DatasetStats, Error> {
    info!("processing {} files", files.len());
    let results: Vec<Result<DatasetStats, Error>> = files
        .par_iter()
        .map(|path| DatasetStats::from_path(path))
        .collect();

    let mut stats = DatasetStats::default();
    let mut first_error = None;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(s) => stats = stats.merge(s),
            Err(e) => {
                error!("{:?}: {}", path, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(stats),
    }
}

/// Write `stats` as JSON to `dst`.
pub fn store(stats: &DatasetStats, dst: &Path) -> Result<(), Error> {
    let mut w = BufWriter::new(File::create(dst)?);
    serde_json::to_writer(&mut w, stats)?;
    w.flush()?;
    info!("stats written to {:?}", dst);
    Ok(())
}

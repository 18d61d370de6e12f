/*! JSON-lines record reading.

Readers implement [Iterator] over [Record]s. Lines that can't be parsed are skipped and counted:
they are expected to have been removed by the upstream filtering stage, and a single bad line
should not abort a scan over a whole dump.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::error::Error;
use crate::record::Record;

/// Resolve `pattern` into a list of files, sorted by filename.
pub fn input_files(pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let mut files = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    files.retain(|f| f.is_file());
    files.sort();
    debug!("resolved {} input files from {}", files.len(), pattern);
    Ok(files)
}

/// Entries of `dir`, sorted by name.
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

/// `true` for regular files with a `.json` extension.
pub fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == "json")
}

/// Line-oriented reader of [Record]s.
#[derive(Debug)]
pub struct RecordReader<R> {
    lines: Lines<R>,
    line_nb: usize,
    malformed: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_nb: 0,
            malformed: 0,
        }
    }

    /// Number of lines skipped because they weren't valid records.
    pub fn malformed(&self) -> usize {
        self.malformed
    }
}

impl RecordReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            self.line_nb += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    debug!("skipping malformed line {}: {}", self.line_nb, e);
                    self.malformed += 1;
                }
            }
        }
    }
}

/// Counters for a scan over a list of files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub records: usize,
    pub malformed: usize,
}

/// Feed every record of every file (in the provided order) to `f`.
///
/// IO errors and errors returned by `f` stop the scan, malformed lines don't.
pub fn scan<F>(files: &[PathBuf], mut f: F) -> Result<ScanStats, Error>
where
    F: FnMut(Record) -> Result<(), Error>,
{
    let mut stats = ScanStats::default();
    for (idx, path) in files.iter().enumerate() {
        info!("[{}/{}] reading {:?}", idx + 1, files.len(), path);
        let mut reader = RecordReader::from_path(path)?;
        for record in &mut reader {
            f(record?)?;
            stats.records += 1;
        }
        if reader.malformed() > 0 {
            warn!(
                "{:?}: skipped {} malformed lines",
                path,
                reader.malformed()
            );
        }
        stats.malformed += reader.malformed();
        stats.files += 1;
    }

    if stats.malformed > 0 {
        warn!(
            "skipped {} malformed lines over {} files",
            stats.malformed, stats.files
        );
    }
    Ok(stats)
}

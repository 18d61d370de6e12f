/*! Corpus writing.

- [output_dir] allocates the directory a corpus is written to, never reusing a populated one.
- [CorpusWriter] writes `target/group/NNNNNN.json` trees, one record per file.
- [TargetFiles] appends records to flat `target.json` JSON-lines files.
!*/
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::Error;
use crate::record::Record;

/// Get a directory to store a corpus into.
///
/// `dir` is created if it does not exist and used as is if it is empty.
/// If it holds anything, a fresh temporary directory is created and returned instead.
pub fn output_dir(dir: &Path) -> Result<PathBuf, Error> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("storing output to {:?}", dir);
        return Ok(dir.to_path_buf());
    }

    if dir.is_dir() && std::fs::read_dir(dir)?.next().is_none() {
        info!("storing output to existing empty directory {:?}", dir);
        return Ok(dir.to_path_buf());
    }

    let prefix = dir
        .file_name()
        .map(|n| format!("{}_", n.to_string_lossy()))
        .unwrap_or_default();
    #[allow(deprecated)]
    let tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .tempdir()?
        .into_path();
    warn!(
        "The output directory {:?} is not empty. Storing to temporary directory {:?} instead.",
        dir, tmp
    );
    Ok(tmp)
}

/// Writes nested `target/group/NNNNNN.json` corpora.
pub struct CorpusWriter {
    root: PathBuf,
}

impl CorpusWriter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write each record of a (target, group) bucket into its own file,
    /// numbered from 0 in bucket order.
    ///
    /// Returns the number of written files.
    pub fn write_bucket(
        &self,
        target: &str,
        group: &str,
        records: &[Record],
    ) -> Result<usize, Error> {
        let mut dir = self.root.clone();
        dir.push(target);
        dir.push(group);
        std::fs::create_dir_all(&dir)?;

        for (idx, record) in records.iter().enumerate() {
            let path = dir.join(format!("{:06}.json", idx));
            let f = File::create(path)?;
            serde_json::to_writer(f, record)?;
        }

        debug!("[{}/{}] wrote {} documents", target, group, records.len());
        Ok(records.len())
    }
}

/// Append-only `target.json` files.
pub struct TargetFiles {
    dst: PathBuf,
}

impl TargetFiles {
    pub fn new(dst: &Path) -> Self {
        Self {
            dst: dst.to_path_buf(),
        }
    }

    pub fn path(&self, target: &str) -> PathBuf {
        self.dst.join(format!("{}.json", target))
    }

    /// Append `records` as JSON lines to the file of `target`, creating it if needed.
    pub fn append(&self, target: &str, records: &[Record]) -> Result<(), Error> {
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(target))?;
        let mut w = BufWriter::new(f);
        for record in records {
            serde_json::to_writer(&mut w, record)?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
        Ok(())
    }
}

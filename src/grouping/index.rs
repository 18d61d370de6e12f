/*! Grouping index and its on-disk cache.

An [Index] maps each value of the grouping field to the set of target field values seen with it.
It is computed with a full scan over the input files and cached in `{target}_{grouping}.json`,
so that later runs over the same field pair skip the scan.

A cached index is discarded (and recomputed) when the file is missing, can't be parsed,
or was computed for another field pair.
!*/
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::io::reader;
use crate::record::{Field, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub target_field: Field,
    pub grouping_field: Field,
    /// grouping value -> target values
    pub data: BTreeMap<String, BTreeSet<String>>,
}

impl Index {
    pub fn new(target_field: Field, grouping_field: Field) -> Self {
        Self {
            target_field,
            grouping_field,
            data: BTreeMap::new(),
        }
    }

    /// Register the (group, target) pair of a record.
    pub fn add(&mut self, record: &Record) {
        let group = record.get(self.grouping_field);
        let target = record.get(self.target_field);
        match self.data.get_mut(group) {
            Some(targets) => {
                if !targets.contains(target) {
                    targets.insert(target.to_string());
                }
            }
            None => {
                self.data
                    .insert(group.to_string(), BTreeSet::from([target.to_string()]));
            }
        }
    }

    /// Compute an index with a full pass over `files`.
    pub fn build(
        target_field: Field,
        grouping_field: Field,
        files: &[PathBuf],
    ) -> Result<Self, Error> {
        info!(
            "computing {} index over {} files, grouping by {}",
            target_field,
            files.len(),
            grouping_field
        );
        let mut index = Index::new(target_field, grouping_field);
        reader::scan(files, |record| {
            index.add(&record);
            Ok(())
        })?;
        info!("index holds {} {}s", index.data.len(), grouping_field);
        Ok(index)
    }

    /// Every grouping value present in the index.
    pub fn groups(&self) -> BTreeSet<String> {
        self.data.keys().cloned().collect()
    }

    /// `true` if the index has been computed for this field pair.
    pub fn matches(&self, target_field: Field, grouping_field: Field) -> bool {
        self.target_field == target_field && self.grouping_field == grouping_field
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    /// Write the index to `path`, overwriting any existing file.
    pub fn store(&self, path: &Path) -> Result<(), Error> {
        info!("storing index to {:?}", path);
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut w, self)?;
        w.flush()?;
        Ok(())
    }
}

/// Result of a cache lookup.
#[derive(Debug)]
pub enum Lookup {
    Hit(Index),
    Missing,
    Corrupt(Error),
    Mismatch { stored: (Field, Field) },
}

/// Directory holding cached indices.
pub struct IndexCache {
    dir: PathBuf,
}

impl IndexCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Cache file location for a field pair.
    pub fn path(&self, target_field: Field, grouping_field: Field) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", target_field, grouping_field))
    }

    pub fn lookup(&self, target_field: Field, grouping_field: Field) -> Lookup {
        let path = self.path(target_field, grouping_field);
        if !path.is_file() {
            return Lookup::Missing;
        }
        match Index::load(&path) {
            Ok(index) if index.matches(target_field, grouping_field) => Lookup::Hit(index),
            Ok(index) => Lookup::Mismatch {
                stored: (index.target_field, index.grouping_field),
            },
            Err(e) => Lookup::Corrupt(e),
        }
    }

    /// Get the cached index for a field pair, or compute it over `files` and cache it.
    pub fn get_or_build(
        &self,
        target_field: Field,
        grouping_field: Field,
        files: &[PathBuf],
    ) -> Result<Index, Error> {
        let path = self.path(target_field, grouping_field);
        match self.lookup(target_field, grouping_field) {
            Lookup::Hit(index) => {
                info!("using index: {:?}", path);
                return Ok(index);
            }
            Lookup::Missing => {
                warn!("could not find index {:?}, calculating new index", path);
            }
            Lookup::Corrupt(e) => {
                warn!("exception during parsing index file {:?}: {}", path, e);
                warn!("calculating new index");
            }
            Lookup::Mismatch { stored } => {
                warn!("incompatible index file given: {:?}", path);
                warn!("stored fields:   {}, {}", stored.0, stored.1);
                warn!("required fields: {}, {}", target_field, grouping_field);
                warn!("calculating new index");
            }
        }

        let index = Index::build(target_field, grouping_field, files)?;
        std::fs::create_dir_all(&self.dir)?;
        index.store(&path)?;
        Ok(index)
    }
}

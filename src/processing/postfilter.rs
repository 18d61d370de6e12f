/*! Post-filtering

Offline, stricter version of an already generated `target/group/NNNNNN.json` corpus.

Documents are kept if their body length is within `[c, max_c]`, and a target is kept only if each of its groups
still holds at least `m` documents. Kept documents are linked (symlinks on unix, copies elsewhere) in the new corpus,
with their original file names.
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::io::{is_json, sorted_entries};
use crate::record::Record;

/// Outcome of a post-filtering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilterSummary {
    pub dst: PathBuf,
    pub dropped: usize,
    pub remaining: usize,
}

pub struct PostFilter {
    min_posts: usize,
    min_chars: usize,
    max_chars: Option<usize>,
}

impl PostFilter {
    pub fn new(min_posts: usize, min_chars: usize, max_chars: Option<usize>) -> Self {
        Self {
            min_posts,
            min_chars,
            max_chars,
        }
    }

    /// `{m}_{c}[_{max_c}]`, next to `src`.
    pub fn default_dst(&self, src: &Path) -> PathBuf {
        let mut name = format!("{}_{}", self.min_posts, self.min_chars);
        if let Some(max) = self.max_chars {
            name.push_str(&format!("_{}", max));
        }
        src.parent().unwrap_or_else(|| Path::new(".")).join(name)
    }

    #[inline]
    fn keep(&self, len: usize) -> bool {
        len >= self.min_chars && self.max_chars.map_or(true, |max| len <= max)
    }

    /// Kept documents of a target, by group.
    ///
    /// Returns `None` as soon as a group has fewer than `m` kept documents.
    fn filter_target(
        &self,
        target_dir: &Path,
    ) -> Result<Option<BTreeMap<PathBuf, Vec<PathBuf>>>, Error> {
        let mut kept = BTreeMap::new();
        for group_dir in sorted_entries(target_dir)? {
            if !group_dir.is_dir() {
                continue;
            }
            let mut good = Vec::new();
            for doc in sorted_entries(&group_dir)? {
                if !is_json(&doc) {
                    continue;
                }
                let record: Record = serde_json::from_reader(BufReader::new(File::open(&doc)?))?;
                if self.keep(record.body_len()) {
                    good.push(doc);
                }
            }

            if good.len() < self.min_posts {
                debug!("{:?}: {} documents left, dropping target", group_dir, good.len());
                return Ok(None);
            }
            kept.insert(group_dir, good);
        }
        Ok(Some(kept))
    }

    /// Post-filter the corpus at `src` into `dst`.
    pub fn run(&self, src: &Path, dst: &Path) -> Result<PostFilterSummary, Error> {
        info!("post-filtering {:?} into {:?}", src, dst);
        let mut summary = PostFilterSummary {
            dst: dst.to_path_buf(),
            dropped: 0,
            remaining: 0,
        };

        for target_dir in sorted_entries(src)? {
            if !target_dir.is_dir() {
                continue;
            }
            let groups = match self.filter_target(&target_dir)? {
                Some(groups) => groups,
                None => {
                    summary.dropped += 1;
                    continue;
                }
            };

            let target = file_name(&target_dir)?;
            for (group_dir, docs) in groups {
                let out = dst.join(target).join(file_name(&group_dir)?);
                std::fs::create_dir_all(&out)?;
                for doc in docs {
                    link(&doc.canonicalize()?, &out.join(file_name(&doc)?))?;
                }
            }
            summary.remaining += 1;
        }

        info!(
            "dropped {} targets ({} remaining)",
            summary.dropped, summary.remaining
        );
        Ok(summary)
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, Error> {
    path.file_name()
        .ok_or_else(|| Error::Custom(format!("no file name in {:?}", path)))
}

#[cfg(unix)]
fn link(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(not(unix))]
fn link(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::copy(src, dst).map(|_| ())
}

//! Corpus materialization.
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::io::{output_dir, CorpusWriter};

use super::PostsByTarget;

/// Write `posts` as a `target/group/NNNNNN.json` tree under `dst`.
///
/// If `dst` already holds something, the corpus goes to a fresh temporary directory instead.
/// Returns the directory the corpus was written to.
pub fn materialize(posts: &PostsByTarget, dst: &Path) -> Result<PathBuf, Error> {
    let root = output_dir(dst)?;
    let writer = CorpusWriter::new(&root);

    let mut nb_docs = 0;
    for (target, groups) in posts.iter() {
        for (group, records) in groups {
            nb_docs += writer.write_bucket(target, group, records)?;
        }
    }

    info!(
        "stored {} documents of {} targets to {:?}",
        nb_docs,
        posts.nb_targets(),
        writer.root()
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use crate::record::Record;

    use super::*;

    fn posts() -> PostsByTarget {
        let mut posts = PostsByTarget::new();
        posts.push("A", "de", Record::new("A", "s", "de", "eins"));
        posts.push("A", "de", Record::new("A", "s", "de", "zwei"));
        posts.push("A", "en", Record::new("A", "s", "en", "one"));
        posts.push("B", "en", Record::new("B", "s", "en", "two"));
        posts
    }

    fn read(path: &Path) -> Record {
        serde_json::from_reader(File::open(path).unwrap()).unwrap()
    }

    #[test]
    fn layout() {
        let base = tempdir().unwrap();
        let dst = base.path().join("corpus");
        let root = materialize(&posts(), &dst).unwrap();
        assert_eq!(root, dst);

        assert_eq!(read(&dst.join("A/de/000000.json")).body, "eins");
        assert_eq!(read(&dst.join("A/de/000001.json")).body, "zwei");
        assert_eq!(read(&dst.join("A/en/000000.json")).body, "one");
        assert_eq!(read(&dst.join("B/en/000000.json")).body, "two");
        assert_eq!(std::fs::read_dir(dst.join("A/de")).unwrap().count(), 2);
    }

    #[test]
    fn populated_destination_is_left_alone() {
        let base = tempdir().unwrap();
        let dst = base.path().join("corpus");
        std::fs::create_dir_all(dst.join("A/de")).unwrap();
        std::fs::write(dst.join("A/de/000000.json"), b"previous").unwrap();

        let root = materialize(&posts(), &dst).unwrap();
        assert_ne!(root, dst);
        assert_eq!(std::fs::read(dst.join("A/de/000000.json")).unwrap(), b"previous");
        assert_eq!(read(&root.join("A/de/000000.json")).body, "eins");
        std::fs::remove_dir_all(root).unwrap();
    }
}

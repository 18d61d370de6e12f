//! Conversion of flat corpora (`target.json`) to the nested `target/group/NNNNNN.json` layout,
//! using a single group for every target.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io::{is_json, sorted_entries};

/// Restructure the flat corpus at `src` into `dst`, putting every document into `group`.
///
/// Lines are copied verbatim. Returns the number of written documents.
pub fn restructure(src: &Path, dst: &Path, group: &str) -> Result<usize, Error> {
    let mut nb_docs = 0;
    let files = sorted_entries(src)?.into_iter().filter(|p| is_json(p));

    for path in files {
        let target = path
            .file_stem()
            .ok_or_else(|| Error::Custom(format!("no file name in {:?}", path)))?;
        let out_dir = dst.join(target).join(group);
        std::fs::create_dir_all(&out_dir)?;

        let reader = BufReader::new(File::open(&path)?);
        for (idx, line) in reader.lines().enumerate() {
            std::fs::write(out_dir.join(format!("{:06}.json", idx)), line?)?;
            nb_docs += 1;
        }
    }

    info!("restructured {} documents into {:?}", nb_docs, dst);
    Ok(nb_docs)
}

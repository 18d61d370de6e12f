/*!
# IO utilities

Reading of JSON-lines comment shards and writing of generated corpora.

Input shards are read line by line through [reader::RecordReader], and whole scans over a sorted file list are done with [reader::scan].
Corpora are written either as nested `target/group/NNNNNN.json` trees ([writer::CorpusWriter]) or as flat, append-only `target.json` files ([writer::TargetFiles]).
!*/
pub mod reader;
pub mod writer;

pub use reader::{input_files, is_json, scan, sorted_entries, RecordReader, ScanStats};
pub use writer::{output_dir, CorpusWriter, TargetFiles};

//! Pipelines.
//!
//! Corpus building pipelines are implemented here, and the module
//! provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
//!
//! - [CrossBorder] builds `target/group/` corpora, when a grouping field is given.
//! - [NonBorder] builds flat `target.json` corpora otherwise.
mod crossborder;
mod nonborder;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use crossborder::CrossBorder;
pub use nonborder::NonBorder;
pub use pipeline::{CorpusOutcome, CorpusSettings, Pipeline};

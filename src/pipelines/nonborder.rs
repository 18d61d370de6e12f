//! Single-dimension corpus pipeline
//!
//! Posts are only keyed by the target field. Targets with at least `m` accepted posts get a
//! `{target}.json` JSON-lines file in `{target_field}_{timestamp}/`, written `m` posts at a time
//! during the scan and completed with the remaining posts at the end.
use log::{info, warn};

use crate::error::Error;
use crate::filtering::{Filter, RecordFilter};
use crate::grouping::Accumulator;
use crate::io::{output_dir, reader, TargetFiles};

use super::pipeline::{timestamp, CorpusOutcome, CorpusSettings, Pipeline};

pub struct NonBorder {
    settings: CorpusSettings,
}

impl NonBorder {
    pub fn new(settings: CorpusSettings) -> Self {
        Self { settings }
    }
}

impl Pipeline<CorpusOutcome> for NonBorder {
    fn run(&self) -> Result<CorpusOutcome, Error> {
        let s = &self.settings;
        info!("not grouping, building a corpus of {}s", s.target_field);
        info!("{:?}", s.limits);

        let dst = output_dir(&s.dst.join(format!("{}_{}", s.target_field, timestamp())))?;
        let files = TargetFiles::new(&dst);
        let filter = RecordFilter::new(s.min_chars, s.limits.clone());
        let mut acc = Accumulator::new(s.min_posts);

        reader::scan(&s.files, |record| {
            if !filter.detect(&record) {
                return Ok(());
            }
            let target = record.get(s.target_field).to_string();
            if let Some(batch) = acc.push(&target, record) {
                files.append(&target, &batch)?;
            }
            Ok(())
        })?;

        if acc.flushed().is_empty() {
            warn!("No results left to store, exiting");
            return Ok(CorpusOutcome::Empty);
        }

        let nb_targets = acc.flushed().len();
        for (target, batch) in acc.finish() {
            files.append(&target, &batch)?;
        }
        info!("stored {} {}s to {:?}", nb_targets, s.target_field, dst);

        Ok(CorpusOutcome::Stored(dst))
    }
}

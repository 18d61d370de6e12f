//! # redcorpus
//!
//! Batch tool generating Reddit comment corpora for linguistic research.
//!
//! ```sh
//! redcorpus 0.1.0
//! Reddit comment corpus generation tool.
//!
//! USAGE:
//!     redcorpus <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     dataset-stats    Statistics of filtered comment shards
//!     group            Group comments by target (and grouping) field into a corpus
//!     help             Prints this message or the help of the given subcommand(s)
//!     postfilter       Make a stricter version of a generated corpus by re-setting c and m values
//!     restructure      Convert a corpus built without grouping field to the nested layout
//!     stats            Statistics of a generated corpus
//! ```
//!
//! Logging verbosity is set with `RUST_LOG` (default: `info`).
use std::path::PathBuf;

use structopt::StructOpt;

use redcorpus::cli;
use redcorpus::error::Error;
use redcorpus::filtering::Limits;
use redcorpus::io;
use redcorpus::pipelines::{CorpusOutcome, CorpusSettings, CrossBorder, NonBorder, Pipeline};
use redcorpus::processing::{self, PostFilter};

#[macro_use]
extern crate log;

fn group(g: cli::Group) -> Result<(), Error> {
    let files = io::input_files(&g.input_pattern)?;
    if files.is_empty() {
        warn!("no input files match {}", g.input_pattern);
    }
    info!("read {} files, starting work", files.len());

    let settings = CorpusSettings {
        files,
        target_field: g.target_field,
        limits: Limits::from_lists(
            g.authors.as_deref(),
            g.subreddits.as_deref(),
            g.languages.as_deref(),
        ),
        min_posts: g.min_posts,
        min_chars: g.min_chars,
        dst: g.output_location,
    };

    let outcome = match g.grouping_field {
        Some(grouping_field) => {
            let index_dir = g
                .index_directory_location
                .or_else(dirs_next::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            CrossBorder::new(settings, grouping_field, &index_dir)?.run()?
        }
        None => NonBorder::new(settings).run()?,
    };

    match outcome {
        CorpusOutcome::Stored(dst) => info!("corpus stored in {:?}", dst),
        CorpusOutcome::Empty => info!("no corpus generated"),
    }
    Ok(())
}

fn run(opt: cli::RedCorpus) -> Result<(), Error> {
    match opt {
        cli::RedCorpus::Group(g) => group(g)?,

        cli::RedCorpus::Postfilter(p) => {
            let pf = PostFilter::new(p.min_posts, p.min_chars, p.max_chars);
            let dst = p
                .output_directory
                .unwrap_or_else(|| pf.default_dst(&p.input_directory));
            let summary = pf.run(&p.input_directory, &dst)?;
            println!(
                "dropped {} targets ({} remaining)",
                summary.dropped, summary.remaining
            );
        }

        cli::RedCorpus::Stats(s) => {
            let stats = if s.single {
                processing::single_stats(&s.input_directory)?
            } else {
                processing::corpus_stats(&s.input_directory)?
            };
            println!("{}", serde_json::to_string(&stats)?);
        }

        cli::RedCorpus::DatasetStats(d) => {
            let files = io::input_files(&d.input_pattern)?;
            let stats = processing::dataset_stats::dataset_stats(&files)?;
            processing::dataset_stats::store(&stats, &d.output)?;
            println!("{}", stats.summary());
        }

        cli::RedCorpus::Restructure(r) => {
            processing::restructure(&r.input_directory, &r.output_directory, &r.subreddit)?;
        }
    };
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = cli::RedCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    run(opt).map_err(|e| {
        error!("{}", e);
        e
    })
}

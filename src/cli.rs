//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use crate::record::Field;

#[derive(Debug, StructOpt)]
#[structopt(name = "redcorpus", about = "Reddit comment corpus generation tool.")]
/// Holds every command that is callable by the `redcorpus` command.
pub enum RedCorpus {
    #[structopt(about = "Group comments by target (and grouping) field into a corpus")]
    Group(Group),
    #[structopt(
        about = "Make a stricter version of a generated corpus by re-setting c and m values"
    )]
    Postfilter(Postfilter),
    #[structopt(about = "Statistics of a generated corpus")]
    Stats(Stats),
    #[structopt(about = "Statistics of filtered comment shards")]
    DatasetStats(DatasetStats),
    #[structopt(about = "Convert a corpus built without grouping field to the nested layout")]
    Restructure(Restructure),
}

#[derive(Debug, StructOpt)]
/// Group command and parameters.
///
/// ```sh
/// redcorpus group -i 'filtered/RC_*' -t author -g language -l de,en -m 10 -c 1000
/// ```
///
/// Without `-g`, a flat corpus (one JSON-lines file per target) is built.
pub struct Group {
    #[structopt(short = "i", long = "input-pattern", help = "glob pattern for input files")]
    pub input_pattern: String,
    #[structopt(
        short = "t",
        long = "target-field",
        possible_values = &Field::VARIANTS,
        help = "which field should be used for a target"
    )]
    pub target_field: Field,
    #[structopt(
        short = "g",
        long = "grouping-field",
        possible_values = &Field::VARIANTS,
        help = "which field should be used for grouping the comments?"
    )]
    pub grouping_field: Option<Field>,
    #[structopt(short = "a", long = "authors", help = "which authors to use (comma-separated)")]
    pub authors: Option<String>,
    #[structopt(
        short = "l",
        long = "languages",
        help = "which languages to use (comma-separated)"
    )]
    pub languages: Option<String>,
    #[structopt(
        short = "s",
        long = "subreddits",
        help = "which subreddits to use (comma-separated)"
    )]
    pub subreddits: Option<String>,
    #[structopt(
        short = "m",
        long = "min-posts",
        default_value = "1",
        help = "How many documents must be present in each group per target"
    )]
    pub min_posts: usize,
    #[structopt(
        short = "c",
        long = "min-chars",
        default_value = "1000",
        help = "min. length of remaining documents"
    )]
    pub min_chars: usize,
    #[structopt(
        parse(from_os_str),
        long = "index-directory-location",
        alias = "idx",
        help = "Where to store intermediate index files. Default is the home directory."
    )]
    pub index_directory_location: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output-location",
        default_value = ".",
        help = "Where the corpus directory is created"
    )]
    pub output_location: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Postfilter {
    #[structopt(
        parse(from_os_str),
        short = "i",
        long = "input-directory",
        help = "Input directory"
    )]
    pub input_directory: PathBuf,
    #[structopt(
        short = "m",
        long = "min-posts",
        help = "How many documents must be present in each group per target"
    )]
    pub min_posts: usize,
    #[structopt(short = "c", long = "min-chars", help = "min. length of remaining documents")]
    pub min_chars: usize,
    #[structopt(long = "max-c", help = "Optional upper bound for c")]
    pub max_chars: Option<usize>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output-directory",
        help = "Output directory. If omitted, the directory name will be selected automatically based on the other parameters."
    )]
    pub output_directory: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Stats {
    #[structopt(
        parse(from_os_str),
        short = "i",
        long = "input-directory",
        help = "Input directory"
    )]
    pub input_directory: PathBuf,
    #[structopt(long = "single", help = "corpus has been built without grouping field")]
    pub single: bool,
}

#[derive(Debug, StructOpt)]
pub struct DatasetStats {
    #[structopt(short = "i", long = "input-pattern", help = "glob pattern for input files")]
    pub input_pattern: String,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "Output file")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Restructure {
    #[structopt(
        parse(from_os_str),
        short = "i",
        long = "input-directory",
        help = "Input directory"
    )]
    pub input_directory: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output-directory",
        help = "Output directory"
    )]
    pub output_directory: PathBuf,
    #[structopt(short = "s", long = "subreddit", help = "subreddit used for this corpus")]
    pub subreddit: String,
}

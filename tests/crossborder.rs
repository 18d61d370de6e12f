use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use redcorpus::error::Error;
use redcorpus::filtering::Limits;
use redcorpus::io::{input_files, sorted_entries};
use redcorpus::pipelines::{CorpusOutcome, CorpusSettings, CrossBorder, Pipeline};
use redcorpus::processing::{corpus_stats, PostFilter};
use redcorpus::record::{Field, Record};
use tempfile::tempdir;

const LONG: &str = "a reasonably long comment body";

/// (author, language, body)
fn write_shards(dir: &Path, shards: &[&[(&str, &str, &str)]]) -> Vec<PathBuf> {
    for (idx, records) in shards.iter().enumerate() {
        let mut f = File::create(dir.join(format!("RC_{}.json", idx))).unwrap();
        for (author, language, body) in records.iter() {
            let r = Record::new(author, "AskReddit", language, body);
            writeln!(f, "{}", serde_json::to_string(&r).unwrap()).unwrap();
        }
        // upstream leftovers should not break scans
        writeln!(f, "{{\"author\": ").unwrap();
    }
    input_files(&format!("{}/RC_*.json", dir.display())).unwrap()
}

/// de: {A, B, C}, en: {B, C, D}
fn scenario(dir: &Path) -> Vec<PathBuf> {
    write_shards(
        dir,
        &[
            &[
                ("A", "de", LONG),
                ("B", "de", LONG),
                ("B", "en", LONG),
                ("C", "de", "short"),
            ],
            &[
                ("C", "de", LONG),
                ("C", "en", LONG),
                ("D", "en", LONG),
                ("B", "de", LONG),
            ],
        ],
    )
}

fn settings(files: Vec<PathBuf>, limits: Limits, min_posts: usize, dst: &Path) -> CorpusSettings {
    CorpusSettings {
        files,
        target_field: Field::Author,
        limits,
        min_posts,
        min_chars: 10,
        dst: dst.to_path_buf(),
    }
}

fn names(dir: &Path) -> Vec<String> {
    sorted_entries(dir)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn read(path: &Path) -> Record {
    serde_json::from_reader(File::open(path).unwrap()).unwrap()
}

#[test]
fn two_languages() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = scenario(src.path());

    let limits = Limits::from_lists(None, None, Some("de,en"));
    let cb = CrossBorder::new(settings(files, limits, 1, out.path()), Field::Language, idx.path())
        .unwrap();

    let root = match cb.run().unwrap() {
        CorpusOutcome::Stored(root) => root,
        CorpusOutcome::Empty => panic!("expected a corpus"),
    };

    let name = root.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("author_language_de_en_1_10_"), "{}", name);

    assert_eq!(names(&root), vec!["B", "C"]);
    assert_eq!(names(&root.join("B")), vec!["de", "en"]);
    assert_eq!(names(&root.join("C")), vec!["de", "en"]);

    // B has two german posts, in arrival order, the short C post is gone
    assert_eq!(names(&root.join("B/de")), vec!["000000.json", "000001.json"]);
    assert_eq!(names(&root.join("C/de")), vec!["000000.json"]);
    assert_eq!(read(&root.join("C/de/000000.json")).body, LONG);

    // the index has been cached
    assert!(idx.path().join("author_language.json").is_file());
}

#[test]
fn min_posts_and_coverage() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = scenario(src.path());

    // only B has 2 german posts, but it has a single english one.
    let limits = Limits::from_lists(None, None, Some("de,en"));
    let settings_de_en = settings(files.clone(), limits, 2, out.path());
    let cb = CrossBorder::new(settings_de_en, Field::Language, idx.path()).unwrap();
    assert_eq!(cb.run().unwrap(), CorpusOutcome::Empty);

    // with german only, B is the single target with 2 posts.
    let limits = Limits::from_lists(None, None, Some("de"));
    let cb = CrossBorder::new(settings(files, limits, 2, out.path()), Field::Language, idx.path())
        .unwrap();
    let root = match cb.run().unwrap() {
        CorpusOutcome::Stored(root) => root,
        CorpusOutcome::Empty => panic!("expected a corpus"),
    };
    assert_eq!(names(&root), vec!["B"]);
    assert_eq!(names(&root.join("B")), vec!["de"]);
}

#[test]
fn target_restriction_is_kept() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = scenario(src.path());

    let limits = Limits::from_lists(Some("C,D"), None, Some("de,en"));
    let cb = CrossBorder::new(settings(files, limits, 1, out.path()), Field::Language, idx.path())
        .unwrap();
    let root = match cb.run().unwrap() {
        CorpusOutcome::Stored(root) => root,
        CorpusOutcome::Empty => panic!("expected a corpus"),
    };
    assert_eq!(names(&root), vec!["C"]);
}

#[test]
fn missing_groups() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = scenario(src.path());

    let limits = Limits::from_lists(None, None, Some("de,fr"));
    let cb = CrossBorder::new(settings(files, limits, 1, out.path()), Field::Language, idx.path())
        .unwrap();
    match cb.run() {
        Err(Error::MissingGroups(Field::Language, missing)) => {
            assert_eq!(missing, BTreeSet::from(["fr".to_string()]));
        }
        other => panic!("expected MissingGroups, got {:?}", other),
    }
    // nothing has been written
    assert!(names(out.path()).is_empty());
}

#[test]
fn no_overlap() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = write_shards(src.path(), &[&[("A", "de", LONG), ("B", "en", LONG)]]);

    let limits = Limits::from_lists(None, None, Some("de,en"));
    let cb = CrossBorder::new(settings(files, limits, 1, out.path()), Field::Language, idx.path())
        .unwrap();
    assert_eq!(cb.run().unwrap(), CorpusOutcome::Empty);
    assert!(names(out.path()).is_empty());
}

#[test]
fn many_subreddit_targets() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();

    let path = src.path().join("RC_0.json");
    let mut f = File::create(&path).unwrap();
    for i in 0..30 {
        let subreddit = format!("subreddit_number_{}", i);
        for language in ["de", "en"] {
            let r = Record::new("someone", &subreddit, language, LONG);
            writeln!(f, "{}", serde_json::to_string(&r).unwrap()).unwrap();
        }
    }

    let limits = Limits::from_lists(None, None, Some("de,en"));
    let mut settings = settings(vec![path], limits, 1, out.path());
    settings.target_field = Field::Subreddit;
    let cb = CrossBorder::new(settings, Field::Language, idx.path()).unwrap();
    let root = match cb.run().unwrap() {
        CorpusOutcome::Stored(root) => root,
        CorpusOutcome::Empty => panic!("expected a corpus"),
    };

    let name = root.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("subreddit_language_de_en_1_10_"), "{}", name);
    assert_eq!(names(&root).len(), 30);
    assert_eq!(names(&root.join("subreddit_number_7")), vec!["de", "en"]);
}

#[test]
fn group_then_postfilter_then_stats() {
    let src = tempdir().unwrap();
    let idx = tempdir().unwrap();
    let out = tempdir().unwrap();
    let files = scenario(src.path());

    let limits = Limits::from_lists(None, None, Some("de,en"));
    let cb = CrossBorder::new(settings(files, limits, 1, out.path()), Field::Language, idx.path())
        .unwrap();
    let root = match cb.run().unwrap() {
        CorpusOutcome::Stored(root) => root,
        CorpusOutcome::Empty => panic!("expected a corpus"),
    };

    let stats = corpus_stats(&root).unwrap();
    assert_eq!(stats.targets, 2);
    // de: B=2, C=1; en: B=1, C=1
    assert!((stats.avg_docs - 1.25).abs() < 1e-9);
    assert!((stats.avg_doc_length - LONG.chars().count() as f64).abs() < 1e-9);

    let pf = PostFilter::new(2, 10, None);
    let summary = pf.run(&root, &pf.default_dst(&root)).unwrap();
    assert_eq!(summary.remaining, 0);
    assert_eq!(summary.dropped, 2);
}

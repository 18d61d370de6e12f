//! Error enum
use std::collections::BTreeSet;
use std::fmt;

use crate::record::Field;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    /// Target and grouping fields are the same.
    SameFields(Field),
    /// Requested grouping values that never occur in the index.
    MissingGroups(Field, BTreeSet<String>),
    UnknownField(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {}", e),
            Error::SameFields(field) => write!(
                f,
                "target and grouping fields must differ (both are {})",
                field
            ),
            Error::MissingGroups(field, missing) => write!(
                f,
                "the requested {} values {:?} are not in the index",
                field, missing
            ),
            Error::UnknownField(s) => write!(
                f,
                "unknown field {:?} (expected one of author, subreddit, language)",
                s
            ),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

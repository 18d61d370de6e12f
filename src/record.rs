/*! Comment records

A [Record] is one cleaned Reddit comment, as produced by the upstream filtering stage.
Only `author`, `subreddit`, `language` and `body` are interpreted, other keys are kept untouched
so that written corpus files hold the whole input object.
!*/
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Record fields that can be used as a target or a grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Author,
    Subreddit,
    Language,
}

impl Field {
    /// Accepted command line values.
    pub const VARIANTS: [&'static str; 3] = ["subreddit", "author", "language"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::Subreddit => "subreddit",
            Field::Language => "language",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(Field::Author),
            "subreddit" => Ok(Field::Subreddit),
            "language" => Ok(Field::Language),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub author: String,
    pub subreddit: String,
    pub language: String,
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(author: &str, subreddit: &str, language: &str, body: &str) -> Self {
        Self {
            author: author.to_string(),
            subreddit: subreddit.to_string(),
            language: language.to_string(),
            body: body.to_string(),
            extra: Map::new(),
        }
    }

    /// Get the value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Author => &self.author,
            Field::Subreddit => &self.subreddit,
            Field::Language => &self.language,
        }
    }

    /// Body length in characters (unicode scalar values).
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}

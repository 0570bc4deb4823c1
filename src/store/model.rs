//! Catalog record types
//!
//! These are the values returned by catalog operations and serialized
//! verbatim as HTTP response bodies.

use std::fmt;
use std::str::FromStr;

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

/// A joke with its aggregate vote counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: i64,
    pub text: String,
    pub likes: i64,
    pub dislikes: i64,
}

impl Joke {
    /// Column list matching [`Joke::from_row`]
    pub(crate) const COLUMNS: &'static str =
        "jokes.id, jokes.text, jokes.likes, jokes.dislikes";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            likes: row.get(2)?,
            dislikes: row.get(3)?,
        })
    }
}

/// A named, unique grouping of jokes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// A joke freshly created inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedJoke {
    pub id: i64,
    pub text: String,
    pub category: String,
}

/// A joke-to-category association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeLink {
    pub joke_id: i64,
    pub category: String,
}

/// Vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

impl VoteType {
    /// Value stored in `votes.type`
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Like => "like",
            VoteType::Dislike => "dislike",
        }
    }

    /// Counter column on `jokes` that this vote increments
    pub(crate) fn counter_column(&self) -> &'static str {
        match self {
            VoteType::Like => "likes",
            VoteType::Dislike => "dislikes",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(VoteType::Like),
            "dislike" => Ok(VoteType::Dislike),
            _ => Err(CatalogError::Validation(
                r#"Invalid vote type. Must be either "like" or "dislike""#.to_string(),
            )),
        }
    }
}

/// Acknowledgement returned after a vote is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub message: String,
}

impl VoteReceipt {
    pub(crate) fn new(joke_id: i64, vote: VoteType) -> Self {
        Self {
            message: format!("Successfully voted {} for joke {}", vote, joke_id),
        }
    }
}

/// Vote counts derived from the vote log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub joke_id: i64,
    pub likes: i64,
    pub dislikes: i64,
}

//! Article record type
//!
//! Articles arrive as JSON arrays of records, one array per file. The
//! record is consumed as given: no schema validation beyond field presence.
//! Required string fields that are missing or null deserialize to `""` and
//! flow into the frequency maps and tallies as literal keys; `text` and
//! `categories` are genuinely optional and are treated as absent when
//! missing or null.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// A single article record, immutable once parsed
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    /// Globally unique identifier (expected, not enforced)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uuid: String,

    /// Article title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Author name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,

    /// Language name, lowercase (e.g. "english")
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,

    /// Publication timestamp, lexicographically sortable
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,

    /// Category labels; repeats within one article are insignificant
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Full article text, absent for some records
    #[serde(default)]
    pub text: Option<String>,

    /// Source URL
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Article {
    /// True if the article language is English (exact lowercase match)
    pub fn is_english(&self) -> bool {
        self.language == "english"
    }

    /// Category labels with per-article repeats collapsed
    pub fn unique_categories(&self) -> HashSet<&str> {
        self.categories
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Deserialize a string field treating JSON null like a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

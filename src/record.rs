//! Tweet record normalization
//!
//! Decodes one line of the raw Twitter JSON stream into the timestamped set
//! of distinct hashtags the windowed graph consumes, or a typed rejection
//! saying why the line cannot drive a graph update. Rejections are values,
//! never panics; the graph only ever sees validated records.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde::Deserialize;
use thiserror::Error;

/// Fixed `created_at` format of the Twitter streaming API
/// (e.g. `Thu Oct 29 17:51:01 +0000 2015`).
pub const TIME_FMT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Why a line produced no graph update.
///
/// The first two variants are structural failures, the last two are
/// semantic: well-formed input that is not a usable tweet. The driver keys
/// its emission policy off this distinction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The line is not well-formed JSON (or not a well-formed record).
    #[error("unparsable: {0}")]
    MalformedJson(String),
    /// Well-formed JSON without a `created_at` field, e.g. a limit message.
    #[error("not a tweet")]
    NotATweet,
    /// `created_at` is present but not in the fixed Twitter format.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// A valid tweet with fewer than two distinct hashtags.
    #[error("insufficient hashtags")]
    InsufficientHashtags,
}

impl Rejection {
    /// Structural failures get no output line; semantic rejections still
    /// emit the current statistic.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Rejection::MalformedJson(_) | Rejection::InvalidTimestamp(_)
        )
    }
}

/// A validated tweet reduced to what the graph needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    /// Creation time as Unix seconds.
    pub timestamp: i64,
    /// Distinct hashtag texts, sorted, case-sensitive.
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    created_at: Option<String>,
    entities: Option<RawEntities>,
}

#[derive(Debug, Deserialize)]
struct RawEntities {
    #[serde(default)]
    hashtags: Vec<RawHashtag>,
}

#[derive(Debug, Deserialize)]
struct RawHashtag {
    text: String,
}

/// Normalize one line of the raw stream.
///
/// Accepts only records that parse as JSON, carry a `created_at` in the
/// fixed format, and name at least two distinct hashtags under
/// `entities.hashtags[].text`. Duplicate hashtags are collapsed before the
/// two-tag check so they can never fabricate an edge.
pub fn normalize(line: &str) -> Result<TweetRecord, Rejection> {
    let raw: RawTweet =
        serde_json::from_str(line).map_err(|err| Rejection::MalformedJson(err.to_string()))?;

    let created_at = raw.created_at.ok_or(Rejection::NotATweet)?;
    let timestamp = parse_created_at(&created_at)?;

    let distinct: BTreeSet<String> = raw
        .entities
        .map(|entities| entities.hashtags)
        .unwrap_or_default()
        .into_iter()
        .map(|hashtag| hashtag.text)
        .collect();

    if distinct.len() < 2 {
        return Err(Rejection::InsufficientHashtags);
    }

    Ok(TweetRecord {
        timestamp,
        tags: distinct.into_iter().collect(),
    })
}

/// Parse a `created_at` value to Unix seconds.
pub fn parse_created_at(text: &str) -> Result<i64, Rejection> {
    DateTime::parse_from_str(text, TIME_FMT)
        .map(|datetime| datetime.timestamp())
        .map_err(|_| Rejection::InvalidTimestamp(text.to_string()))
}

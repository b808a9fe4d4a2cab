//! The match record and its insert form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::MatchStatus;

/// A match as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Identifier assigned by the store.
    pub id: i64,
    /// When the match starts.
    pub start_time: DateTime<Utc>,
    /// When the match ends.
    pub end_time: DateTime<Utc>,
    /// Home side score.
    pub home_score: u32,
    /// Away side score.
    pub away_score: u32,
    /// Status derived when the match was created. Not refreshed on read.
    pub status: MatchStatus,
    /// When the store inserted the row.
    pub created_at: DateTime<Utc>,
}

/// Fields of a match about to be inserted.
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
}

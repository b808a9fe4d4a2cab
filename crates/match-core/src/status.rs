//! Match lifecycle status and its derivation from the match window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// The match has not started yet.
    Scheduled,
    /// The match is in progress.
    Live,
    /// The match is over.
    Finished,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid match status: '{0}'")]
pub struct ParseStatusError(pub String);

impl MatchStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [MatchStatus; 3] = [Self::Scheduled, Self::Live, Self::Finished];

    /// Returns the lowercase name used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "live" => Ok(Self::Live),
            "finished" => Ok(Self::Finished),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Derives the status of the window `[start, end)` at instant `now`.
///
/// The start is inclusive and the end exclusive, so a zero-length window is
/// never live: it is scheduled before `start` and finished from then on.
pub fn derive_status(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> MatchStatus {
    if now < start {
        MatchStatus::Scheduled
    } else if now < end {
        MatchStatus::Live
    } else {
        MatchStatus::Finished
    }
}

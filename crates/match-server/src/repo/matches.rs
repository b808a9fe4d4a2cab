//! SQLite-backed match repository.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use match_core::{Match, MatchStatus, NewMatch};
use rusqlite::types::Type;
use rusqlite::Row;

use super::{MatchRepository, RepoError};
use crate::db::DbPool;

const MATCH_COLUMNS: &str =
    "id, start_time, end_time, home_score, away_score, status, created_at";

/// Repository for match database operations.
///
/// The blocking methods run on the caller's thread; the [`MatchRepository`]
/// impl moves them onto tokio's blocking pool.
#[derive(Clone)]
pub struct MatchRepo {
    db: DbPool,
}

impl MatchRepo {
    /// Create a new match repository with the given database pool.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// List up to `limit` matches, most recently created first.
    ///
    /// Rows created in the same millisecond are ordered by descending id.
    pub fn list(&self, limit: u32) -> Result<Vec<Match>, RepoError> {
        let conn = self.db.lock().map_err(|_| RepoError::Poisoned)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches
             ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;

        let matches = stmt
            .query_map([limit], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(matches)
    }

    /// Insert a match and return the stored row.
    pub fn create(&self, new_match: &NewMatch) -> Result<Match, RepoError> {
        let conn = self.db.lock().map_err(|_| RepoError::Poisoned)?;

        let created = conn.query_row(
            &format!(
                "INSERT INTO matches (start_time, end_time, home_score, away_score, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {MATCH_COLUMNS}"
            ),
            (
                to_sql_timestamp(new_match.start_time),
                to_sql_timestamp(new_match.end_time),
                new_match.home_score,
                new_match.away_score,
                new_match.status.as_str(),
            ),
            Self::map_row,
        )?;

        Ok(created)
    }

    fn map_row(row: &Row) -> rusqlite::Result<Match> {
        Ok(Match {
            id: row.get(0)?,
            start_time: timestamp(row, 1)?,
            end_time: timestamp(row, 2)?,
            home_score: row.get(3)?,
            away_score: row.get(4)?,
            status: status(row, 5)?,
            created_at: timestamp(row, 6)?,
        })
    }
}

#[async_trait]
impl MatchRepository for MatchRepo {
    async fn list_matches(&self, limit: u32) -> Result<Vec<Match>, RepoError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.list(limit)).await?
    }

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, RepoError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.create(&new_match)).await?
    }
}

/// Fixed-width RFC 3339 in UTC with all nine fractional digits, so stored
/// instants keep full precision and still sort as text.
fn to_sql_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn status(row: &Row, idx: usize) -> rusqlite::Result<MatchStatus> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

//! Repository layer for match storage.
//!
//! Handlers only see the [`MatchRepository`] trait, so any store (SQLite here,
//! or a test double) can sit behind the two operations the API needs.

pub mod matches;

use async_trait::async_trait;
use match_core::{Match, NewMatch};
use thiserror::Error;

pub use matches::MatchRepo;

/// Any failure of the underlying store.
///
/// Callers treat every variant the same way; the distinction only matters for
/// server-side logs.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,

    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Store operations over the `matches` table.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Returns at most `limit` matches, newest `created_at` first.
    async fn list_matches(&self, limit: u32) -> Result<Vec<Match>, RepoError>;

    /// Inserts a match and returns the row as stored, including the
    /// store-assigned `id` and `created_at`.
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, RepoError>;
}

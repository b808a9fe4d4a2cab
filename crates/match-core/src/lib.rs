//! Core types for matches.
//!
//! This crate provides the framework-agnostic pieces of the matches service:
//! - [`Match`] and [`NewMatch`] for the persisted record and its insert form
//! - [`MatchStatus`] and [`derive_status`] for the lifecycle phase of a match
//! - Request schemas for listing and creating matches, reporting structured
//!   [`Issue`]s instead of failing fast

mod model;
mod status;
mod validation;

pub use model::{Match, NewMatch};
pub use status::{derive_status, MatchStatus, ParseStatusError};
pub use validation::{
    CreateMatchPayload, Issue, ListMatchesParams, ListMatchesQuery, ValidationIssues,
    DEFAULT_LIMIT, MAX_LIMIT,
};

//! API handlers for the matches server.

pub mod error;
pub mod matches;

use serde::Serialize;

pub use error::ApiError;

/// Envelope for successful responses: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

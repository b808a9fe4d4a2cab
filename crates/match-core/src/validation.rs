//! Request schemas for listing and creating matches.
//!
//! Parsing never panics or short-circuits on the first problem: every schema
//! returns either the typed value or a [`ValidationIssues`] listing each field
//! that failed, with a path and a human readable message.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationErrors};

use crate::model::NewMatch;
use crate::status::derive_status;

/// Limit applied when the caller does not provide one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Hard ceiling on the number of matches a single list request may return.
pub const MAX_LIMIT: u32 = 100;

/// A single problem found while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Machine readable issue kind (e.g. `invalid_type`, `too_small`).
    pub code: String,
    /// Path of the offending field; empty for problems with the whole input.
    pub path: Vec<String>,
    /// Human readable description.
    pub message: String,
}

impl Issue {
    pub fn new(code: impl Into<String>, field: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    /// An issue with the input as a whole, such as a body that is not JSON.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_type".to_string(),
            path: Vec::new(),
            message: message.into(),
        }
    }
}

/// Every issue found while validating one request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationIssues(Vec<Issue>);

impl ValidationIssues {
    pub fn single(issue: Issue) -> Self {
        Self(vec![issue])
    }

    pub fn issues(&self) -> &[Issue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|issue| {
                if issue.path.is_empty() {
                    issue.message.clone()
                } else {
                    format!("{}: {}", issue.path.join("."), issue.message)
                }
            })
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationIssues {}

/// Raw query parameters of `GET /matches`, exactly as received.
#[derive(Debug, Default, Deserialize)]
pub struct ListMatchesParams {
    pub limit: Option<String>,
}

/// Validated query of `GET /matches`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListMatchesQuery {
    /// Requested positive limit, before clamping.
    pub limit: Option<u32>,
}

impl ListMatchesParams {
    /// Checks that `limit`, when present, is a positive integer.
    pub fn parse(self) -> Result<ListMatchesQuery, ValidationIssues> {
        let Some(raw) = self.limit else {
            return Ok(ListMatchesQuery { limit: None });
        };

        let value: f64 = match raw.trim().parse() {
            Ok(v) if f64::is_finite(v) => v,
            _ => {
                return Err(ValidationIssues::single(Issue::new(
                    "invalid_type",
                    "limit",
                    format!("Expected number, received '{}'", raw),
                )))
            }
        };

        if value.fract() != 0.0 {
            return Err(ValidationIssues::single(Issue::new(
                "invalid_type",
                "limit",
                "Expected integer, received float",
            )));
        }
        if value <= 0.0 {
            return Err(ValidationIssues::single(Issue::new(
                "too_small",
                "limit",
                "Number must be greater than 0",
            )));
        }

        // Float to int casts saturate, and anything that large is clamped anyway.
        Ok(ListMatchesQuery {
            limit: Some(value as u32),
        })
    }
}

impl ListMatchesQuery {
    /// The number of rows to request from the store: the requested limit or
    /// [`DEFAULT_LIMIT`], never more than [`MAX_LIMIT`].
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

/// JSON body of `POST /matches`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMatchPayload {
    #[validate(required(message = "Required"))]
    pub start_time: Option<String>,

    #[validate(required(message = "Required"))]
    pub end_time: Option<String>,

    #[validate(range(min = 0, message = "Number must be greater than or equal to 0"))]
    pub home_score: Option<i64>,

    #[validate(range(min = 0, message = "Number must be greater than or equal to 0"))]
    pub away_score: Option<i64>,
}

impl CreateMatchPayload {
    /// Validates the payload and normalizes it into an insert, deriving the
    /// status at `now` from the parsed instants.
    pub fn parse(self, now: DateTime<Utc>) -> Result<NewMatch, ValidationIssues> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_issues(&errors),
        };

        let start_time = self
            .start_time
            .as_deref()
            .and_then(|raw| parse_instant(raw, "startTime", &mut issues));
        let end_time = self
            .end_time
            .as_deref()
            .and_then(|raw| parse_instant(raw, "endTime", &mut issues));

        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end < start {
                issues.push(Issue::new(
                    "custom",
                    "endTime",
                    "endTime must not be before startTime",
                ));
            }
        }

        let home_score = score(self.home_score, "homeScore", &mut issues);
        let away_score = score(self.away_score, "awayScore", &mut issues);

        match (start_time, end_time) {
            (Some(start_time), Some(end_time)) if issues.is_empty() => Ok(NewMatch {
                start_time,
                end_time,
                home_score,
                away_score,
                status: derive_status(start_time, end_time, now),
            }),
            _ => Err(ValidationIssues(issues)),
        }
    }
}

/// Parses an RFC 3339 instant and normalizes it to UTC.
///
/// The UTC year must stay within 0000..=9999: an offset can push a valid
/// local time past either end, and RFC 3339 has no form for the result.
fn parse_instant(raw: &str, field: &str, issues: &mut Vec<Issue>) -> Option<DateTime<Utc>> {
    let parsed = match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            issues.push(Issue::new("invalid_string", field, "Invalid datetime"));
            return None;
        }
    };

    if !(0..=9999).contains(&parsed.year()) {
        issues.push(Issue::new(
            "invalid_string",
            field,
            "Datetime must fall within years 0000 to 9999 in UTC",
        ));
        return None;
    }

    Some(parsed)
}

fn score(value: Option<i64>, field: &str, issues: &mut Vec<Issue>) -> u32 {
    match value {
        None => 0,
        // Negative values were already reported by the range rule.
        Some(v) if v < 0 => 0,
        Some(v) => u32::try_from(v).unwrap_or_else(|_| {
            issues.push(Issue::new(
                "too_big",
                field,
                format!("Number must be less than or equal to {}", u32::MAX),
            ));
            0
        }),
    }
}

fn field_issues(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues: Vec<Issue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let path = camel_case(&field);
            errs.iter().map(move |err| Issue {
                code: err.code.to_string(),
                path: vec![path.clone()],
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

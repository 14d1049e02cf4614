//! Event report submissions
//!
//! Validation and normalization for the posts store. Every stored post has
//! numeric coordinates, a non-empty trimmed event description, an author
//! (defaulted to the anonymous placeholder), and an ISO-8601 timestamp
//! (defaulted to receipt time).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Author recorded when a submission does not name one
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Submission validation errors
///
/// All variants surface to clients as the same generic invalid-payload
/// response; the variants exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("field `{0}` must be a number")]
    NonNumericCoordinate(&'static str),

    #[error("field `event` must be a non-empty string")]
    MissingEvent,
}

/// A stored event report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub lat: f64,
    pub lng: f64,
    pub event: String,
    pub author: String,
    pub timestamp: String,
}

impl Post {
    /// Validate and normalize a raw submission body.
    ///
    /// `lat` and `lng` must be JSON numbers (integers accepted) and
    /// `event` a string that is non-empty after trimming. `author` is
    /// trimmed and defaults to [`ANONYMOUS_AUTHOR`] when absent or empty;
    /// `timestamp` defaults to `received_at` in RFC 3339 and is otherwise
    /// passed through without parsing.
    pub fn from_submission(body: &Value, received_at: DateTime<Utc>) -> Result<Self, SubmissionError> {
        let lat = body
            .get("lat")
            .and_then(Value::as_f64)
            .ok_or(SubmissionError::NonNumericCoordinate("lat"))?;
        let lng = body
            .get("lng")
            .and_then(Value::as_f64)
            .ok_or(SubmissionError::NonNumericCoordinate("lng"))?;

        // Trim before the emptiness check so whitespace-only events are rejected
        let event = body
            .get("event")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|event| !event.is_empty())
            .ok_or(SubmissionError::MissingEvent)?;

        let author = body
            .get("author")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR);

        let timestamp = body
            .get("timestamp")
            .and_then(Value::as_str)
            .filter(|timestamp| !timestamp.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| received_at.to_rfc3339());

        Ok(Self {
            lat,
            lng,
            event: event.to_string(),
            author: author.to_string(),
            timestamp,
        })
    }
}

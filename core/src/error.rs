//! Error types for the news feed pipeline.
//!
//! # Design
//! One enum covers every stage: URL handling, transport, HTTP status, and
//! body decoding. `HttpStatus` carries only the code because non-200 bodies
//! are never read. `EmptyBody` is kept apart from `MalformedResponse` so the
//! parser can report "no result" without pretending the JSON was broken.

use thiserror::Error;

/// Errors produced while building, fetching, or parsing a search request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request URL (or the configured base URL) could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connect, read, or stream failure, including timeouts.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with something other than 200.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The body is not JSON, or lacks `response`, `results`, or a required
    /// entry field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The server returned 200 with nothing in the body.
    #[error("empty response body")]
    EmptyBody,
}

impl ApiError {
    /// Short name of the pipeline stage that produced this error, used as a
    /// structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "build",
            ApiError::Network(_) | ApiError::HttpStatus(_) => "fetch",
            ApiError::MalformedResponse(_) | ApiError::EmptyBody => "parse",
        }
    }
}

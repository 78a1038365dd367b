//! Errors surfaced by the binding layer.
//!
//! Document content never produces one of these: the converter degrades to
//! a best-effort render instead. Only host-facing plumbing can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsisHtmlError {
    #[error("invalid UTF-8 in OSIS input: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid converter options: {0}")]
    Options(#[source] serde_json::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[source] serde_json::Error),
}

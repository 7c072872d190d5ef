//! Typed error hierarchy for the CodeRefine client.
//!
//! Three enums cover the three failure surfaces:
//! - `ApiError`: review/translate transport and server failures
//! - `DocumentError`: local file ingestion failures
//! - `WorkflowError`: actions rejected by the workflow controller
//!
//! None of these are shown to the user verbatim. The workflow collapses them
//! into a [`UserError`] (or a placeholder string for translations) and logs
//! the underlying cause.

use thiserror::Error;

/// Errors from the remote review/translate service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status. `message` is already in its display form
    /// (`detail` from the body, `Server Error: <status>`, or `Translation failed: <reason>`).
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Used by test doubles and anything else that fails without an HTTP round trip.
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from loading a source file into the document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read source file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Request channels that refuse a second request while one is pending.
/// Translations are not gated: a new selection supersedes the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Review,
    FileRead,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Review => write!(f, "review"),
            Channel::FileRead => write!(f, "file read"),
        }
    }
}

/// Actions the workflow refused to start.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("A {0} request is already in flight")]
    Busy(Channel),
}

/// The single user-facing message slot in the workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// Input rejected before any request was sent.
    Validation(String),
    /// The review call failed. The message is generic; the cause only goes to the log.
    Backend(String),
}

impl UserError {
    pub fn message(&self) -> &str {
        match self {
            UserError::Validation(msg) | UserError::Backend(msg) => msg,
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

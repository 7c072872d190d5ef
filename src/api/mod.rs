//! External interface to the CodeRefine analysis service.
//!
//! Two request/response operations, both behind [`CodeRefineApi`] so the
//! workflow can run against the real backend ([`HttpApi`]) or a canned one
//! ([`ScriptedApi`]).
//!
//! ```
//! use coderefine::api::ScriptedApi;
//!
//! let api = ScriptedApi::new();
//! assert!(api.review_calls().is_empty());
//! ```

pub mod http;
pub mod scripted;
pub mod types;

use async_trait::async_trait;

use crate::errors::ApiError;

pub use http::HttpApi;
pub use scripted::ScriptedApi;
pub use types::{ReviewRequest, ReviewResult, TranslateRequest, TranslateResponse};

/// Target languages offered in the language picker. Any other name is
/// passed through to the backend unchanged.
pub const SUGGESTED_LANGUAGES: &[&str] = &["Java", "Go", "Python", "Rust", "C++"];

/// Abstraction over the remote service.
/// Real implementation: `HttpApi`. Test double: `ScriptedApi`.
#[async_trait]
pub trait CodeRefineApi: Send + Sync {
    /// Score and analyze `request.code`.
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ApiError>;

    /// Translate `request.code` into `request.target_language`.
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ApiError>;
}

//! Wire types for the review and translate endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
}

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub code: String,
    /// Free-form display name, e.g. `"Go"` or `"C++"`.
    pub target_language: String,
}

/// Successful `POST /translate` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_code: String,
}

/// Successful `POST /review` response.
///
/// Immutable once received; a new review replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Quality score of the submitted code, 0–100.
    pub original_score: i64,
    /// Quality score of the optimized code, 0–100.
    pub refined_score: i64,
    pub original_time_complexity: String,
    pub time_complexity: String,
    pub original_space_complexity: String,
    pub space_complexity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<String>,
    pub optimized_code: String,
    pub explanation: String,
    /// Free-text performance notes. Older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

/// Error body FastAPI-style backends return on non-success status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Render `detail` as a message. Strings pass through; structured
    /// details (validation error lists) are rendered as compact JSON.
    pub(crate) fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

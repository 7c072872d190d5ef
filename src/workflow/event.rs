//! Events that drive the workflow.
//!
//! User actions (edit, load file, submit, pick a language) and the
//! completions of the work those actions started. They are the only inputs
//! to [`super::transition::transition`].

use std::path::PathBuf;

use crate::api::ReviewResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // =========================================================================
    // User actions
    // =========================================================================
    /// The user typed or pasted new document text.
    Edited(String),

    /// The user picked a local file to load into the document.
    FileReadRequested(PathBuf),

    /// The user pressed "Refine Code".
    SubmitReview,

    /// The user picked a target language. An empty string deselects.
    LanguageSelected(String),

    // =========================================================================
    // Completions
    // =========================================================================
    FileReadCompleted { path: PathBuf, text: String },

    FileReadFailed { path: PathBuf, reason: String },

    ReviewSucceeded(ReviewResult),

    /// `reason` is the underlying cause; it is logged, never displayed.
    ReviewFailed { reason: String },

    TranslationSucceeded {
        generation: u64,
        translated_code: String,
    },

    TranslationFailed { generation: u64, reason: String },
}

impl Event {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Edited(_) => "edited",
            Event::FileReadRequested(_) => "file_read_requested",
            Event::SubmitReview => "submit_review",
            Event::LanguageSelected(_) => "language_selected",
            Event::FileReadCompleted { .. } => "file_read_completed",
            Event::FileReadFailed { .. } => "file_read_failed",
            Event::ReviewSucceeded(_) => "review_succeeded",
            Event::ReviewFailed { .. } => "review_failed",
            Event::TranslationSucceeded { .. } => "translation_succeeded",
            Event::TranslationFailed { .. } => "translation_failed",
        }
    }
}

//! Workflow state: the single view model every orchestrator action updates.

use serde::{Deserialize, Serialize};

use crate::api::ReviewResult;
use crate::document::SourceDocument;
use crate::errors::UserError;

/// Shown when the user submits an empty or whitespace-only document.
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide code input.";
/// Shown for every review failure; the cause is only logged.
pub const BACKEND_FAILURE_MESSAGE: &str = "Communication Failure: Backend is unreachable.";
/// Stored in place of translated code when the translate call fails.
pub const TRANSLATION_ERROR_PLACEHOLDER: &str = "// Error occurred during translation.";
/// Shown in the translated-code pane before any language is chosen.
pub const TRANSLATION_PROMPT: &str = "// Select a target language above";

/// Coarse phase of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    ReadingFile,
    Analyzing,
    Reviewed,
    Translating,
    TranslatedReady,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::ReadingFile => "reading file",
            Stage::Analyzing => "analyzing",
            Stage::Reviewed => "reviewed",
            Stage::Translating => "translating",
            Stage::TranslatedReady => "translated",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Optimized code rendered in another language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub target_language: String,
    pub translated_code: String,
}

/// An issued translate request that has not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    pub generation: u64,
    pub target_language: String,
}

/// Outstanding work per request channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InFlight {
    pub review: bool,
    pub translate: Option<PendingTranslation>,
    pub file_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowState {
    pub stage: Stage,
    pub document: SourceDocument,
    pub review: Option<ReviewResult>,
    pub translation: Option<TranslationResult>,
    pub selected_language: Option<String>,
    pub last_error: Option<UserError>,
    pub in_flight: InFlight,
    /// Bumped whenever earlier translate responses become stale.
    pub translate_generation: u64,
}

impl WorkflowState {
    pub fn new(document: SourceDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The stage implied by what is pending and what results are held.
    /// Used to return from `ReadingFile` and from no-op translations.
    pub fn resting_stage(&self) -> Stage {
        if self.in_flight.review {
            Stage::Analyzing
        } else if self.in_flight.translate.is_some() {
            Stage::Translating
        } else if self.translation.is_some() {
            Stage::TranslatedReady
        } else if self.review.is_some() {
            Stage::Reviewed
        } else if matches!(self.last_error, Some(UserError::Backend(_))) {
            Stage::Failed
        } else {
            Stage::Idle
        }
    }

    /// Text for the translated-code pane.
    pub fn translated_code_display(&self) -> &str {
        self.translation
            .as_ref()
            .map(|t| t.translated_code.as_str())
            .unwrap_or(TRANSLATION_PROMPT)
    }
}

//! Pure state transition function.
//!
//! Takes the current state and an event, returns the next state plus the
//! effects to execute. No I/O happens here, so every rule of the review and
//! translation flows is testable without a runtime.

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::state::{
    BACKEND_FAILURE_MESSAGE, EMPTY_INPUT_MESSAGE, PendingTranslation, Stage,
    TRANSLATION_ERROR_PLACEHOLDER, TranslationResult, WorkflowState,
};
use crate::api::{ReviewRequest, TranslateRequest};
use crate::cues::derive_cues;
use crate::document::SourceDocument;
use crate::errors::{Channel, UserError, WorkflowError};

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub state: WorkflowState,
    pub effects: Vec<Effect>,
    /// Set when the event was refused; `state` is then unchanged.
    pub rejected: Option<WorkflowError>,
}

impl TransitionResult {
    pub fn new(state: WorkflowState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            rejected: None,
        }
    }

    pub fn no_change(state: WorkflowState) -> Self {
        Self::new(state, vec![])
    }

    pub fn rejected(state: WorkflowState, error: WorkflowError) -> Self {
        Self {
            state,
            effects: vec![],
            rejected: Some(error),
        }
    }
}

/// Apply `event` to `state`.
pub fn transition(state: WorkflowState, event: Event) -> TransitionResult {
    match event {
        Event::Edited(text) => on_edited(state, text),
        Event::FileReadRequested(path) => on_file_read_requested(state, path),
        Event::FileReadCompleted { path, text } => on_file_read_completed(state, path, text),
        Event::FileReadFailed { path, reason } => on_file_read_failed(state, path, reason),
        Event::SubmitReview => on_submit_review(state),
        Event::ReviewSucceeded(result) => on_review_succeeded(state, result),
        Event::ReviewFailed { reason } => on_review_failed(state, reason),
        Event::LanguageSelected(selection) => on_language_selected(state, selection),
        Event::TranslationSucceeded {
            generation,
            translated_code,
        } => on_translation_resolved(state, generation, Ok(translated_code)),
        Event::TranslationFailed { generation, reason } => {
            on_translation_resolved(state, generation, Err(reason))
        }
    }
}

// =============================================================================
// Document
// =============================================================================

fn on_edited(mut state: WorkflowState, text: String) -> TransitionResult {
    // The editor is locked while a review is analyzing.
    if state.in_flight.review {
        return TransitionResult::rejected(state, WorkflowError::Busy(Channel::Review));
    }
    state.document = SourceDocument::typed(text);
    TransitionResult::no_change(state)
}

fn on_file_read_requested(mut state: WorkflowState, path: std::path::PathBuf) -> TransitionResult {
    if state.in_flight.file_read {
        return TransitionResult::rejected(state, WorkflowError::Busy(Channel::FileRead));
    }
    if state.in_flight.review {
        return TransitionResult::rejected(state, WorkflowError::Busy(Channel::Review));
    }
    state.in_flight.file_read = true;
    state.stage = Stage::ReadingFile;
    TransitionResult::new(state, vec![Effect::ReadFile(path)])
}

fn on_file_read_completed(
    mut state: WorkflowState,
    path: std::path::PathBuf,
    text: String,
) -> TransitionResult {
    if !state.in_flight.file_read {
        return TransitionResult::new(
            state,
            vec![Effect::log(
                LogLevel::Debug,
                format!("Ignoring unexpected file read of {}", path.display()),
            )],
        );
    }
    state.in_flight.file_read = false;
    let bytes = text.len();
    state.document = SourceDocument::from_file(path.clone(), text);
    state.stage = state.resting_stage();
    TransitionResult::new(
        state,
        vec![Effect::log(
            LogLevel::Info,
            format!("Loaded {} ({} bytes)", path.display(), bytes),
        )],
    )
}

fn on_file_read_failed(
    mut state: WorkflowState,
    path: std::path::PathBuf,
    reason: String,
) -> TransitionResult {
    if !state.in_flight.file_read {
        return TransitionResult::no_change(state);
    }
    // The document is left as it was and nothing is shown to the user.
    state.in_flight.file_read = false;
    state.stage = state.resting_stage();
    TransitionResult::new(
        state,
        vec![Effect::log(
            LogLevel::Warn,
            format!("Failed to read {}: {}", path.display(), reason),
        )],
    )
}

// =============================================================================
// Review
// =============================================================================

fn on_submit_review(mut state: WorkflowState) -> TransitionResult {
    if state.in_flight.review {
        return TransitionResult::rejected(state, WorkflowError::Busy(Channel::Review));
    }
    if state.in_flight.file_read {
        return TransitionResult::rejected(state, WorkflowError::Busy(Channel::FileRead));
    }
    if state.document.is_blank() {
        state.last_error = Some(UserError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        return TransitionResult::no_change(state);
    }

    state.stage = Stage::Analyzing;
    state.last_error = None;
    state.review = None;
    state.translation = None;
    state.selected_language = None;
    state.in_flight.review = true;
    // Any translation still in flight belongs to the old review.
    state.in_flight.translate = None;
    state.translate_generation += 1;

    let request = ReviewRequest {
        code: state.document.text.clone(),
    };
    TransitionResult::new(
        state,
        vec![
            Effect::AnimateScores {
                original: 0,
                refined: 0,
            },
            Effect::CallReview(request),
        ],
    )
}

fn on_review_succeeded(
    mut state: WorkflowState,
    result: crate::api::ReviewResult,
) -> TransitionResult {
    if !state.in_flight.review {
        return TransitionResult::new(
            state,
            vec![Effect::log(
                LogLevel::Debug,
                "Ignoring review response with no review in flight",
            )],
        );
    }
    state.in_flight.review = false;
    state.translation = None;
    state.selected_language = None;
    state.in_flight.translate = None;
    state.translate_generation += 1;
    state.stage = Stage::Reviewed;

    let mut effects = vec![
        Effect::log(
            LogLevel::Info,
            format!(
                "Review complete: score {} -> {}",
                result.original_score, result.refined_score
            ),
        ),
        Effect::AnimateScores {
            original: result.original_score,
            refined: result.refined_score,
        },
    ];
    effects.extend(derive_cues(&result).into_iter().map(Effect::FireCue));

    state.review = Some(result);
    TransitionResult::new(state, effects)
}

fn on_review_failed(mut state: WorkflowState, reason: String) -> TransitionResult {
    if !state.in_flight.review {
        return TransitionResult::no_change(state);
    }
    state.in_flight.review = false;
    state.stage = Stage::Failed;
    state.last_error = Some(UserError::Backend(BACKEND_FAILURE_MESSAGE.to_string()));
    TransitionResult::new(
        state,
        vec![Effect::log(
            LogLevel::Debug,
            format!("Review failed: {}", reason),
        )],
    )
}

// =============================================================================
// Translation
// =============================================================================

fn on_language_selected(mut state: WorkflowState, selection: String) -> TransitionResult {
    let selection = selection.trim().to_string();

    // Whatever happens next, the previous translation is no longer shown and
    // any outstanding request is superseded.
    state.translation = None;
    state.in_flight.translate = None;
    state.translate_generation += 1;
    state.selected_language = (!selection.is_empty()).then(|| selection.clone());

    let Some(review) = state.review.as_ref().filter(|_| !selection.is_empty()) else {
        state.stage = state.resting_stage();
        return TransitionResult::no_change(state);
    };

    // Nothing to translate; the service would not be asked in this case.
    if review.optimized_code.is_empty() {
        state.translation = Some(TranslationResult {
            target_language: selection,
            translated_code: TRANSLATION_ERROR_PLACEHOLDER.to_string(),
        });
        state.stage = Stage::TranslatedReady;
        return TransitionResult::new(
            state,
            vec![Effect::log(
                LogLevel::Warn,
                "Review returned no optimized code to translate",
            )],
        );
    }

    let generation = state.translate_generation;
    let request = TranslateRequest {
        code: review.optimized_code.clone(),
        target_language: selection.clone(),
    };
    state.in_flight.translate = Some(PendingTranslation {
        generation,
        target_language: selection,
    });
    state.stage = Stage::Translating;
    TransitionResult::new(
        state,
        vec![Effect::CallTranslate {
            request,
            generation,
        }],
    )
}

fn on_translation_resolved(
    mut state: WorkflowState,
    generation: u64,
    outcome: Result<String, String>,
) -> TransitionResult {
    let pending = match state.in_flight.translate.take() {
        Some(pending) if pending.generation == generation => pending,
        other => {
            state.in_flight.translate = other;
            return TransitionResult::new(
                state,
                vec![Effect::log(
                    LogLevel::Debug,
                    format!("Discarding stale translation (generation {})", generation),
                )],
            );
        }
    };

    let (translated_code, effects) = match outcome {
        Ok(code) => (code, vec![]),
        Err(reason) => (
            TRANSLATION_ERROR_PLACEHOLDER.to_string(),
            vec![Effect::log(
                LogLevel::Warn,
                format!(
                    "Translation to {} failed: {}",
                    pending.target_language, reason
                ),
            )],
        ),
    };
    state.translation = Some(TranslationResult {
        target_language: pending.target_language,
        translated_code,
    });
    state.stage = Stage::TranslatedReady;
    TransitionResult::new(state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReviewResult;
    use crate::cues::Cue;
    use crate::workflow::state::TRANSLATION_PROMPT;
    use std::path::PathBuf;

    fn review_result(original: i64, refined: i64, bugs: Option<&str>) -> ReviewResult {
        ReviewResult {
            original_score: original,
            refined_score: refined,
            original_time_complexity: "O(n^2)".into(),
            time_complexity: "O(n log n)".into(),
            original_space_complexity: "O(n)".into(),
            space_complexity: "O(1)".into(),
            bugs: bugs.map(str::to_string),
            optimized_code: "def solve(xs):\n    return sorted(xs)\n".into(),
            explanation: "Sorting replaces the nested loop.".into(),
            performance: None,
            improvements: vec![],
        }
    }

    fn with_text(text: &str) -> WorkflowState {
        WorkflowState::new(SourceDocument::typed(text))
    }

    /// A state that has completed one review.
    fn reviewed(result: ReviewResult) -> WorkflowState {
        let state = transition(with_text("code"), Event::SubmitReview).state;
        transition(state, Event::ReviewSucceeded(result)).state
    }

    fn translate_call(effects: &[Effect]) -> Option<(&TranslateRequest, u64)> {
        effects.iter().find_map(|e| match e {
            Effect::CallTranslate {
                request,
                generation,
            } => Some((request, *generation)),
            _ => None,
        })
    }

    fn fired_cues(effects: &[Effect]) -> Vec<Cue> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::FireCue(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    // =========================================
    // Review orchestration
    // =========================================

    #[test]
    fn test_blank_submit_sends_nothing() {
        for text in ["", "   ", "\n\t  \n"] {
            let before = with_text(text);
            let result = transition(before.clone(), Event::SubmitReview);
            assert!(result.effects.is_empty(), "no request for {:?}", text);
            assert_eq!(result.rejected, None);
            assert_eq!(result.state.stage, before.stage);
            assert_eq!(
                result.state.last_error,
                Some(UserError::Validation(EMPTY_INPUT_MESSAGE.into()))
            );
            assert!(!result.state.in_flight.review);
        }
    }

    #[test]
    fn test_blank_submit_keeps_previous_results() {
        let mut state = reviewed(review_result(70, 90, None));
        state.document = SourceDocument::typed("  ");
        let result = transition(state, Event::SubmitReview);
        assert_eq!(result.state.stage, Stage::Reviewed);
        assert!(result.state.review.is_some());
    }

    #[test]
    fn test_submit_enters_analyzing_and_calls_review() {
        let result = transition(with_text("print(1)"), Event::SubmitReview);
        assert_eq!(result.state.stage, Stage::Analyzing);
        assert!(result.state.in_flight.review);
        assert!(result.effects.contains(&Effect::CallReview(ReviewRequest {
            code: "print(1)".into()
        })));
        assert!(result.effects.contains(&Effect::AnimateScores {
            original: 0,
            refined: 0
        }));
    }

    #[test]
    fn test_submit_clears_previous_results_and_error() {
        let mut state = reviewed(review_result(70, 90, None));
        state = transition(state, Event::LanguageSelected("Go".into())).state;
        state.last_error = Some(UserError::Validation(EMPTY_INPUT_MESSAGE.into()));

        let result = transition(state, Event::SubmitReview);
        assert_eq!(result.state.review, None);
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.selected_language, None);
        assert_eq!(result.state.last_error, None);
        assert_eq!(result.state.in_flight.translate, None);
    }

    #[test]
    fn test_submit_while_analyzing_is_rejected() {
        let state = transition(with_text("x = 1"), Event::SubmitReview).state;
        let result = transition(state.clone(), Event::SubmitReview);
        assert_eq!(result.rejected, Some(WorkflowError::Busy(Channel::Review)));
        assert!(result.effects.is_empty());
        assert_eq!(result.state, state);
    }

    #[test]
    fn test_rejected_result_clones_with_its_error() {
        let state = transition(with_text("x = 1"), Event::SubmitReview).state;
        let result = transition(state, Event::SubmitReview);
        let copy = result.clone();
        assert_eq!(copy, result);
        assert_eq!(copy.rejected, Some(WorkflowError::Busy(Channel::Review)));
    }

    #[test]
    fn test_submit_while_reading_file_is_rejected() {
        let state = transition(
            with_text("x = 1"),
            Event::FileReadRequested(PathBuf::from("a.py")),
        )
        .state;
        let result = transition(state, Event::SubmitReview);
        assert_eq!(result.rejected, Some(WorkflowError::Busy(Channel::FileRead)));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_review_success_stores_result() {
        let state = transition(with_text("x"), Event::SubmitReview).state;
        let result = transition(state, Event::ReviewSucceeded(review_result(70, 90, None)));
        assert_eq!(result.state.stage, Stage::Reviewed);
        assert!(!result.state.in_flight.review);
        assert_eq!(result.state.review.as_ref().unwrap().refined_score, 90);
        assert!(result.effects.contains(&Effect::AnimateScores {
            original: 70,
            refined: 90
        }));
        assert!(fired_cues(&result.effects).is_empty());
    }

    #[test]
    fn test_review_success_fires_derived_cues() {
        let state = transition(with_text("x"), Event::SubmitReview).state;
        let result = transition(
            state,
            Event::ReviewSucceeded(review_result(30, 98, Some("Critical overflow"))),
        );
        assert_eq!(
            fired_cues(&result.effects),
            vec![Cue::Celebration, Cue::Attention]
        );
    }

    #[test]
    fn test_review_failure_is_generic() {
        let state = transition(with_text("x"), Event::SubmitReview).state;
        let result = transition(
            state,
            Event::ReviewFailed {
                reason: "Server Error: 500".into(),
            },
        );
        assert_eq!(result.state.stage, Stage::Failed);
        assert_eq!(
            result.state.last_error,
            Some(UserError::Backend(BACKEND_FAILURE_MESSAGE.into()))
        );
        assert!(!result.state.in_flight.review);
        // The cause goes to the debug log only.
        assert!(result.effects.iter().any(|e| matches!(
            e,
            Effect::Log { level: LogLevel::Debug, message } if message.contains("Server Error: 500")
        )));
        assert!(!result.effects.iter().any(|e| matches!(
            e,
            Effect::Log { level: LogLevel::Warn | LogLevel::Error, .. }
        )));
    }

    #[test]
    fn test_resubmit_after_failure() {
        let state = transition(with_text("x"), Event::SubmitReview).state;
        let state = transition(
            state,
            Event::ReviewFailed {
                reason: "down".into(),
            },
        )
        .state;
        let result = transition(state, Event::SubmitReview);
        assert_eq!(result.state.stage, Stage::Analyzing);
        assert_eq!(result.state.last_error, None);
    }

    #[test]
    fn test_unsolicited_review_response_is_ignored() {
        let state = with_text("x");
        let result = transition(
            state.clone(),
            Event::ReviewSucceeded(review_result(10, 99, None)),
        );
        assert_eq!(result.state, state);
        assert!(fired_cues(&result.effects).is_empty());
    }

    // =========================================
    // Translation orchestration
    // =========================================

    #[test]
    fn test_select_language_without_review_is_noop() {
        let result = transition(with_text("x"), Event::LanguageSelected("Rust".into()));
        assert!(translate_call(&result.effects).is_none());
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.translated_code_display(), TRANSLATION_PROMPT);
        assert_eq!(result.state.stage, Stage::Idle);
    }

    #[test]
    fn test_select_language_while_analyzing_is_noop() {
        let state = transition(with_text("x"), Event::SubmitReview).state;
        let result = transition(state, Event::LanguageSelected("Go".into()));
        assert!(translate_call(&result.effects).is_none());
        assert_eq!(result.state.stage, Stage::Analyzing);
    }

    #[test]
    fn test_select_language_translates_optimized_code() {
        let state = reviewed(review_result(60, 90, None));
        let result = transition(state, Event::LanguageSelected("Rust".into()));
        let (request, generation) = translate_call(&result.effects).unwrap();
        assert_eq!(request.code, "def solve(xs):\n    return sorted(xs)\n");
        assert_eq!(request.target_language, "Rust");
        assert_eq!(result.state.stage, Stage::Translating);
        assert_eq!(result.state.selected_language.as_deref(), Some("Rust"));
        assert_eq!(
            result.state.in_flight.translate,
            Some(PendingTranslation {
                generation,
                target_language: "Rust".into()
            })
        );
    }

    #[test]
    fn test_new_selection_clears_previous_translation_immediately() {
        let state = reviewed(review_result(60, 90, None));
        let first = transition(state, Event::LanguageSelected("Go".into()));
        let (_, generation) = translate_call(&first.effects).unwrap();
        let state = transition(
            first.state,
            Event::TranslationSucceeded {
                generation,
                translated_code: "package main".into(),
            },
        )
        .state;
        assert_eq!(state.stage, Stage::TranslatedReady);

        let result = transition(state, Event::LanguageSelected("Java".into()));
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.stage, Stage::Translating);
    }

    #[test]
    fn test_deselect_clears_translation_without_request() {
        let state = reviewed(review_result(60, 90, None));
        let first = transition(state, Event::LanguageSelected("Go".into()));
        let (_, generation) = translate_call(&first.effects).unwrap();
        let state = transition(
            first.state,
            Event::TranslationSucceeded {
                generation,
                translated_code: "package main".into(),
            },
        )
        .state;

        let result = transition(state, Event::LanguageSelected(String::new()));
        assert!(result.effects.is_empty());
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.selected_language, None);
        assert_eq!(result.state.stage, Stage::Reviewed);
    }

    #[test]
    fn test_translation_success_stores_language_and_code() {
        let state = reviewed(review_result(60, 90, None));
        let first = transition(state, Event::LanguageSelected("C++".into()));
        let (_, generation) = translate_call(&first.effects).unwrap();
        let result = transition(
            first.state,
            Event::TranslationSucceeded {
                generation,
                translated_code: "int main() {}".into(),
            },
        );
        assert_eq!(
            result.state.translation,
            Some(TranslationResult {
                target_language: "C++".into(),
                translated_code: "int main() {}".into(),
            })
        );
        assert_eq!(result.state.in_flight.translate, None);
    }

    #[test]
    fn test_translation_failure_stores_placeholder_and_keeps_review() {
        let state = reviewed(review_result(60, 90, None));
        let review_before = state.review.clone();
        let first = transition(state, Event::LanguageSelected("Go".into()));
        let (_, generation) = translate_call(&first.effects).unwrap();
        let result = transition(
            first.state,
            Event::TranslationFailed {
                generation,
                reason: "Translation failed: Bad Gateway".into(),
            },
        );
        assert_eq!(result.state.stage, Stage::TranslatedReady);
        assert_eq!(
            result.state.translated_code_display(),
            TRANSLATION_ERROR_PLACEHOLDER
        );
        assert_eq!(result.state.review, review_before);
        assert_eq!(result.state.last_error, None);
    }

    #[test]
    fn test_stale_translation_after_reselect_is_discarded() {
        let state = reviewed(review_result(60, 90, None));
        let go = transition(state, Event::LanguageSelected("Go".into()));
        let (_, go_generation) = translate_call(&go.effects).unwrap();
        let rust = transition(go.state, Event::LanguageSelected("Rust".into()));
        let (_, rust_generation) = translate_call(&rust.effects).unwrap();
        assert_ne!(go_generation, rust_generation);

        let result = transition(
            rust.state,
            Event::TranslationSucceeded {
                generation: go_generation,
                translated_code: "package main".into(),
            },
        );
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.stage, Stage::Translating);

        let result = transition(
            result.state,
            Event::TranslationSucceeded {
                generation: rust_generation,
                translated_code: "fn main() {}".into(),
            },
        );
        assert_eq!(
            result.state.translation.unwrap().target_language,
            "Rust"
        );
    }

    #[test]
    fn test_stale_translation_after_new_review_is_discarded() {
        let state = reviewed(review_result(60, 90, None));
        let go = transition(state, Event::LanguageSelected("Go".into()));
        let (_, generation) = translate_call(&go.effects).unwrap();
        let state = transition(go.state, Event::SubmitReview).state;
        let state = transition(state, Event::ReviewSucceeded(review_result(80, 99, None))).state;

        let result = transition(
            state,
            Event::TranslationSucceeded {
                generation,
                translated_code: "package main".into(),
            },
        );
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.stage, Stage::Reviewed);
    }

    #[test]
    fn test_new_review_clears_ready_translation_and_language() {
        let state = reviewed(review_result(60, 90, None));
        let go = transition(state, Event::LanguageSelected("Go".into()));
        let (_, generation) = translate_call(&go.effects).unwrap();
        let state = transition(
            go.state,
            Event::TranslationSucceeded {
                generation,
                translated_code: "package main".into(),
            },
        )
        .state;
        assert_eq!(state.stage, Stage::TranslatedReady);

        let state = transition(state, Event::SubmitReview).state;
        let result = transition(state, Event::ReviewSucceeded(review_result(75, 92, None)));
        assert_eq!(result.state.translation, None);
        assert_eq!(result.state.selected_language, None);
        assert_eq!(result.state.stage, Stage::Reviewed);
    }

    #[test]
    fn test_empty_optimized_code_yields_placeholder_without_request() {
        let mut result = review_result(60, 90, None);
        result.optimized_code = String::new();
        let state = reviewed(result);
        let result = transition(state, Event::LanguageSelected("Go".into()));
        assert!(translate_call(&result.effects).is_none());
        assert_eq!(
            result.state.translated_code_display(),
            TRANSLATION_ERROR_PLACEHOLDER
        );
    }

    // =========================================
    // Document
    // =========================================

    #[test]
    fn test_edit_replaces_text() {
        let result = transition(with_text("old"), Event::Edited("new".into()));
        assert_eq!(result.state.document, SourceDocument::typed("new"));
    }

    #[test]
    fn test_edit_while_analyzing_is_rejected() {
        let state = transition(with_text("old"), Event::SubmitReview).state;
        let result = transition(state, Event::Edited("new".into()));
        assert_eq!(result.rejected, Some(WorkflowError::Busy(Channel::Review)));
        assert_eq!(result.state.document.text, "old");
    }

    #[test]
    fn test_file_read_is_exclusive() {
        let state = transition(
            WorkflowState::default(),
            Event::FileReadRequested("a.py".into()),
        );
        assert_eq!(state.state.stage, Stage::ReadingFile);
        assert_eq!(state.effects, vec![Effect::ReadFile("a.py".into())]);

        let second = transition(state.state, Event::FileReadRequested("b.py".into()));
        assert_eq!(
            second.rejected,
            Some(WorkflowError::Busy(Channel::FileRead))
        );
        assert!(second.effects.is_empty());
    }

    #[test]
    fn test_file_read_completion_replaces_document() {
        let state = transition(with_text("typed"), Event::FileReadRequested("a.py".into())).state;
        let result = transition(
            state,
            Event::FileReadCompleted {
                path: "a.py".into(),
                text: "loaded".into(),
            },
        );
        assert_eq!(result.state.document, SourceDocument::from_file("a.py", "loaded"));
        assert_eq!(result.state.stage, Stage::Idle);
        assert!(!result.state.in_flight.file_read);
    }

    #[test]
    fn test_file_read_returns_to_reviewed() {
        let state = reviewed(review_result(60, 90, None));
        let state = transition(state, Event::FileReadRequested("a.py".into())).state;
        let result = transition(
            state,
            Event::FileReadCompleted {
                path: "a.py".into(),
                text: "next".into(),
            },
        );
        assert_eq!(result.state.stage, Stage::Reviewed);
    }

    #[test]
    fn test_file_read_failure_leaves_document_unchanged() {
        let state = transition(with_text("typed"), Event::FileReadRequested("a.py".into())).state;
        let result = transition(
            state,
            Event::FileReadFailed {
                path: "a.py".into(),
                reason: "permission denied".into(),
            },
        );
        assert_eq!(result.state.document, SourceDocument::typed("typed"));
        assert_eq!(result.state.stage, Stage::Idle);
        assert_eq!(result.state.last_error, None);
        assert!(result.effects.iter().any(|e| matches!(
            e,
            Effect::Log { level: LogLevel::Warn, .. }
        )));
    }
}

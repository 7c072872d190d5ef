//! Workflow controller: owns the state and interprets effects.
//!
//! Every mutation goes through [`Workflow::dispatch`], which runs the pure
//! transition and then executes the returned effects. Network calls and file
//! reads run as spawned tasks whose completions come back over a channel as
//! further events, so the state only ever has one writer.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::state::WorkflowState;
use super::transition::transition;
use crate::api::CodeRefineApi;
use crate::counter::AnimatedCounter;
use crate::cues::CueBoard;
use crate::document::{SourceDocument, read_source};
use crate::errors::WorkflowError;

pub struct Workflow<A: CodeRefineApi + 'static> {
    api: Arc<A>,
    state: WorkflowState,
    cues: CueBoard,
    original_score: AnimatedCounter,
    refined_score: AnimatedCounter,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    /// Spawned tasks that have not reported back yet.
    outstanding: usize,
}

impl<A: CodeRefineApi + 'static> Workflow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_document(api, SourceDocument::default())
    }

    pub fn with_document(api: Arc<A>, document: SourceDocument) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: WorkflowState::new(document),
            cues: CueBoard::new(),
            original_score: AnimatedCounter::new(),
            refined_score: AnimatedCounter::new(),
            completions_tx,
            completions_rx,
            outstanding: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn cues(&self) -> &CueBoard {
        &self.cues
    }

    pub fn original_score(&self) -> &AnimatedCounter {
        &self.original_score
    }

    pub fn refined_score(&self) -> &AnimatedCounter {
        &self.refined_score
    }

    /// Number of spawned calls/reads still outstanding, including stale ones.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Apply one event and execute its effects.
    pub fn dispatch(&mut self, event: Event) -> Result<(), WorkflowError> {
        debug!(event = event.name(), stage = %self.state.stage, "dispatch");
        let result = transition(std::mem::take(&mut self.state), event);
        self.state = result.state;
        for effect in result.effects {
            self.execute(effect);
        }
        match result.rejected {
            Some(err) => {
                debug!("rejected: {}", err);
                Err(err)
            }
            None => Ok(()),
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) -> Result<(), WorkflowError> {
        self.dispatch(Event::Edited(text.into()))
    }

    pub fn load_file(&mut self, path: impl Into<PathBuf>) -> Result<(), WorkflowError> {
        self.dispatch(Event::FileReadRequested(path.into()))
    }

    pub fn submit_review(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(Event::SubmitReview)
    }

    pub fn select_language(&mut self, language: impl Into<String>) -> Result<(), WorkflowError> {
        self.dispatch(Event::LanguageSelected(language.into()))
    }

    /// Wait for the next completion and apply it.
    /// Returns `false` without waiting when nothing is outstanding.
    pub async fn step(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        let Some(event) = self.completions_rx.recv().await else {
            return false;
        };
        self.outstanding -= 1;
        if let Err(e) = self.dispatch(event) {
            warn!("Completion was rejected: {}", e);
        }
        true
    }

    /// Apply completions until nothing is outstanding.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ReadFile(path) => {
                self.spawn(async move {
                    match read_source(&path).await {
                        Ok(text) => Event::FileReadCompleted { path, text },
                        Err(e) => Event::FileReadFailed {
                            path,
                            reason: e.to_string(),
                        },
                    }
                });
            }
            Effect::CallReview(request) => {
                let api = Arc::clone(&self.api);
                self.spawn(async move {
                    match api.review(&request).await {
                        Ok(result) => Event::ReviewSucceeded(result),
                        Err(e) => Event::ReviewFailed {
                            reason: e.to_string(),
                        },
                    }
                });
            }
            Effect::CallTranslate {
                request,
                generation,
            } => {
                let api = Arc::clone(&self.api);
                self.spawn(async move {
                    match api.translate(&request).await {
                        Ok(resp) => Event::TranslationSucceeded {
                            generation,
                            translated_code: resp.translated_code,
                        },
                        Err(e) => Event::TranslationFailed {
                            generation,
                            reason: e.to_string(),
                        },
                    }
                });
            }
            Effect::FireCue(cue) => self.cues.fire(cue),
            Effect::AnimateScores { original, refined } => {
                self.original_score.set_target(original);
                self.refined_score.set_target(refined);
            }
            Effect::Log { level, message } => match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
                LogLevel::Error => error!("{}", message),
            },
        }
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: std::future::Future<Output = Event> + Send + 'static,
    {
        self.outstanding += 1;
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let event = work.await;
            // The receiver lives as long as the workflow; a send error means
            // the workflow was dropped and nobody cares about the result.
            let _ = tx.send(event);
        });
    }
}

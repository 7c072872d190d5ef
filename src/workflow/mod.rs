//! Review and translation workflow.
//!
//! [`transition`] is a pure function from `(state, event)` to the next state
//! plus a list of [`Effect`]s. [`Workflow`] owns the state, runs the effects
//! (spawned API calls, file reads, cue timers, score counters) and feeds
//! their completions back in as events.

pub mod controller;
pub mod effect;
pub mod event;
pub mod state;
pub mod transition;

pub use controller::Workflow;
pub use effect::{Effect, LogLevel};
pub use event::Event;
pub use state::{Stage, TranslationResult, WorkflowState};
pub use transition::{TransitionResult, transition};

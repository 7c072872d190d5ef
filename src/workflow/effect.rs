//! Effects (side effects as data).
//!
//! The transition function never touches the network, the filesystem or a
//! timer. It returns these instead and the controller carries them out.

use std::path::PathBuf;

use crate::api::{ReviewRequest, TranslateRequest};
use crate::cues::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read a local file into the document.
    ReadFile(PathBuf),

    /// Issue the review operation.
    CallReview(ReviewRequest),

    /// Issue the translate operation. The completion must echo `generation`.
    CallTranslate {
        request: TranslateRequest,
        generation: u64,
    },

    /// Light a presentation cue.
    FireCue(Cue),

    /// Point both score counters at new targets.
    AnimateScores { original: i64, refined: i64 },

    Log { level: LogLevel, message: String },
}

impl Effect {
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Effect::Log {
            level,
            message: message.into(),
        }
    }
}

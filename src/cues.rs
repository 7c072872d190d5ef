//! Celebration and attention cues derived from a review result.
//!
//! [`derive_cues`] decides which cues a fresh result earns; [`CueBoard`]
//! keeps each cue lit for its fixed duration. A cue fired again before it
//! clears restarts its timer instead of stacking a second one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::api::ReviewResult;

/// Refined score at or above which the result is celebrated.
pub const CELEBRATION_THRESHOLD: i64 = 95;
/// Original score below which the result needs attention.
pub const ATTENTION_THRESHOLD: i64 = 50;
/// Case-insensitive marker in `bugs` that always needs attention.
pub const CRITICAL_MARKER: &str = "critical";

/// A short-lived presentation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The optimized code scored high.
    Celebration,
    /// The submitted code scored low or has critical bugs.
    Attention,
}

impl Cue {
    pub const ALL: [Cue; 2] = [Cue::Celebration, Cue::Attention];

    /// How long the cue stays active once fired.
    pub fn duration(self) -> Duration {
        match self {
            Cue::Celebration => Duration::from_millis(5000),
            Cue::Attention => Duration::from_millis(500),
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cue::Celebration => write!(f, "celebration"),
            Cue::Attention => write!(f, "attention"),
        }
    }
}

/// Cues earned by `result`. Both may fire together.
pub fn derive_cues(result: &ReviewResult) -> Vec<Cue> {
    let mut cues = Vec::new();
    if result.refined_score >= CELEBRATION_THRESHOLD {
        cues.push(Cue::Celebration);
    }
    let critical_bugs = result
        .bugs
        .as_deref()
        .is_some_and(|bugs| bugs.to_lowercase().contains(CRITICAL_MARKER));
    if result.original_score < ATTENTION_THRESHOLD || critical_bugs {
        cues.push(Cue::Attention);
    }
    cues
}

struct CueSlot {
    active: Arc<watch::Sender<bool>>,
    expires_at: Option<Instant>,
    timer: Option<JoinHandle<()>>,
}

impl CueSlot {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            active: Arc::new(tx),
            expires_at: None,
            timer: None,
        }
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One cancellable one-shot timer per cue.
pub struct CueBoard {
    celebration: CueSlot,
    attention: CueSlot,
}

impl Default for CueBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl CueBoard {
    pub fn new() -> Self {
        Self {
            celebration: CueSlot::new(),
            attention: CueSlot::new(),
        }
    }

    fn slot(&self, cue: Cue) -> &CueSlot {
        match cue {
            Cue::Celebration => &self.celebration,
            Cue::Attention => &self.attention,
        }
    }

    fn slot_mut(&mut self, cue: Cue) -> &mut CueSlot {
        match cue {
            Cue::Celebration => &mut self.celebration,
            Cue::Attention => &mut self.attention,
        }
    }

    /// Light `cue` and schedule it to clear after [`Cue::duration`].
    /// Must be called inside a tokio runtime.
    pub fn fire(&mut self, cue: Cue) {
        let duration = cue.duration();
        let slot = self.slot_mut(cue);
        slot.cancel();

        let expires_at = Instant::now() + duration;
        slot.expires_at = Some(expires_at);
        slot.active.send_replace(true);
        debug!(%cue, ?duration, "cue fired");

        let active = Arc::clone(&slot.active);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            active.send_replace(false);
        }));
    }

    pub fn is_active(&self, cue: Cue) -> bool {
        *self.slot(cue).active.borrow()
    }

    /// Cues currently lit.
    pub fn active(&self) -> Vec<Cue> {
        Cue::ALL
            .into_iter()
            .filter(|cue| self.is_active(*cue))
            .collect()
    }

    /// When the most recent firing of `cue` clears.
    pub fn expires_at(&self, cue: Cue) -> Option<Instant> {
        self.slot(cue).expires_at
    }

    /// Clear every cue immediately.
    pub fn clear(&mut self) {
        for cue in Cue::ALL {
            let slot = self.slot_mut(cue);
            slot.cancel();
            slot.expires_at = None;
            slot.active.send_replace(false);
        }
    }
}

impl Drop for CueBoard {
    fn drop(&mut self) {
        self.celebration.cancel();
        self.attention.cancel();
    }
}

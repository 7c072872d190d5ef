use crate::ui::icons::{CHECK, CROSS, TRANSLATE};
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;

/// Terminal UI for a review run, rendered via `indicatif` progress bars.
///
/// Three bars are stacked vertically:
/// - Status spinner: "Analyzing..." while the review is out, "SYNCING..."
///   while a translation is out
/// - Original score bar: follows the original-score counter
/// - Refined score bar: follows the refined-score counter
///
/// With `animate` off everything is drawn to a hidden target and only the
/// final report is printed.
pub struct RefineUI {
    multi: MultiProgress,
    status_bar: ProgressBar,
    original_bar: ProgressBar,
    refined_bar: ProgressBar,
}

impl RefineUI {
    pub fn new(animate: bool) -> Self {
        let multi = if animate {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let status_style = ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {msg}")
            .expect("progress bar template is a valid static string");

        let status_bar = multi.add(ProgressBar::new_spinner());
        status_bar.set_style(status_style);
        status_bar.set_prefix("  Status");

        let original_bar = score_bar();
        original_bar.set_style(score_style("red"));
        original_bar.set_prefix("Original");

        let refined_bar = score_bar();
        refined_bar.set_style(score_style("green"));
        refined_bar.set_prefix(" Refined");

        Self {
            multi,
            status_bar,
            original_bar,
            refined_bar,
        }
    }

    /// Start the spinner for an outstanding review.
    pub fn start_analyzing(&self) {
        self.status_bar.set_message("Analyzing...");
        self.status_bar
            .enable_steady_tick(Duration::from_millis(100));
    }

    /// Start the spinner for an outstanding translation.
    pub fn start_translating(&self, language: &str) {
        self.status_bar.reset();
        self.status_bar.set_message(format!(
            "{}SYNCING... {}",
            TRANSLATE,
            style(language.to_uppercase()).yellow()
        ));
        self.status_bar
            .enable_steady_tick(Duration::from_millis(100));
    }

    pub fn finish_ok(&self, msg: &str) {
        self.status_bar
            .finish_with_message(format!("{} {}", CHECK, msg));
    }

    pub fn finish_error(&self, msg: &str) {
        self.status_bar
            .finish_with_message(format!("{} {}", CROSS, style(msg).red()));
    }

    /// Show the score bars and follow both counters until each reaches its
    /// target. Call at most once per UI.
    ///
    /// Returns as soon as both displays equal their targets, or when a
    /// counter is dropped.
    pub async fn follow_scores(
        &self,
        original: watch::Receiver<i64>,
        original_target: i64,
        refined: watch::Receiver<i64>,
        refined_target: i64,
    ) {
        self.multi.add(self.original_bar.clone());
        self.multi.add(self.refined_bar.clone());
        tokio::join!(
            follow(&self.original_bar, original, original_target),
            follow(&self.refined_bar, refined, refined_target),
        );
    }

    /// Remove every bar from the screen.
    pub fn clear(&self) {
        self.status_bar.finish_and_clear();
        self.original_bar.finish_and_clear();
        self.refined_bar.finish_and_clear();
        let _ = self.multi.clear();
    }
}

/// Scores are 0..=100; the bar stays off screen until it is added.
fn score_bar() -> ProgressBar {
    ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::hidden())
}

fn score_style(colour: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:.bold.dim}} [{{bar:40.{colour}/white}}] {{pos:>3}}"
        ))
        .expect("progress bar template is a valid static string")
        .progress_chars("█▓░")
}

async fn follow(bar: &ProgressBar, mut display: watch::Receiver<i64>, target: i64) {
    let target = target.max(0);
    loop {
        let current = *display.borrow_and_update();
        bar.set_position(current.max(0) as u64);
        if current >= target {
            break;
        }
        if display.changed().await.is_err() {
            break;
        }
    }
    bar.set_position(target as u64);
}

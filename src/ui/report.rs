//! Plain-text rendering of review and translation results.
//!
//! Every function returns a `String` so the CLI decides where it goes and
//! tests can compare output with ANSI codes stripped.

use console::style;

use crate::api::ReviewResult;
use crate::cues::Cue;
use crate::ui::icons::{ARROW, BUG, PARTY, SIREN, SPARKLE};

const DEFAULT_WIDTH: usize = 80;
const MAX_WIDTH: usize = 120;

/// Width to wrap prose to: the terminal width capped at 120, or 80 when
/// stdout is not a terminal.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .unwrap_or(DEFAULT_WIDTH)
        .clamp(40, MAX_WIDTH)
}

fn heading(title: &str) -> String {
    style(title).bold().cyan().to_string()
}

/// "Original Score  62  ➔  Refined Score  88"
pub fn scores(original: i64, refined: i64) -> String {
    format!(
        "{}  {}  {}  {}  {}",
        style("Original Score").dim(),
        style(original).red().bold(),
        ARROW,
        style("Refined Score").dim(),
        style(refined).green().bold()
    )
}

fn evolution(title: &str, before: &str, after: &str) -> String {
    format!(
        "{}\n  BEFORE {}  {}  AFTER {}",
        heading(title),
        style(or_unknown(before)).red(),
        ARROW,
        style(or_unknown(after)).green()
    )
}

fn or_unknown(complexity: &str) -> &str {
    if complexity.trim().is_empty() {
        "O(?)"
    } else {
        complexity
    }
}

/// Time and space complexity, before and after.
pub fn complexity(result: &ReviewResult) -> String {
    format!(
        "{}\n\n{}",
        evolution(
            "TIME COMPLEXITY EVOLUTION",
            &result.original_time_complexity,
            &result.time_complexity
        ),
        evolution(
            "SPACE COMPLEXITY EVOLUTION",
            &result.original_space_complexity,
            &result.space_complexity
        )
    )
}

/// Bug report plus the optional performance note and improvement list.
/// `None` when the review carried none of them.
pub fn diagnostics(result: &ReviewResult, width: usize) -> Option<String> {
    let mut sections = Vec::new();

    if let Some(bugs) = result.bugs.as_deref().filter(|b| !b.trim().is_empty()) {
        sections.push(format!(
            "{}{}\n{}",
            BUG,
            heading("DIAGNOSTICS"),
            indent(&textwrap::fill(bugs, width.saturating_sub(2)))
        ));
    }
    if let Some(perf) = result
        .performance
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        sections.push(format!(
            "{}\n{}",
            heading("PERFORMANCE"),
            indent(&textwrap::fill(perf, width.saturating_sub(2)))
        ));
    }
    if !result.improvements.is_empty() {
        let items: Vec<String> = result
            .improvements
            .iter()
            .map(|i| {
                let options = textwrap::Options::new(width.saturating_sub(4))
                    .initial_indent("  - ")
                    .subsequent_indent("    ");
                textwrap::fill(i, options)
            })
            .collect();
        sections.push(format!("{}\n{}", heading("IMPROVEMENTS"), items.join("\n")));
    }

    (!sections.is_empty()).then(|| sections.join("\n\n"))
}

/// A titled code block between two rules.
pub fn code_pane(title: &str, code: &str, width: usize) -> String {
    let rule = style("─".repeat(width.min(MAX_WIDTH))).dim();
    format!(
        "{}\n{}\n{}\n{}",
        heading(title),
        rule,
        code.trim_end_matches('\n'),
        rule
    )
}

/// The explanation, wrapped to `width`.
pub fn explanation(text: &str, width: usize) -> String {
    format!(
        "{}\n{}",
        heading("LOGIC EXPLANATION"),
        indent(&textwrap::fill(text, width.saturating_sub(2)))
    )
}

pub fn cue_banner(cue: Cue) -> String {
    match cue {
        Cue::Celebration => format!(
            "{}{}",
            PARTY,
            style("Outstanding refinement! Score 95 or above.")
                .green()
                .bold()
        ),
        Cue::Attention => format!(
            "{}{}",
            SIREN,
            style("Attention: low original score or critical bugs.")
                .red()
                .bold()
        ),
    }
}

/// The full review report, in the order the results are laid out on screen.
pub fn review(result: &ReviewResult, cues: &[Cue], width: usize) -> String {
    let mut parts = Vec::new();
    for cue in cues {
        parts.push(cue_banner(*cue));
    }
    parts.push(scores(result.original_score, result.refined_score));
    parts.push(complexity(result));
    if let Some(diag) = diagnostics(result, width) {
        parts.push(diag);
    }
    parts.push(code_pane(
        &format!("{}REFINED CODE", SPARKLE),
        &result.optimized_code,
        width,
    ));
    parts.push(explanation(&result.explanation, width));
    parts.join("\n\n")
}

/// Pane title for the translated code.
pub fn translated_title(language: Option<&str>) -> String {
    language
        .map(str::to_uppercase)
        .unwrap_or_else(|| "TRANSLATED CODE".to_string())
}

fn indent(text: &str) -> String {
    textwrap::indent(text, "  ")
}

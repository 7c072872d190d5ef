//! `coderefine review`: submit code, show scores, optionally translate.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use dialoguer::{Select, theme::ColorfulTheme};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use coderefine::api::{CodeRefineApi, HttpApi, ReviewResult, SUGGESTED_LANGUAGES};
use coderefine::config::RefineConfig;
use coderefine::errors::UserError;
use coderefine::ui::{RefineUI, report};
use coderefine::workflow::state::BACKEND_FAILURE_MESSAGE;
use coderefine::workflow::{Stage, TranslationResult, Workflow};

pub struct ReviewArgs {
    pub file: Option<PathBuf>,
    pub stdin: bool,
    pub translate: Option<String>,
    pub select_language: bool,
    pub animate: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct ReviewOutput<'a> {
    review: &'a ReviewResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<&'a TranslationResult>,
    cues: Vec<String>,
}

pub async fn cmd_review(config: &RefineConfig, args: ReviewArgs) -> Result<()> {
    let base_url = config.api_base_url();
    debug!(base_url = %base_url, "Using analysis service");
    let api = Arc::new(HttpApi::new(base_url).context("Failed to build HTTP client")?);
    let mut workflow = Workflow::new(api);

    load_document(&mut workflow, &args).await?;

    workflow.submit_review()?;
    if let Some(UserError::Validation(msg)) = &workflow.state().last_error {
        bail!("{}", msg);
    }

    let ui = RefineUI::new(args.animate);
    ui.start_analyzing();
    workflow.settle().await;

    let Some(review) = workflow.state().review.clone() else {
        // A settled review either succeeded or left the backend failure message.
        debug_assert_eq!(workflow.state().stage, Stage::Failed);
        let msg = match &workflow.state().last_error {
            Some(err @ UserError::Backend(_)) => err.message().to_string(),
            other => {
                warn!(error = ?other, "Review settled without a result or a backend error");
                BACKEND_FAILURE_MESSAGE.to_string()
            }
        };
        ui.finish_error(&msg);
        ui.clear();
        bail!("{}", msg);
    };
    ui.finish_ok("Review complete");
    let cues = workflow.cues().active();

    if args.animate {
        ui.follow_scores(
            workflow.original_score().subscribe(),
            review.original_score,
            workflow.refined_score().subscribe(),
            review.refined_score,
        )
        .await;
    }

    if let Some(language) = choose_language(config, &args)? {
        workflow.select_language(language.as_str())?;
        if workflow.state().stage == Stage::Translating {
            ui.start_translating(&language);
            workflow.settle().await;
            ui.finish_ok(&format!("Translated to {}", language));
        }
        info!(language = %language, "Translation finished");
    }
    ui.clear();

    let state = workflow.state();
    if args.json {
        let output = ReviewOutput {
            review: &review,
            translation: state.translation.as_ref(),
            cues: cues.iter().map(ToString::to_string).collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize review")?
        );
        return Ok(());
    }

    let width = report::terminal_width();
    println!("{}", report::review(&review, &cues, width));
    if state.selected_language.is_some() {
        println!();
        println!(
            "{}",
            report::code_pane(
                &report::translated_title(state.selected_language.as_deref()),
                state.translated_code_display(),
                width,
            )
        );
    }
    Ok(())
}

async fn load_document<A: CodeRefineApi + 'static>(
    workflow: &mut Workflow<A>,
    args: &ReviewArgs,
) -> Result<()> {
    match &args.file {
        Some(path) => {
            workflow.load_file(path.clone())?;
            workflow.settle().await;
            // The cause was logged by the workflow.
            if workflow.state().document.path() != Some(path.as_path()) {
                bail!("Could not read {}; nothing to review", path.display());
            }
        }
        None => {
            if !args.stdin && std::io::stdin().is_terminal() {
                bail!("No input. Pass a FILE or pipe code in with --stdin");
            }
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read code from stdin")?;
            workflow.edit(text)?;
        }
    }
    Ok(())
}

/// `--translate` wins, then the interactive picker, then `default_language`.
fn choose_language(config: &RefineConfig, args: &ReviewArgs) -> Result<Option<String>> {
    if let Some(lang) = &args.translate {
        return Ok(Some(lang.clone()));
    }
    if args.select_language {
        return prompt_language();
    }
    Ok(config.default_language().map(str::to_string))
}

fn prompt_language() -> Result<Option<String>> {
    let mut labels: Vec<&str> = SUGGESTED_LANGUAGES.to_vec();
    labels.push("Skip translation");

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Translate to language")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Language selection failed")?;

    Ok(selection
        .and_then(|i| SUGGESTED_LANGUAGES.get(i))
        .map(|l| l.to_string()))
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use coderefine::config::RefineConfig;
use coderefine::logging;

mod cmd;

#[derive(Parser)]
#[command(name = "coderefine")]
#[command(version, about = "AI code review, scoring and translation from the terminal")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Base URL of the analysis service. Overrides CODEREFINE_API_URL and coderefine.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a file (or stdin), show scores and the refined code
    Review {
        /// Source file to review
        file: Option<PathBuf>,

        /// Read the code from stdin instead of a file
        #[arg(long, conflicts_with = "file")]
        stdin: bool,

        /// Translate the refined code into this language
        #[arg(short, long, conflicts_with = "select_language")]
        translate: Option<String>,

        /// Pick the translation language interactively
        #[arg(long)]
        select_language: bool,

        /// Skip the spinner and score animation
        #[arg(long)]
        no_animate: bool,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the suggested translation languages
    Languages,
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default coderefine.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = RefineConfig::with_cli_args(project_dir, cli.verbose, cli.api_url.clone())?;
    let log_file = config.log_file();
    let _log_guard = logging::init(&config.toml.logging, log_file.as_deref(), cli.verbose)?;

    match &cli.command {
        Commands::Review {
            file,
            stdin,
            translate,
            select_language,
            no_animate,
            json,
        } => {
            let args = cmd::ReviewArgs {
                file: file.clone(),
                stdin: *stdin,
                translate: translate.clone(),
                select_language: *select_language,
                animate: !*no_animate && !*json && config.animate(),
                json: *json,
            };
            cmd::cmd_review(&config, args).await?;
        }
        Commands::Languages => cmd::cmd_languages(&config),
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}

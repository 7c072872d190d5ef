//! Layered configuration for CodeRefine.
//!
//! Settings are read from `.coderefine/coderefine.toml` in the project
//! directory, falling back to `coderefine/coderefine.toml` under the user
//! config dir. Environment variables override the file and CLI flags
//! override both (file → environment → CLI).
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//!
//! [display]
//! animate = true
//! default_language = "Rust"
//!
//! [logging]
//! level = "info"
//! json = false
//! file = ".coderefine/logs/coderefine.log"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::SUGGESTED_LANGUAGES;
use crate::api::http::DEFAULT_BASE_URL;

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "CODEREFINE_API_URL";
/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "CODEREFINE_LOG";

pub const CONFIG_DIR: &str = ".coderefine";
pub const CONFIG_FILE: &str = "coderefine.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Analysis service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Animate the score counters and show the spinner
    #[serde(default = "default_animate")]
    pub animate: bool,
    /// Language to translate into after every review, if any
    #[serde(default)]
    pub default_language: Option<String>,
}

fn default_animate() -> bool {
    true
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            animate: default_animate(),
            default_language: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default level when `CODEREFINE_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
    /// Also write logs to this file (relative to the project dir)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file: None,
        }
    }
}

/// Contents of `coderefine.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeRefineToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl CodeRefineToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse coderefine.toml")
    }

    /// Load `coderefine.toml` from `config_dir`, or defaults if it is missing.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize coderefine.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!(
                "Invalid base_url '{}': should start with http:// or https://",
                self.api.base_url
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            warnings.push(format!(
                "Invalid logging level '{}'. Valid values: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let Some(ref lang) = self.display.default_language {
            if lang.trim().is_empty() {
                warnings.push("default_language is set but empty".to_string());
            } else if !SUGGESTED_LANGUAGES
                .iter()
                .any(|s| s.eq_ignore_ascii_case(lang.trim()))
            {
                warnings.push(format!(
                    "default_language '{}' is not one of the suggested languages ({}); it will be sent as-is",
                    lang,
                    SUGGESTED_LANGUAGES.join(", ")
                ));
            }
        }

        warnings
    }
}

/// Where the effective configuration file lives.
///
/// The project-local file wins when present; otherwise the per-user file is
/// used. `None` means neither exists and defaults apply.
pub fn locate_config_dir(project_dir: &Path) -> Option<PathBuf> {
    let local = project_dir.join(CONFIG_DIR);
    if local.join(CONFIG_FILE).exists() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("coderefine");
    user.join(CONFIG_FILE).exists().then_some(user)
}

/// Resolved configuration: `coderefine.toml` merged with environment and CLI.
#[derive(Debug, Clone)]
pub struct RefineConfig {
    pub project_dir: PathBuf,
    /// Directory the TOML came from, if any
    pub config_dir: Option<PathBuf>,
    pub toml: CodeRefineToml,
    pub verbose: bool,
    /// CLI override for the service URL
    pub cli_api_url: Option<String>,
}

impl RefineConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = locate_config_dir(&project_dir);
        let toml = match config_dir {
            Some(ref dir) => CodeRefineToml::load_or_default(dir)?,
            None => CodeRefineToml::default(),
        };

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            verbose: false,
            cli_api_url: None,
        })
    }

    /// Create a RefineConfig with CLI overrides.
    pub fn with_cli_args(
        project_dir: PathBuf,
        verbose: bool,
        api_url: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.verbose = verbose;
        config.cli_api_url = api_url;
        Ok(config)
    }

    /// Service URL (CLI → env → file → default).
    pub fn api_base_url(&self) -> String {
        self.cli_api_url
            .clone()
            .or_else(|| {
                std::env::var(API_URL_ENV)
                    .ok()
                    .filter(|v| !v.trim().is_empty())
            })
            .unwrap_or_else(|| self.toml.api.base_url.clone())
    }

    pub fn animate(&self) -> bool {
        self.toml.display.animate
    }

    pub fn default_language(&self) -> Option<&str> {
        self.toml
            .display
            .default_language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Log file path, resolved against the project dir.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.toml
            .logging
            .file
            .as_ref()
            .map(|f| self.project_dir.join(f))
    }

    /// Path `config init` writes to.
    pub fn project_config_file(&self) -> PathBuf {
        self.project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.toml.validate();
        if let Some(ref url) = self.cli_api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            warnings.push(format!(
                "Invalid --api-url '{}': should start with http:// or https://",
                url
            ));
        }
        warnings
    }
}

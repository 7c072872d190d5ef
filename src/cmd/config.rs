//! Configuration view and validation commands: `coderefine config`.

use anyhow::{Context, Result};

use super::super::ConfigCommands;
use coderefine::config::{CONFIG_FILE, CodeRefineToml, RefineConfig};

pub fn cmd_config(config: &RefineConfig, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => show(config),
        Some(ConfigCommands::Validate) => validate(config),
        Some(ConfigCommands::Init) => init(config)?,
    }
    Ok(())
}

fn show(config: &RefineConfig) {
    println!();
    println!("CodeRefine Configuration");
    println!("========================");
    println!();

    match &config.config_dir {
        Some(dir) => println!("Config file: {}", dir.join(CONFIG_FILE).display()),
        None => {
            println!("No {} found. Using default configuration.", CONFIG_FILE);
            println!("Run 'coderefine config init' to create one.");
        }
    }
    println!();

    let toml = &config.toml;
    println!("[api]");
    println!("  base_url = \"{}\"", toml.api.base_url);
    println!();

    println!("[display]");
    println!("  animate = {}", toml.display.animate);
    if let Some(lang) = &toml.display.default_language {
        println!("  default_language = \"{}\"", lang);
    }
    println!();

    println!("[logging]");
    println!("  level = \"{}\"", toml.logging.level);
    println!("  json = {}", toml.logging.json);
    if let Some(file) = &toml.logging.file {
        println!("  file = \"{}\"", file.display());
    }
    println!();

    println!("Effective values (with env/CLI overrides):");
    println!("  base_url = \"{}\"", config.api_base_url());
    println!();
}

fn validate(config: &RefineConfig) {
    println!();
    println!("Validating configuration...");
    println!();

    if config.config_dir.is_none() {
        println!("No {} found. Using defaults (valid).", CONFIG_FILE);
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid.");
    } else {
        println!("Configuration warnings:");
        for warning in warnings {
            println!("  - {}", warning);
        }
    }
    println!();
}

fn init(config: &RefineConfig) -> Result<()> {
    let config_path = config.project_config_file();
    if config_path.exists() {
        println!(
            "{} already exists at {}",
            CONFIG_FILE,
            config_path.display()
        );
        println!("Delete it first if you want to recreate it.");
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    CodeRefineToml::default().save(&config_path)?;

    println!("Created {} at {}", CONFIG_FILE, config_path.display());
    println!();
    println!("You can now customize:");
    println!("  - [api] base_url");
    println!("  - [display] animate, default_language");
    println!("  - [logging] level, json, file");
    println!();
    Ok(())
}

//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, API_URL_ENV};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("api_url", &ctx.config.api_url);
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("api_url source", API_URL_ENV);
    }
    ctx.output.kv("storage_dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("page_size", &ctx.config.page_size.to_string());

    if !ctx.config.environments.is_empty() {
        ctx.output.blank();
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for name in names {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(ref path) = ctx.config_path else {
        ctx.output.warn("No config file found. Using defaults.");
        ctx.output.info("Run `atelier config init` to create one.");
        return Ok(());
    };

    ctx.output.info(&format!("Validating {}...", path.display()));
    let config = CliConfig::load(&path.to_string_lossy())?;
    config.validate()?;

    let mut names: Vec<&String> = config.environments.keys().collect();
    names.sort();
    for name in names {
        config.for_environment(name)?.validate()?;
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}

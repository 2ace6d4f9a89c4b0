//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopfloorConfig, API_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force, format } => init_config(force, &format, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("(overridden by)", API_URL_ENV);
    }

    ctx.output.info("[session]");
    ctx.output
        .kv("token_file", &ctx.config.token_path().display().to_string());
    match ctx.config.session.ttl_secs {
        Some(ttl) => ctx.output.kv("ttl_secs", &ttl.to_string()),
        None => ctx.output.kv("ttl_secs", "none"),
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) if ctx.output.is_json() => {
            ctx.output.json(&serde_json::json!({ "path": path }));
        }
        Some(path) => println!("{}", path.display()),
        None => bail!("No config file found. Run `shopfloor config init` to create one."),
    }
    Ok(())
}

fn init_config(force: bool, format: &str, ctx: &Context) -> Result<()> {
    let config_path = match format {
        "toml" => ctx.cwd.join("shopfloor.toml"),
        "json" => ctx.cwd.join("shopfloor.json"),
        other => bail!("Unknown config format '{}', expected toml or json", other),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if format == "json" {
        ShopfloorConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

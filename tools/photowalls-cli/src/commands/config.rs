//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use photowalls_commerce::shop::Shop;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, DEFAULT_CONFIG_FILE};
use crate::context::Context;
use crate::output::format_bytes;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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
    ctx.output.kv("source", &ctx.source.describe());
    println!();
    print!("{}", ctx.config.to_toml_string()?);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");
    ctx.output.kv("source", &ctx.source.describe());

    let shop = match Shop::from_config(&ctx.config) {
        Ok(shop) => shop,
        Err(e) => {
            ctx.output.error(&format!("Error: {}", e));
            bail!("Configuration is invalid");
        }
    };

    let mut warnings: Vec<String> = Vec::new();
    if shop.catalog.is_empty() {
        warnings.push("no products defined; the catalog will be empty".to_string());
    }
    if shop.promos.codes().is_empty() {
        warnings.push("no promo codes defined".to_string());
    }
    for offer in &shop.account.offers {
        if !offer.is_redeemable(&shop.promos) {
            warnings.push(format!(
                "account offer {} is advertised but not a promo code",
                offer.code
            ));
        }
    }
    if let Some(limit) = shop.uploads.max_bytes {
        if limit < shop.uploads.hint_bytes {
            warnings.push(format!(
                "uploads.max_bytes ({}) is below the advertised {}",
                format_bytes(limit),
                format_bytes(shop.uploads.hint_bytes)
            ));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": true,
            "products": shop.catalog.len(),
            "promo_codes": shop.promos.codes().len(),
            "orders": shop.orders.len(),
            "warnings": warnings,
        }));
        return Ok(());
    }

    ctx.output.kv("products", &shop.catalog.len().to_string());
    ctx.output.kv("categories", &(shop.catalog.categories().len() - 1).to_string());
    ctx.output.kv("promo codes", &shop.promos.codes().len().to_string());
    ctx.output.kv("orders", &shop.orders.len().to_string());

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}

//! CLI command implementations.

pub mod account;
pub mod catalog;
pub mod config;
pub mod orders;
pub mod product;
pub mod quote;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show one category tab (e.g. "Nature").
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Catalog item as `id:size:material` (repeatable).
    #[arg(short, long = "item", value_name = "ID:SIZE:MATERIAL")]
    pub items: Vec<String>,

    /// Custom print from an image file as `path:size:material` (repeatable).
    #[arg(short, long = "upload", value_name = "PATH:SIZE:MATERIAL")]
    pub uploads: Vec<String>,

    /// Promo code to apply.
    #[arg(short, long)]
    pub promo: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the active store configuration.
    Show,
    /// Write the built-in store to photowalls.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the store configuration.
    Validate,
}

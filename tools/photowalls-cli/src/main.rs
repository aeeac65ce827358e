//! PhotoWalls CLI - browse the wallpaper storefront from the terminal.
//!
//! Commands:
//! - `photowalls catalog` - List products, optionally one category
//! - `photowalls categories` - List catalog tabs
//! - `photowalls product` - Show one product
//! - `photowalls quote` - Price a cart, including custom prints and promo codes
//! - `photowalls orders` - Show order history
//! - `photowalls account` - Show the customer profile and offers
//! - `photowalls config` - Manage the store configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, ConfigArgs, ProductArgs, QuoteArgs};

/// PhotoWalls CLI - photo wallpaper storefront
#[derive(Parser)]
#[command(name = "photowalls")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(CatalogArgs),

    /// List catalog categories
    Categories,

    /// Show product details
    Product(ProductArgs),

    /// Price a cart
    Quote(QuoteArgs),

    /// Show order history
    Orders,

    /// Show the account page
    Account,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Categories => commands::catalog::categories(&ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Orders => commands::orders::run(&ctx),
        Commands::Account => commands::account::run(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

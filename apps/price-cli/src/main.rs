//! storefront-price - quote storefront prices from a catalog snapshot.
//!
//! Commands:
//! - `storefront-price context` - Show the resolved country and currency
//! - `storefront-price product <id>` - Resolve a product price
//! - `storefront-price size <id> <size>` - Resolve a size price
//! - `storefront-price bundle <code>` - Resolve a bundle/carousel price
//! - `storefront-price coupon <code>` - Resolve a coupon discount
//! - `storefront-price currencies` - List selectable currencies
//!
//! ```text
//! storefront-price --snapshot catalog.json --locale en-IN product tee
//! storefront-price --snapshot catalog.json --country China bundle TRIO
//! storefront-price --snapshot catalog.json --currency USD --json coupon SAVE10 --price 49.99
//! ```

mod commands;
mod config;
mod error;
mod output;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_core::LocaleHints;
use tracing_subscriber::EnvFilter;

use commands::Session;
use output::Output;
use snapshot::CatalogSnapshot;

/// Quote storefront prices the way a given customer would see them
#[derive(Parser)]
#[command(name = "storefront-price")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog snapshot (JSON with registry, products, promotions)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Currency the customer picked manually
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Detected country name
    #[arg(long, global = true)]
    country: Option<String>,

    /// Detected country code
    #[arg(long, global = true)]
    country_code: Option<String>,

    /// Browser locale, e.g. en-IN
    #[arg(long, global = true)]
    locale: Option<String>,

    /// IANA timezone, e.g. Asia/Kolkata
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Pricing config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved pricing context
    Context,

    /// Resolve the price of a product
    Product {
        /// Product id
        id: String,
    },

    /// Resolve the price of one size of a product
    Size {
        /// Product id
        id: String,
        /// Size label (exact match)
        size: String,
    },

    /// Resolve a bundle or carousel promotion
    Bundle {
        /// Promotion code (case-insensitive)
        code: String,
    },

    /// Resolve a coupon discount
    Coupon {
        /// Promotion code (case-insensitive)
        code: String,
        /// Apply the coupon to this price
        #[arg(long)]
        price: Option<Decimal>,
    },

    /// List currencies a customer can pick
    Currencies,
}

impl Cli {
    fn hints(&self) -> LocaleHints {
        LocaleHints {
            country: self.country.clone(),
            country_code: self.country_code.clone(),
            locale: self.locale.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings = config::load(cli.config.as_deref()).context("loading pricing config")?;
    let snapshot = CatalogSnapshot::load(cli.snapshot.as_deref())?;

    let session = Session::new(
        settings,
        snapshot,
        cli.currency.as_deref(),
        &cli.hints(),
        Output::new(cli.json),
    );

    match &cli.command {
        Commands::Context => commands::context(&session),
        Commands::Product { id } => commands::product(&session, id),
        Commands::Size { id, size } => commands::size(&session, id, size),
        Commands::Bundle { code } => commands::bundle(&session, code),
        Commands::Coupon { code, price } => commands::coupon(&session, code, *price),
        Commands::Currencies => commands::currencies(&session),
    }
}

/// Initializes logging to stderr; stdout carries results only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` when set, otherwise warnings plus storefront info.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

const DEFAULT_LOG_FILTER: &str = "warn,storefront=info";

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rent_core::ClampPolicy;
use rust_decimal::Decimal;
use tokio::io::BufReader;
use tracing::{debug, info};

use rent_ui::app::{self, ListingOverrides};
use rent_ui::settings::Settings;
use rent_ui::utils::parse_amount;
use rent_ui::{ConversionDriver, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Deposit/rent converter for convertible rental listings.
///
/// Loads a listing's convertible price range from flags, a listings CSV, or
/// a settings file, then lets you trade deposit against monthly rent at the
/// fixed 3% rate. Commands are read from stdin (type `help`).
#[derive(Debug, Parser)]
#[command(name = "rent-converter", version, about, long_about = None)]
struct Cli {
    /// Minimum deposit of the convertible range.
    #[arg(long, value_parser = parse_amount)]
    min_deposit: Option<Decimal>,

    /// Maximum deposit of the convertible range.
    #[arg(long, value_parser = parse_amount)]
    max_deposit: Option<Decimal>,

    /// Monthly rent charged at the maximum deposit.
    #[arg(long, value_parser = parse_amount)]
    monthly_rent: Option<Decimal>,

    /// Deposit shown when the converter opens (defaults to the maximum).
    #[arg(long, value_parser = parse_amount)]
    initial_deposit: Option<Decimal>,

    /// Treat the listing as not convertible.
    #[arg(long, default_value_t = false)]
    not_convertible: bool,

    /// CSV file of listing price records.
    #[arg(long, requires = "listing_id")]
    listings: Option<PathBuf>,

    /// Listing to open from the CSV file.
    #[arg(long, requires = "listings")]
    listing_id: Option<String>,

    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clamp deposits derived from rent edits to the range as well.
    #[arg(long, default_value_t = false)]
    clamp_rent: bool,

    /// Log filter, e.g. `debug` or `warn,rent_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let level = cli.log_level.as_deref().or(settings.logging.level.as_deref());
    logging::init_logging(level)?;
    if let Some(path) = cli.log_file.as_ref().or(settings.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    let base = match (&cli.listings, &cli.listing_id) {
        (Some(path), Some(listing_id)) => {
            let records = csv_loader::load_from_file(path)
                .with_context(|| format!("Failed to load listings: {}", path.display()))?;
            debug!(count = records.len(), "listings loaded");
            Some(csv_loader::find_listing(records, listing_id)?.price)
        }
        _ => settings.listing.clone(),
    };

    let overrides = ListingOverrides {
        min_deposit: cli.min_deposit,
        max_deposit: cli.max_deposit,
        monthly_rent: cli.monthly_rent,
        initial_deposit: cli.initial_deposit,
        not_convertible: cli.not_convertible,
    };
    let listing = app::resolve_listing(base, &overrides);

    let clamp_policy = if cli.clamp_rent {
        ClampPolicy::Both
    } else {
        settings.converter.clamp_policy
    };

    info!(?clamp_policy, "opening converter");
    let driver = ConversionDriver::new(app::mount_converter(&listing, clamp_policy));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout().lock();
    app::run_session(driver, stdin, &mut stdout).await
}

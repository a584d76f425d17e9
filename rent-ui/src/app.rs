//! Interactive converter session.
//!
//! The session plays the role of the listing detail view: it mounts a
//! converter for one listing, relays typed edits to the
//! [`ConversionDriver`], redraws while a transition runs, and tears the
//! driver down when input ends.

use std::io::Write;

use anyhow::{Context, Result};
use rent_core::converter::EditOutcome;
use rent_core::{ClampPolicy, ConverterCallbacks, DepositRentConverter, ListingPrice};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::driver::ConversionDriver;
use crate::logging;
use crate::utils::coerce_amount;
use crate::view::{progress_bar, render_text};

const HELP: &str = "\
Commands:
  deposit <amount>   set the deposit (clamped to the listing range)
  rent <amount>      set the monthly rent
  show               redraw the converter
  log <filter>       change the log filter (e.g. debug)
  help               show this help
  quit               leave";

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Deposit(Decimal),
    Rent(Decimal),
    Show,
    Log(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`. Amounts that are not
    /// numbers are coerced to 0, as an edit field would.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        Some(match word.to_ascii_lowercase().as_str() {
            "deposit" | "d" => Self::Deposit(coerce_amount(rest)),
            "rent" | "r" => Self::Rent(coerce_amount(rest)),
            "show" | "s" => Self::Show,
            "log" => Self::Log(rest.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        })
    }
}

/// Individual listing fields given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingOverrides {
    pub min_deposit: Option<Decimal>,
    pub max_deposit: Option<Decimal>,
    pub monthly_rent: Option<Decimal>,
    pub initial_deposit: Option<Decimal>,
    pub not_convertible: bool,
}

impl ListingOverrides {
    fn any_amount(&self) -> bool {
        self.min_deposit.is_some()
            || self.max_deposit.is_some()
            || self.monthly_rent.is_some()
            || self.initial_deposit.is_some()
    }
}

/// Combines a loaded listing (CSV row or settings file) with command-line
/// overrides.
///
/// Listings assembled purely from the command line are convertible unless
/// `not_convertible` is set.
pub fn resolve_listing(
    base: Option<ListingPrice>,
    overrides: &ListingOverrides,
) -> ListingPrice {
    let mut listing = match base {
        Some(listing) => listing,
        None => ListingPrice {
            is_price_convertible: overrides.any_amount(),
            ..ListingPrice::default()
        },
    };

    if overrides.min_deposit.is_some() {
        listing.min_deposit = overrides.min_deposit;
    }
    if overrides.max_deposit.is_some() {
        listing.max_deposit = overrides.max_deposit;
    }
    if overrides.monthly_rent.is_some() {
        listing.monthly_rent = overrides.monthly_rent;
    }
    if overrides.initial_deposit.is_some() {
        listing.initial_deposit = overrides.initial_deposit;
    }
    if overrides.not_convertible {
        listing.is_price_convertible = false;
    }
    listing
}

/// Builds the converter for `listing`, logging every committed value.
pub fn mount_converter(
    listing: &ListingPrice,
    clamp_policy: ClampPolicy,
) -> DepositRentConverter {
    let callbacks = ConverterCallbacks::new()
        .on_deposit_change(|min, max| info!(%min, %max, "deposit changed"))
        .on_rent_change(|rent| info!(%rent, "rent changed"));

    DepositRentConverter::new(listing)
        .with_clamp_policy(clamp_policy)
        .with_callbacks(callbacks)
}

fn draw<W: Write>(
    driver: &ConversionDriver,
    out: &mut W,
) -> Result<()> {
    if let Some(view) = driver.render() {
        writeln!(out, "{}\n", render_text(&view))?;
    }
    Ok(())
}

/// Runs the session until `quit` or end of input.
///
/// At end of input a running transition is allowed to finish so piped
/// scripts see the committed values; `quit` tears down immediately.
pub async fn run_session<R, W>(
    mut driver: ConversionDriver,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !driver.is_convertible() {
        info!("listing price is not convertible; nothing to display");
        return Ok(());
    }

    let mut lines = input.lines();
    let mut updates = driver.subscribe();
    draw(&driver, out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    driver.settled().await;
                    draw(&driver, out)?;
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                debug!(?command, "command received");
                match command {
                    Command::Deposit(amount) => {
                        if driver.set_deposit(amount) == EditOutcome::Committed {
                            draw(&driver, out)?;
                        }
                    }
                    Command::Rent(amount) => {
                        if driver.set_rent(amount) == EditOutcome::Committed {
                            draw(&driver, out)?;
                        }
                    }
                    Command::Show => draw(&driver, out)?,
                    Command::Log(filter) => {
                        if let Err(error) = logging::set_log_level(&filter) {
                            warn!(%error, "log filter unchanged");
                        }
                    }
                    Command::Help => writeln!(out, "{HELP}")?,
                    Command::Quit => break,
                    Command::Unknown(text) => {
                        writeln!(out, "unknown command '{text}' (type 'help')")?;
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *updates.borrow_and_update();
                if state.is_converting {
                    if state.progress > 0 {
                        writeln!(out, "Converting     {}", progress_bar(state.progress))?;
                    }
                } else {
                    draw(&driver, out)?;
                }
            }
        }
    }

    driver.shutdown();
    out.flush()?;
    Ok(())
}

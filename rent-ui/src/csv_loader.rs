//! CSV loader for listing price records.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column                 | Required | Type    | Notes |
//! |------------------------|----------|---------|-------|
//! | `listing_id`           | yes      | string  | Unique per file |
//! | `min_deposit`          | no       | decimal | Leave cell empty for `None` |
//! | `max_deposit`          | no       | decimal | Leave cell empty for `None` |
//! | `monthly_rent`         | no       | decimal | Leave cell empty for `None` |
//! | `initial_deposit`      | no       | decimal | Leave cell empty for `None` |
//! | `is_price_convertible` | no       | bool    | `true` / `false`, empty means `false` |
//!
//! ### Example
//!
//! ```csv
//! listing_id,min_deposit,max_deposit,monthly_rent,initial_deposit,is_price_convertible
//! apt-12,500000000,900000000,3000000,,true
//! shop-3,,,,,false
//! ```
use rent_core::{ConversionConfig, ConversionConfigError, ListingPrice};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    listing_id: String,
    min_deposit: Option<Decimal>,
    max_deposit: Option<Decimal>,
    monthly_rent: Option<Decimal>,
    initial_deposit: Option<Decimal>,
    is_price_convertible: Option<bool>,
}

/// One listing's identifier and price fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub listing_id: String,
    pub price: ListingPrice,
}

/// Errors that can occur while loading listing records.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A convertible listing has an inconsistent price range. `row` is
    /// 1-based (header = row 0).
    #[error("listing '{listing_id}' on row {row}: {source}")]
    InvalidRange {
        listing_id: String,
        row: usize,
        #[source]
        source: ConversionConfigError,
    },

    #[error("listing '{listing_id}' appears on rows {first_row} and {row}")]
    DuplicateListing {
        listing_id: String,
        first_row: usize,
        row: usize,
    },

    #[error("listing '{0}' not found")]
    ListingNotFound(String),
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ListingRecord, CsvLoadError> {
    let price = ListingPrice {
        min_deposit: row.min_deposit,
        max_deposit: row.max_deposit,
        monthly_rent: row.monthly_rent,
        initial_deposit: row.initial_deposit,
        is_price_convertible: row.is_price_convertible.unwrap_or(false),
    };

    if price.is_price_convertible
        && let Some(config) = ConversionConfig::from_listing_price(&price)
    {
        config
            .validate()
            .map_err(|source| CsvLoadError::InvalidRange {
                listing_id: row.listing_id.clone(),
                row: row_number,
                source,
            })?;
    }

    Ok(ListingRecord {
        listing_id: row.listing_id,
        price,
    })
}

/// Parse CSV text and return listing records in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – structurally invalid CSV or a bad cell.
/// * [CsvLoadError::InvalidRange] – a convertible listing whose range fails
///   validation.
/// * [CsvLoadError::DuplicateListing] – the same `listing_id` twice.
pub fn load_from_str(input: &str) -> Result<Vec<ListingRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let mut records: Vec<ListingRecord> = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row_number = idx + 1;
        let record = convert_row(result?, row_number)?;

        if let Some(first) = records
            .iter()
            .position(|r| r.listing_id == record.listing_id)
        {
            return Err(CsvLoadError::DuplicateListing {
                listing_id: record.listing_id,
                first_row: first + 1,
                row: row_number,
            });
        }
        records.push(record);
    }

    debug!(count = records.len(), "listing records loaded");
    Ok(records)
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &std::path::Path) -> Result<Vec<ListingRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Picks the record with `listing_id` out of `records`.
pub fn find_listing(
    records: Vec<ListingRecord>,
    listing_id: &str,
) -> Result<ListingRecord, CsvLoadError> {
    records
        .into_iter()
        .find(|r| r.listing_id == listing_id)
        .ok_or_else(|| CsvLoadError::ListingNotFound(listing_id.to_string()))
}

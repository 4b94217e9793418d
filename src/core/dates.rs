//! Date format contract and shelf-life arithmetic
//!
//! Every date column in the store is TEXT in `YYYY-MM-DD` form. Because the
//! format is fixed-width with most-significant fields first, lexical and
//! chronological ordering coincide, so the store compares dates as plain
//! strings. Parsing happens only where day arithmetic is required.

use chrono::{Duration, NaiveDate};

/// The single date format used everywhere a date is stored or compared.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Far-future sentinel used for `fallback_expiration` on pantry rows.
pub const FALLBACK_EXPIRATION: &str = "2030-01-01";

/// Format a date per the store's format contract.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string back into a date.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// Compute a concrete expiration date from a shelf life in days.
pub fn expiration_from_shelf_life(today: NaiveDate, shelf_life_days: i64) -> String {
    format_date(today + Duration::days(shelf_life_days))
}

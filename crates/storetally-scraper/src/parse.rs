//! Text-to-number conversions for on-screen labels.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScrapeError;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digits regex"));

/// Extracts the first run of ASCII digits from a label like `"12 stores"`.
///
/// # Errors
///
/// Returns [`ScrapeError::TotalCountMissing`] if the label has no digits or
/// the digits overflow `usize`.
pub fn parse_total_count(text: &str) -> Result<usize, ScrapeError> {
    DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(|| ScrapeError::TotalCountMissing {
            text: text.to_owned(),
        })
}

/// Parses a currency-formatted sales figure: `"¥1,234"` → `1234`.
///
/// Only the yen sign and thousands separators are stripped; anything else left
/// over makes the value invalid.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidSales`] if what remains is not an integer.
pub fn parse_sales(store: &str, raw: &str) -> Result<i64, ScrapeError> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '¥' | ',')).collect();
    cleaned
        .trim()
        .parse::<i64>()
        .map_err(|_| ScrapeError::InvalidSales {
            store: store.to_owned(),
            raw: raw.to_owned(),
        })
}

/// Parses an order count label, which carries digits only.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidOrderCount`] if the label is not an integer.
pub fn parse_order_count(store: &str, raw: &str) -> Result<i64, ScrapeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ScrapeError::InvalidOrderCount {
            store: store.to_owned(),
            raw: raw.to_owned(),
        })
}

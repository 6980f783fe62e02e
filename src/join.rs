//! Join purchases and sales to a product and restrict them to a date window.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{MarginError, Result};
use crate::models::{DateWindow, PricedRecord, PurchaseRecord, SaleRecord};
use crate::parse::{is_epoch_zero, try_parse_date, try_parse_date_lenient};

/// Look up the purchase and sale rows for a product code.
///
/// The code is trimmed before lookup. An unknown code yields two empty slices.
pub fn join<'a>(
    code: &str,
    purchases: &'a HashMap<String, Vec<PurchaseRecord>>,
    sales: &'a HashMap<String, Vec<SaleRecord>>,
) -> (&'a [PurchaseRecord], &'a [SaleRecord]) {
    let code = code.trim();
    (
        purchases.get(code).map(Vec::as_slice).unwrap_or_default(),
        sales.get(code).map(Vec::as_slice).unwrap_or_default(),
    )
}

/// Records whose date falls inside `window` (both ends inclusive).
///
/// Records without a usable date never match a window.
pub fn filter_by_window<'a, T: PricedRecord>(records: &'a [T], window: &DateWindow) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| !is_epoch_zero(r.date()) && window.contains(r.date()))
        .collect()
}

// ---------------------------------------------------------------------------
// Window parsing
// ---------------------------------------------------------------------------

const DATE_FORMAT_HINT: &str = "Exemplo: 24.06.2025 ou 24/06/2025 ou 24-06-2025";

/// Build an optional window from the `dataInicio` / `dataFim` query values.
///
/// Blank values count as absent. Neither present means no window. Exactly
/// one present, or either failing to parse as a day-first date, is an
/// [`MarginError::InvalidDateRange`].
pub fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<Option<DateWindow>> {
    parse_window_with(start, end, try_parse_date)
}

/// Like [`parse_window`], also accepting year-first `YYYY-MM-DD` bounds.
pub fn parse_window_lenient(start: Option<&str>, end: Option<&str>) -> Result<Option<DateWindow>> {
    parse_window_with(start, end, try_parse_date_lenient)
}

fn parse_window_with(
    start: Option<&str>,
    end: Option<&str>,
    parse: fn(&str) -> Option<NaiveDate>,
) -> Result<Option<DateWindow>> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    match (start, end) {
        (None, None) => Ok(None),
        (Some(_), None) | (None, Some(_)) => Err(MarginError::InvalidDateRange(
            "Informe dataInicio e dataFim juntos.".to_string(),
        )),
        (Some(s), Some(e)) => {
            let bound = |raw: &str| {
                parse(raw).filter(|d| !is_epoch_zero(*d)).ok_or_else(|| {
                    MarginError::InvalidDateRange(format!(
                        "Formato de data inválido: '{raw}'. {DATE_FORMAT_HINT}"
                    ))
                })
            };
            Ok(Some(DateWindow::new(bound(s)?, bound(e)?)))
        }
    }
}

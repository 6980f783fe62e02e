//! Tolerant parsers for the raw text found in the source tables.
//!
//! Source exports are hand-maintained spreadsheets, so malformed cells are
//! expected. The public `parse_*` functions are total: a bad number becomes
//! `0.0` and a bad date becomes [`epoch_zero()`]. The `try_parse_*` variants
//! expose whether the value was actually valid.

use chrono::NaiveDate;

/// Sentinel returned by [`parse_date`] when the input is not a date
/// (1970-01-01).
///
/// Compare with [`is_epoch_zero`] rather than treating it as a real day.
pub fn epoch_zero() -> NaiveDate {
    NaiveDate::default()
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Parse a locale-formatted decimal (`"12,50"`), defaulting to `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    try_parse_number(raw).unwrap_or(0.0)
}

/// Parse a locale-formatted decimal.
///
/// The first `,` is read as the decimal point. Like a spreadsheet import,
/// the longest numeric prefix wins, so `"10,5 un"` reads as `10.5`. Returns
/// `None` when no digits lead the value or the result is not finite.
pub fn try_parse_number(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized);
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return "";
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    &s[..end]
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a day-first date (`24.06.2025`, `24/06/2025`, `24-06-2025`),
/// defaulting to [`epoch_zero()`].
pub fn parse_date(raw: &str) -> NaiveDate {
    try_parse_date(raw).unwrap_or_else(epoch_zero)
}

/// Parse a day-first date. `-` and `/` are accepted as separators in place
/// of `.`. The order is always day, month, year; `13.01.2025` is the 13th of
/// January and `01.13.2025` is rejected.
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    let [day, month, year] = split_date(raw)?;
    build_date(year, month, day)
}

/// Like [`try_parse_date`], but a four-digit leading segment is read as
/// year-first (`2025-06-24`). A four-digit day is never valid day-first, so
/// this accepts a strict superset of [`try_parse_date`].
pub fn try_parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let parts = split_date(raw)?;
    if parts[0].len() == 4 {
        let [year, month, day] = parts;
        build_date(year, month, day)
    } else {
        let [day, month, year] = parts;
        build_date(year, month, day)
    }
}

/// Whether `date` is the "no date" sentinel.
pub fn is_epoch_zero(date: NaiveDate) -> bool {
    date == epoch_zero()
}

fn split_date(raw: &str) -> Option<[&str; 3]> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut parts = trimmed.split(['.', '-', '/']);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let all_digits = [first, second, third]
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    all_digits.then_some([first, second, third])
}

fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    if year.len() != 4 || month.len() > 2 || day.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

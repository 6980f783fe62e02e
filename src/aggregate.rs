//! Reduce a product's rows to one representative price.

use crate::join::filter_by_window;
use crate::models::{DateWindow, PricePoint, PricedRecord};

/// How rows are reduced to a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Price of the most recent row.
    Latest,
    /// Plain mean of the prices of rows inside the window.
    WindowedAverage(DateWindow),
}

impl Strategy {
    /// `WindowedAverage` when a window was requested, `Latest` otherwise.
    pub fn for_window(window: Option<&DateWindow>) -> Self {
        match window {
            Some(w) => Strategy::WindowedAverage(*w),
            None => Strategy::Latest,
        }
    }
}

/// The most recent record.
///
/// Ordered by date; among equal dates the one later in the file wins.
/// Undated rows carry the epoch-zero sentinel and so lose to any dated row.
pub fn latest<T: PricedRecord>(records: &[T]) -> Option<&T> {
    records
        .iter()
        .enumerate()
        .max_by_key(|(i, r)| (r.date(), *i))
        .map(|(_, r)| r)
}

/// Records ordered newest first, using the same tie-break as [`latest`].
pub fn newest_first<'a, T: PricedRecord + 'a>(records: impl IntoIterator<Item = &'a T>) -> Vec<&'a T> {
    let mut ordered: Vec<(usize, &T)> = records.into_iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.date().cmp(&a.date()).then(ib.cmp(ia)));
    ordered.into_iter().map(|(_, r)| r).collect()
}

/// Price of the [`latest`] record, `0.0` when there are none.
pub fn latest_price<T: PricedRecord>(records: &[T]) -> f64 {
    latest(records).map(PricedRecord::price).unwrap_or(0.0)
}

/// Arithmetic mean of the prices, `0.0` when there are none.
pub fn average_price<T: PricedRecord>(records: &[&T]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| r.price()).sum();
    sum / records.len() as f64
}

/// Reduce `records` with `strategy`.
pub fn aggregate<T: PricedRecord>(records: &[T], strategy: &Strategy) -> f64 {
    match strategy {
        Strategy::Latest => latest_price(records),
        Strategy::WindowedAverage(window) => average_price(&filter_by_window(records, window)),
    }
}

/// Purchase and sale prices, each reduced independently.
pub fn price_point<P: PricedRecord, S: PricedRecord>(
    purchases: &[P],
    sales: &[S],
    strategy: &Strategy,
) -> PricePoint {
    PricePoint {
        purchase_price: aggregate(purchases, strategy),
        sale_price: aggregate(sales, strategy),
    }
}

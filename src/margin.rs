//! Markup and profit-margin arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{MarginResult, PricePoint, Product};

/// `(sale - purchase) / purchase * 100`, or `0.0` unless `purchase > 0`.
pub fn markup(purchase: f64, sale: f64) -> f64 {
    if purchase > 0.0 {
        (sale - purchase) / purchase * 100.0
    } else {
        0.0
    }
}

/// `(sale - purchase) / sale * 100`, or `0.0` unless `sale > 0`.
pub fn profit_margin(purchase: f64, sale: f64) -> f64 {
    if sale > 0.0 {
        (sale - purchase) / sale * 100.0
    } else {
        0.0
    }
}

/// Round to two decimals, halves away from zero. Never returns `-0.0`.
///
/// Rounds the exact decimal value of the stored `f64`, so `1.115` (stored as
/// `1.11499999...`) becomes `1.11`, the same as fixed-point formatting.
/// Values outside the `Decimal` range are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let rounded = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Assemble the response row for `product` from its price point.
///
/// Margins are derived from the unrounded prices; every field is rounded
/// only at the end.
pub fn margin_result(product: &Product, point: PricePoint) -> MarginResult {
    let PricePoint {
        purchase_price,
        sale_price,
    } = point;
    MarginResult {
        product_code: product.code.clone(),
        product_name: product.name.clone(),
        purchase_price: round2(purchase_price),
        sale_price: round2(sale_price),
        markup: round2(markup(purchase_price, sale_price)),
        profit_margin: round2(profit_margin(purchase_price, sale_price)),
    }
}

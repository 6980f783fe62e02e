use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PricedRecord — Common view over purchase and sale rows
// ---------------------------------------------------------------------------

/// A dated price observation for a product.
///
/// Implemented by both [`PurchaseRecord`] and [`SaleRecord`] so the filter
/// and aggregation code is written once.
pub trait PricedRecord {
    fn product_code(&self) -> &str;
    /// Parsed date. The epoch-zero sentinel when the source cell was not a date.
    fn date(&self) -> NaiveDate;
    fn price(&self) -> f64;
}

// ---------------------------------------------------------------------------
// PurchaseRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub product_code: String,
    pub date: NaiveDate,
    /// The date cell exactly as it appeared in the source.
    pub raw_date: String,
    /// Direct unit cost (`CUSTODIRETO_UN_EST`).
    pub unit_cost: f64,
    pub invoice_number: Option<String>,
}

impl PricedRecord for PurchaseRecord {
    fn product_code(&self) -> &str {
        &self.product_code
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn price(&self) -> f64 {
        self.unit_cost
    }
}

// ---------------------------------------------------------------------------
// SaleRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub product_code: String,
    /// Invoice issue date (`DATAEMISSAONF`).
    pub date: NaiveDate,
    pub raw_date: String,
    pub price: f64,
    pub invoice_number: Option<String>,
}

impl PricedRecord for SaleRecord {
    fn product_code(&self) -> &str {
        &self.product_code
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn price(&self) -> f64 {
        self.price
    }
}

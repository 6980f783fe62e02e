use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InvoiceLine — A purchase row as listed on the product detail screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Empty when the row has no invoice number.
    #[serde(rename = "nfNumero")]
    pub invoice_number: String,
    /// `None` when the source date could not be parsed.
    #[serde(rename = "data")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "custo")]
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// SaleLine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(rename = "nfNumero")]
    pub invoice_number: String,
    #[serde(rename = "data")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "preco")]
    pub price: f64,
}

// ---------------------------------------------------------------------------
// ProductDetail — Margin summary plus the rows behind it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: super::MarginResult,
    #[serde(rename = "notasFiscais")]
    pub purchases: Vec<InvoiceLine>,
    #[serde(rename = "vendas")]
    pub sales: Vec<SaleLine>,
}

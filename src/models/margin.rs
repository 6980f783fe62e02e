use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PricePoint — Representative purchase and sale price for one product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "precoCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precoVenda")]
    pub sale_price: f64,
}

// ---------------------------------------------------------------------------
// MarginResult — One product's prices and margins (response entity)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginResult {
    #[serde(rename = "codProduto")]
    pub product_code: String,
    #[serde(rename = "produto")]
    pub product_name: String,
    #[serde(rename = "precoCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precoVenda")]
    pub sale_price: f64,
    /// Percent over purchase price.
    pub markup: f64,
    /// Percent of sale price.
    #[serde(rename = "margemLucro")]
    pub profit_margin: f64,
}

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — One row of the products table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Trimmed product code; the join key for purchases and sales.
    #[serde(rename = "codProduto")]
    pub code: String,
    /// Display name. May be empty.
    #[serde(rename = "produto")]
    pub name: String,
}

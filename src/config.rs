use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MarginError;

pub const PRODUCTS_FILE: &str = "Tabela-Produtos.csv";
pub const PURCHASES_FILE: &str = "Tabela-Compras.csv";
pub const SALES_FILE: &str = "Tabela-Vendas.csv";

pub const DEFAULT_DELIMITER: u8 = b'\t';

// Column headers shared by all three tables.
pub const COL_PRODUCT_CODE: &str = "CODPRODUTO";
pub const COL_INVOICE_NUMBER: &str = "NUMNOTA";

// Products table.
pub const COL_PRODUCT_NAME: &str = "PRODUTO";

// Purchases table.
pub const COL_PURCHASE_DATE: &str = "DATA";
pub const COL_PURCHASE_UNIT_COST: &str = "CUSTODIRETO_UN_EST";

// Sales table.
pub const COL_SALE_DATE: &str = "DATAEMISSAONF";
pub const COL_SALE_PRICE: &str = "PRECO";

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Text encoding of the source tables.
///
/// Deployments differ: some exports are UTF-8, older ERP exports are
/// ISO-8859-1. There is no auto-detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    /// Decode raw file bytes into a string.
    ///
    /// Latin-1 maps every byte to the code point of the same value, so it
    /// cannot fail. UTF-8 fails on invalid sequences. A leading byte-order
    /// mark is dropped in both cases.
    pub fn decode(self, bytes: Vec<u8>) -> std::result::Result<String, std::string::FromUtf8Error> {
        let text = match self {
            Encoding::Utf8 => String::from_utf8(bytes)?,
            Encoding::Latin1 => bytes.into_iter().map(char::from).collect(),
        };
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}

impl FromStr for Encoding {
    type Err = MarginError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(MarginError::InvalidArgument(format!(
                "unknown encoding '{other}' (expected utf-8 or latin1)"
            ))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf-8"),
            Encoding::Latin1 => f.write_str("latin1"),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceConfig
// ---------------------------------------------------------------------------

/// Locations and format of the three source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub products: PathBuf,
    pub purchases: PathBuf,
    pub sales: PathBuf,
    pub encoding: Encoding,
    pub delimiter: u8,
}

impl SourceConfig {
    /// Default file names resolved against `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            products: dir.join(PRODUCTS_FILE),
            purchases: dir.join(PURCHASES_FILE),
            sales: dir.join(SALES_FILE),
            encoding: Encoding::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::in_dir(default_data_dir())
    }
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

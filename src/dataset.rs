//! Immutable in-memory snapshot of the three source tables.
//!
//! A [`Dataset`] is built once from disk (or from records in tests) and never
//! mutated. Purchases and sales are indexed by product code so a join is a
//! hash lookup.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{
    SourceConfig, COL_INVOICE_NUMBER, COL_PRODUCT_CODE, COL_PRODUCT_NAME, COL_PURCHASE_DATE,
    COL_PURCHASE_UNIT_COST, COL_SALE_DATE, COL_SALE_PRICE,
};
use crate::error::Result;
use crate::join;
use crate::models::{PricedRecord, Product, PurchaseRecord, SaleRecord};
use crate::parse::{parse_date, parse_number};
use crate::queries::{DetailQuery, MarginQuery, ProductQuery};
use crate::source::{field, index, RawRow, TableSource};

// ---------------------------------------------------------------------------
// DatasetStats
// ---------------------------------------------------------------------------

/// Row counts and load time of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub products: usize,
    pub purchases: usize,
    pub sales: usize,
    pub loaded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Products plus purchase and sale rows grouped by product code.
#[derive(Debug, Clone)]
pub struct Dataset {
    products: Vec<Product>,
    positions: HashMap<String, usize>,
    purchases: HashMap<String, Vec<PurchaseRecord>>,
    sales: HashMap<String, Vec<SaleRecord>>,
    purchase_count: usize,
    sale_count: usize,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Read all three tables described by `config` and index them.
    ///
    /// Fails if any table cannot be read; there is no partial dataset.
    pub fn load(config: &SourceConfig) -> Result<Self> {
        let table = |path: &Path| {
            TableSource::new(path)
                .encoding(config.encoding)
                .delimiter(config.delimiter)
        };

        let products = table(&config.products).load_with_columns(&[COL_PRODUCT_CODE])?;
        let purchases = table(&config.purchases).load_with_columns(&[COL_PRODUCT_CODE])?;
        let sales = table(&config.sales).load_with_columns(&[COL_PRODUCT_CODE])?;

        let dataset = Self::from_records(
            products_from_rows(&products),
            purchases.iter().map(purchase_from_row).collect(),
            sales.iter().map(sale_from_row).collect(),
        );
        info!(
            "loaded {} products, {} purchases, {} sales ({})",
            dataset.products.len(),
            dataset.purchase_count,
            dataset.sale_count,
            config.encoding
        );
        Ok(dataset)
    }

    /// Build a dataset from already-typed records.
    ///
    /// Products with an empty code are skipped. When a code repeats, the
    /// first product row wins and later ones are dropped.
    pub fn from_records(
        products: Vec<Product>,
        purchases: Vec<PurchaseRecord>,
        sales: Vec<SaleRecord>,
    ) -> Self {
        let mut unique = Vec::with_capacity(products.len());
        let mut positions = HashMap::with_capacity(products.len());
        for mut product in products {
            product.code = product.code.trim().to_string();
            if product.code.is_empty() {
                continue;
            }
            if positions.contains_key(&product.code) {
                debug!("duplicate product code {}; keeping first row", product.code);
                continue;
            }
            positions.insert(product.code.clone(), unique.len());
            unique.push(product);
        }

        let purchase_count = purchases.len();
        let sale_count = sales.len();
        Self {
            products: unique,
            positions,
            purchases: index(purchases, |p| p.product_code()),
            sales: index(sales, |s| s.product_code()),
            purchase_count,
            sale_count,
            loaded_at: Utc::now(),
        }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the margin query interface.
    pub fn margins(&self) -> MarginQuery<'_> {
        MarginQuery::new(self)
    }

    /// Access the product lookup interface.
    pub fn products(&self) -> ProductQuery<'_> {
        ProductQuery::new(self)
    }

    /// Access the per-product detail interface.
    pub fn details(&self) -> DetailQuery<'_> {
        DetailQuery::new(self)
    }

    // -- Raw access --------------------------------------------------------

    /// All products in file order, one per code.
    pub fn product_list(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by (trimmed) code.
    pub fn product(&self, code: &str) -> Option<&Product> {
        self.positions
            .get(code.trim())
            .map(|&i| &self.products[i])
    }

    /// Purchase and sale rows for `code`, in file order.
    pub fn join(&self, code: &str) -> (&[PurchaseRecord], &[SaleRecord]) {
        join::join(code, &self.purchases, &self.sales)
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            products: self.products.len(),
            purchases: self.purchase_count,
            sales: self.sale_count,
            loaded_at: self.loaded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn products_from_rows(rows: &[RawRow]) -> Vec<Product> {
    rows.iter()
        .map(|r| Product {
            code: field(r, COL_PRODUCT_CODE).trim().to_string(),
            name: field(r, COL_PRODUCT_NAME).to_string(),
        })
        .collect()
}

fn purchase_from_row(row: &RawRow) -> PurchaseRecord {
    let raw_date = field(row, COL_PURCHASE_DATE);
    PurchaseRecord {
        product_code: field(row, COL_PRODUCT_CODE).trim().to_string(),
        date: parse_date(raw_date),
        raw_date: raw_date.to_string(),
        unit_cost: parse_number(field(row, COL_PURCHASE_UNIT_COST)),
        invoice_number: invoice_number(row),
    }
}

fn sale_from_row(row: &RawRow) -> SaleRecord {
    let raw_date = field(row, COL_SALE_DATE);
    SaleRecord {
        product_code: field(row, COL_PRODUCT_CODE).trim().to_string(),
        date: parse_date(raw_date),
        raw_date: raw_date.to_string(),
        price: parse_number(field(row, COL_SALE_PRICE)),
        invoice_number: invoice_number(row),
    }
}

fn invoice_number(row: &RawRow) -> Option<String> {
    let value = field(row, COL_INVOICE_NUMBER).trim();
    (!value.is_empty()).then(|| value.to_string())
}

//! Margin computation: join, aggregate and derive markup for each product.

use tracing::debug;

use crate::aggregate::{price_point, Strategy};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::margin::margin_result;
use crate::models::{DateWindow, MarginResult, Product};

// ---------------------------------------------------------------------------
// MarginQuery
// ---------------------------------------------------------------------------

/// Query interface producing [`MarginResult`] rows.
///
/// Without a window each product uses its latest purchase and latest sale.
/// With a window each price is the mean over rows dated inside it.
pub struct MarginQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> MarginQuery<'a> {
    /// Create a new `MarginQuery` bound to the given dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// One result per product, in product-file order.
    pub fn list(&self, window: Option<&DateWindow>) -> Vec<MarginResult> {
        let strategy = Strategy::for_window(window);
        let results: Vec<MarginResult> = self
            .dataset
            .product_list()
            .iter()
            .map(|p| self.compute(p, &strategy))
            .collect();
        debug!("computed margins for {} products ({:?})", results.len(), strategy);
        results
    }

    /// Result for a single product code.
    pub fn get(&self, code: &str, window: Option<&DateWindow>) -> Result<MarginResult> {
        let product = self.dataset.products().get(code)?;
        Ok(self.compute(product, &Strategy::for_window(window)))
    }

    /// Result for `product` under an explicit strategy.
    pub fn compute(&self, product: &Product, strategy: &Strategy) -> MarginResult {
        let (purchases, sales) = self.dataset.join(&product.code);
        margin_result(product, price_point(purchases, sales, strategy))
    }
}

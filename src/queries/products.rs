//! Product lookups against the loaded products table.

use crate::dataset::Dataset;
use crate::error::{MarginError, Result};
use crate::models::Product;

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface over the de-duplicated product list.
pub struct ProductQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// All products in file order.
    pub fn list(&self) -> &'a [Product] {
        self.dataset.product_list()
    }

    /// Find a product by code, or `None`.
    pub fn find(&self, code: &str) -> Option<&'a Product> {
        self.dataset.product(code)
    }

    /// Find a product by code, failing with [`MarginError::NotFound`].
    pub fn get(&self, code: &str) -> Result<&'a Product> {
        self.find(code)
            .ok_or_else(|| MarginError::NotFound(format!("Produto '{}' não encontrado", code.trim())))
    }

    pub fn count(&self) -> usize {
        self.dataset.product_list().len()
    }
}

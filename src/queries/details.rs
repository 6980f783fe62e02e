//! Per-product detail: the margin summary plus the rows behind it.

use crate::aggregate::{newest_first, Strategy};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::join::filter_by_window;
use crate::models::{
    DateWindow, InvoiceLine, PricedRecord, ProductDetail, PurchaseRecord, SaleLine, SaleRecord,
};
use crate::parse::is_epoch_zero;

// ---------------------------------------------------------------------------
// DetailQuery
// ---------------------------------------------------------------------------

/// Query interface for a single product's purchase and sale history.
pub struct DetailQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> DetailQuery<'a> {
    /// Create a new `DetailQuery` bound to the given dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Margin summary plus purchase and sale rows for `code`.
    ///
    /// Rows are restricted to `window` when one is given and are listed
    /// newest first.
    pub fn get(&self, code: &str, window: Option<&DateWindow>) -> Result<ProductDetail> {
        let product = self.dataset.products().get(code)?;
        let summary = self
            .dataset
            .margins()
            .compute(product, &Strategy::for_window(window));
        let (purchases, sales) = self.dataset.join(&product.code);

        Ok(ProductDetail {
            summary,
            purchases: rows_in(purchases, window)
                .into_iter()
                .map(invoice_line)
                .collect(),
            sales: rows_in(sales, window).into_iter().map(sale_line).collect(),
        })
    }
}

fn rows_in<'a, T: PricedRecord>(records: &'a [T], window: Option<&DateWindow>) -> Vec<&'a T> {
    match window {
        Some(w) => newest_first(filter_by_window(records, w)),
        None => newest_first(records),
    }
}

fn invoice_line(record: &PurchaseRecord) -> InvoiceLine {
    InvoiceLine {
        invoice_number: record.invoice_number.clone().unwrap_or_default(),
        date: Some(record.date).filter(|d| !is_epoch_zero(*d)),
        cost: record.unit_cost,
    }
}

fn sale_line(record: &SaleRecord) -> SaleLine {
    SaleLine {
        invoice_number: record.invoice_number.clone().unwrap_or_default(),
        date: Some(record.date).filter(|d| !is_epoch_zero(*d)),
        price: record.price,
    }
}

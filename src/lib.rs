//! Product price margin SDK for Rust.
//!
//! Loads three tab-separated tables (products, purchases, sales), joins them
//! by product code and derives a purchase price, a sale price, markup and
//! profit margin for every product. Prices are either the latest observation
//! or the mean over an inclusive date window.
//!
//! # Quick start
//!
//! ```no_run
//! use margin_sdk::{join::parse_window, MarginSdk};
//!
//! let sdk = MarginSdk::builder().data_dir("./dados").build().unwrap();
//!
//! // Latest purchase and sale price for every product
//! let latest = sdk.margins(None);
//!
//! // Mean over June 2025
//! let window = parse_window(Some("01.06.2025"), Some("30.06.2025")).unwrap();
//! let june = sdk.margins(window.as_ref());
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod dataset;
pub mod error;
pub mod join;
pub mod margin;
pub mod models;
pub mod parse;
pub mod queries;
pub mod snapshot;
pub mod source;

#[cfg(feature = "async")]
pub use async_client::AsyncMarginSdk;
pub use config::{Encoding, SourceConfig};
pub use dataset::Dataset;
pub use error::{MarginError, Result};
pub use models::{DateWindow, MarginResult, ProductDetail};
pub use snapshot::{SnapshotStatus, SnapshotStore};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// MarginSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`MarginSdk`] instance.
///
/// Use [`MarginSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MarginSdkBuilder::build) to load the data.
#[derive(Debug, Clone)]
pub struct MarginSdkBuilder {
    data_dir: PathBuf,
    products_file: String,
    purchases_file: String,
    sales_file: String,
    encoding: Encoding,
    delimiter: u8,
}

impl Default for MarginSdkBuilder {
    fn default() -> Self {
        Self {
            data_dir: config::default_data_dir(),
            products_file: config::PRODUCTS_FILE.to_string(),
            purchases_file: config::PURCHASES_FILE.to_string(),
            sales_file: config::SALES_FILE.to_string(),
            encoding: Encoding::default(),
            delimiter: config::DEFAULT_DELIMITER,
        }
    }
}

impl MarginSdkBuilder {
    /// Directory containing the three tables. Defaults to the current
    /// directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Products table file name, relative to the data directory.
    ///
    /// Defaults to `Tabela-Produtos.csv`.
    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.products_file = name.into();
        self
    }

    /// Defaults to `Tabela-Compras.csv`.
    pub fn purchases_file(mut self, name: impl Into<String>) -> Self {
        self.purchases_file = name.into();
        self
    }

    /// Defaults to `Tabela-Vendas.csv`.
    pub fn sales_file(mut self, name: impl Into<String>) -> Self {
        self.sales_file = name.into();
        self
    }

    /// Text encoding of all three tables. Defaults to UTF-8.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Field delimiter. Defaults to tab.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The resolved source configuration.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            products: self.data_dir.join(&self.products_file),
            purchases: self.data_dir.join(&self.purchases_file),
            sales: self.data_dir.join(&self.sales_file),
            encoding: self.encoding,
            delimiter: self.delimiter,
        }
    }

    /// Build the SDK, reading and indexing all three tables.
    ///
    /// Fails with [`MarginError::SourceUnavailable`] if any table cannot be
    /// read. The SDK never starts with empty stand-in data.
    pub fn build(self) -> Result<MarginSdk> {
        let store = SnapshotStore::load(self.source_config())?;
        Ok(MarginSdk { store })
    }
}

// ---------------------------------------------------------------------------
// MarginSdk
// ---------------------------------------------------------------------------

/// The main entry point for the margin SDK.
///
/// Owns a [`SnapshotStore`]. Every query runs against the snapshot current
/// at the moment it starts, so a concurrent [`reload`](Self::reload) never
/// changes data under a running computation.
pub struct MarginSdk {
    store: SnapshotStore,
}

impl MarginSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> MarginSdkBuilder {
        MarginSdkBuilder::default()
    }

    /// Wrap an in-memory dataset. Reloads will read from `source`.
    pub fn from_dataset(source: SourceConfig, dataset: Dataset) -> Self {
        Self {
            store: SnapshotStore::with_dataset(source, dataset),
        }
    }

    // -- Queries -----------------------------------------------------------

    /// Margins for every product.
    ///
    /// With no window each product uses its latest purchase and sale. With a
    /// window each price is the mean over rows dated inside it.
    pub fn margins(&self, window: Option<&DateWindow>) -> Vec<MarginResult> {
        self.snapshot().margins().list(window)
    }

    /// Margin for one product code.
    pub fn margin(&self, code: &str, window: Option<&DateWindow>) -> Result<MarginResult> {
        self.snapshot().margins().get(code, window)
    }

    /// Margin summary plus purchase and sale rows for one product.
    pub fn detail(&self, code: &str, window: Option<&DateWindow>) -> Result<ProductDetail> {
        self.snapshot().details().get(code, window)
    }

    // -- Snapshot management -----------------------------------------------

    /// The dataset snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.store.current()
    }

    /// Re-read all sources and atomically replace the snapshot.
    ///
    /// If any source fails the previous snapshot stays in effect and the
    /// error is returned.
    pub fn reload(&self) -> Result<SnapshotStatus> {
        self.store.reload()
    }

    pub fn status(&self) -> SnapshotStatus {
        self.store.status()
    }

    pub fn source(&self) -> &SourceConfig {
        self.store.source()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for MarginSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        write!(
            f,
            "MarginSdk(products={}, purchases={}, sales={}, generation={}, encoding={})",
            status.products, status.purchases, status.sales, status.generation, status.encoding
        )
    }
}

//! Async wrapper around [`MarginSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Loading reads three files from disk and a margin pass walks every
//! product, so both run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use margin_sdk::AsyncMarginSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncMarginSdk::builder().data_dir("./dados").build().await.unwrap();
//!
//!     let rows = sdk.margins(None).await.unwrap();
//!     let one = sdk.run(|s| s.margin("P001", None)).await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::error::{MarginError, Result};
use crate::models::{DateWindow, MarginResult, ProductDetail};
use crate::snapshot::SnapshotStatus;
use crate::{Encoding, MarginSdk, MarginSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncMarginSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncMarginSdk`] instance.
#[derive(Debug, Clone, Default)]
pub struct AsyncMarginSdkBuilder {
    inner: MarginSdkBuilder,
}

impl AsyncMarginSdkBuilder {
    /// Directory containing the three tables.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.data_dir(path);
        self
    }

    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.products_file(name);
        self
    }

    pub fn purchases_file(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.purchases_file(name);
        self
    }

    pub fn sales_file(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.sales_file(name);
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.inner = self.inner.encoding(encoding);
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.inner = self.inner.delimiter(delimiter);
        self
    }

    /// Build the async SDK, loading all tables on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncMarginSdk> {
        let sdk = tokio::task::spawn_blocking(move || self.inner.build())
            .await
            .map_err(|e| MarginError::Task(format!("Task join error: {e}")))??;
        Ok(AsyncMarginSdk::from_sdk(sdk))
    }
}

// ---------------------------------------------------------------------------
// AsyncMarginSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`MarginSdk`].
///
/// [`MarginSdk`] is `Sync` (its snapshot sits behind an `RwLock`), so the
/// wrapper only needs an `Arc`; concurrent calls share the same snapshot
/// without serializing on a mutex.
#[derive(Clone)]
pub struct AsyncMarginSdk {
    inner: Arc<MarginSdk>,
}

impl AsyncMarginSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncMarginSdkBuilder {
        AsyncMarginSdkBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn from_sdk(sdk: MarginSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&MarginSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MarginSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| MarginError::Task(format!("Task join error: {e}")))?
    }

    /// Margins for every product.
    pub async fn margins(&self, window: Option<DateWindow>) -> Result<Vec<MarginResult>> {
        self.run(move |s| Ok(s.margins(window.as_ref()))).await
    }

    /// Margin for one product code.
    pub async fn margin(&self, code: &str, window: Option<DateWindow>) -> Result<MarginResult> {
        let code = code.to_string();
        self.run(move |s| s.margin(&code, window.as_ref())).await
    }

    /// Margin summary plus purchase and sale rows for one product.
    pub async fn detail(&self, code: &str, window: Option<DateWindow>) -> Result<ProductDetail> {
        let code = code.to_string();
        self.run(move |s| s.detail(&code, window.as_ref())).await
    }

    /// Re-read all sources and atomically replace the snapshot.
    pub async fn reload(&self) -> Result<SnapshotStatus> {
        self.run(|s| s.reload()).await
    }

    /// Current snapshot status. Does not touch the blocking pool.
    pub fn status(&self) -> SnapshotStatus {
        self.inner.status()
    }

    /// Borrow the underlying sync SDK.
    pub fn sdk(&self) -> &MarginSdk {
        &self.inner
    }
}

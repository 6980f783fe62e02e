//! Atomically swappable holder for the current [`Dataset`].
//!
//! Readers take a cheap `Arc` clone and compute without holding a lock. A
//! reload builds a complete new dataset off to the side and only then swaps
//! the pointer, so no reader can observe a half-built index. A failed reload
//! leaves the previous snapshot in place.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Encoding, SourceConfig};
use crate::dataset::Dataset;
use crate::error::Result;

// ---------------------------------------------------------------------------
// SnapshotStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatus {
    /// Incremented on every successful reload; the initial load is 1.
    pub generation: u64,
    pub products: usize,
    pub purchases: usize,
    pub sales: usize,
    pub loaded_at: DateTime<Utc>,
    pub encoding: Encoding,
}

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

pub struct SnapshotStore {
    source: SourceConfig,
    current: RwLock<Current>,
    // Held for a whole load-and-swap so overlapping reloads cannot finish
    // out of order. Readers never take it.
    reload_lock: Mutex<()>,
}

struct Current {
    dataset: Arc<Dataset>,
    generation: u64,
}

impl SnapshotStore {
    /// Load the initial snapshot from `source`.
    pub fn load(source: SourceConfig) -> Result<Self> {
        let dataset = Dataset::load(&source)?;
        Ok(Self::with_dataset(source, dataset))
    }

    /// Wrap an already-built dataset. Later reloads read from `source`.
    pub fn with_dataset(source: SourceConfig, dataset: Dataset) -> Self {
        Self {
            source,
            current: RwLock::new(Current {
                dataset: Arc::new(dataset),
                generation: 1,
            }),
            reload_lock: Mutex::new(()),
        }
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> Arc<Dataset> {
        self.read().dataset.clone()
    }

    /// Re-read every source and swap in the result, returning the status of
    /// the snapshot this call installed.
    ///
    /// On error the current snapshot is untouched. Concurrent reloads run
    /// one after another; readers are not blocked while a load is running.
    pub fn reload(&self) -> Result<SnapshotStatus> {
        let _serial = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let fresh = Arc::new(Dataset::load(&self.source)?);
        let generation = {
            let mut guard = self
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            guard.dataset = fresh.clone();
            guard.generation += 1;
            guard.generation
        };
        info!("dataset snapshot swapped (generation {generation})");
        Ok(self.status_of(&fresh, generation))
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    pub fn status(&self) -> SnapshotStatus {
        let (dataset, generation) = {
            let guard = self.read();
            (guard.dataset.clone(), guard.generation)
        };
        self.status_of(&dataset, generation)
    }

    fn status_of(&self, dataset: &Dataset, generation: u64) -> SnapshotStatus {
        let stats = dataset.stats();
        SnapshotStatus {
            generation,
            products: stats.products,
            purchases: stats.purchases,
            sales: stats.sales,
            loaded_at: stats.loaded_at,
            encoding: self.source.encoding,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Current> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent snapshot.
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}

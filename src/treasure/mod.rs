//! Treasure disks: the corpus of programs shipped as lootable floppy disks.
//!
//! Disks are read through a [`DiskSource`] and memoised in a [`DiskCache`]
//! owned by the session, so a corpus is fetched at most once no matter how
//! many packs are generated.

pub mod loader;

pub use loader::{DirectorySource, JsonSource};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A single treasure disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureDisk {
    /// The disk's author, e.g. "dan200".
    pub author: String,
    /// The program name, e.g. "alongtimeago".
    pub name: String,
    /// The disk's dye colour as `0xRRGGBB`.
    pub colour: u32,
    /// Program files, keyed by path relative to the disk root.
    pub files: BTreeMap<String, String>,
}

impl TreasureDisk {
    /// The title shown on the disk, e.g. "alongtimeago by dan200".
    pub fn title(&self) -> String {
        format!("{} by {}", self.name, self.author)
    }

    /// The disk's path below the treasure root, e.g. "dan200/alongtimeago".
    pub fn sub_path(&self) -> String {
        format!("{}/{}", self.author, self.name)
    }
}

/// Somewhere treasure disks can be loaded from.
#[async_trait]
pub trait DiskSource: Send + Sync {
    /// Load every disk in the corpus.
    async fn load(&self) -> Result<Vec<TreasureDisk>>;
}

/// A fixed, in-memory list of disks.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    disks: Vec<TreasureDisk>,
}

impl StaticSource {
    pub fn new(disks: Vec<TreasureDisk>) -> Self {
        Self { disks }
    }
}

#[async_trait]
impl DiskSource for StaticSource {
    async fn load(&self) -> Result<Vec<TreasureDisk>> {
        Ok(self.disks.clone())
    }
}

/// The loading state of a [`DiskCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing has been loaded yet, or the last load failed.
    NotLoaded,
    /// A load is in flight.
    Loading,
    /// Disks are available.
    Loaded,
}

/// A memoised [`DiskSource`].
///
/// Concurrent callers share a single in-flight load. A failed load is
/// reported to the caller that triggered it and leaves the cache empty; it
/// is not retried automatically.
pub struct DiskCache {
    source: Arc<dyn DiskSource>,
    disks: Mutex<Option<Arc<[TreasureDisk]>>>,
    state: RwLock<CacheState>,
}

impl DiskCache {
    pub fn new(source: Arc<dyn DiskSource>) -> Self {
        Self {
            source,
            disks: Mutex::new(None),
            state: RwLock::new(CacheState::NotLoaded),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> CacheState {
        match self.state.read() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_state(&self, state: CacheState) {
        match self.state.write() {
            Ok(mut current) => *current = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }

    /// Get the disks, loading them on first use.
    pub async fn disks(&self) -> Result<Arc<[TreasureDisk]>> {
        let mut cached = self.disks.lock().await;
        if let Some(disks) = cached.as_ref() {
            debug!(count = disks.len(), "Using cached treasure disks");
            return Ok(Arc::clone(disks));
        }

        debug!("Loading treasure disks");
        self.set_state(CacheState::Loading);
        let disks: Arc<[TreasureDisk]> = match self.source.load().await {
            Ok(disks) => disks.into(),
            Err(e) => {
                self.set_state(CacheState::NotLoaded);
                return Err(e);
            }
        };
        info!(count = disks.len(), "Loaded treasure disks");

        *cached = Some(Arc::clone(&disks));
        self.set_state(CacheState::Loaded);
        Ok(disks)
    }
}

impl std::fmt::Debug for DiskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskCache").field("state", &self.state()).finish()
    }
}

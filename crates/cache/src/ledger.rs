//! Change-detection ledger
//!
//! Remembers the last item seen for every `(platform, source)` pair. The
//! on-disk layout is partitioned by platform:
//!
//! ```json
//! { "youtube": { "https://www.youtube.com/@handle": "dQw4w9WgXcQ" } }
//! ```

use crate::store::{JsonStore, Mapping};
use feedwatch_core::{Platform, Result};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// What to do with the latest item of a source, given the ledger state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Nothing recorded yet: record silently, never notify
    FirstObservation,
    /// Already seen: no side effects
    Unchanged,
    /// A different item than last time: notify, then record
    NewItem { previous: String },
}

/// Pure change-detection policy
pub fn decide(previous: Option<&str>, current: &str) -> Decision {
    match previous {
        None => Decision::FirstObservation,
        Some(previous) if previous == current => Decision::Unchanged,
        Some(previous) => Decision::NewItem {
            previous: previous.to_string(),
        },
    }
}

/// Persistent last-seen ledger
pub struct Ledger {
    store: JsonStore<Mapping<String>>,
    guard: Mutex<()>,
    saves: AtomicU64,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
            guard: Mutex::new(()),
            saves: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Every record, keyed by platform then source
    pub fn get_all(&self) -> Mapping<Mapping<String>> {
        self.store.load()
    }

    /// Records of one platform, keyed by source
    pub fn get_all_for(&self, platform: Platform) -> Mapping<String> {
        self.store
            .load()
            .remove(platform.as_str())
            .unwrap_or_default()
    }

    pub fn get_one(&self, platform: Platform, source_key: &str) -> Option<String> {
        self.get_all_for(platform).remove(source_key)
    }

    pub fn is_first_observation(&self, platform: Platform, source_key: &str) -> bool {
        self.get_one(platform, source_key).is_none()
    }

    /// Upsert the last-seen item for a source and persist it
    pub fn record(&self, platform: Platform, source_key: &str, item_id: &str) -> Result<()> {
        let _guard = self.guard.lock();
        let _lock = self.store.lock()?;
        let mut all = self.store.load();
        let records = all.entry(platform.as_str().to_string()).or_default();

        if records.get(source_key).map(String::as_str) == Some(item_id) {
            return Ok(());
        }

        records.insert(source_key.to_string(), item_id.to_string());
        self.persist(&all)
    }

    /// Drop the record for a source. Returns whether one existed.
    pub fn forget(&self, platform: Platform, source_key: &str) -> Result<bool> {
        let _guard = self.guard.lock();
        let _lock = self.store.lock()?;
        let mut all = self.store.load();
        let removed = all
            .get_mut(platform.as_str())
            .and_then(|records| records.remove(source_key))
            .is_some();

        if removed {
            all.retain(|_, records| !records.is_empty());
            self.persist(&all)?;
        }
        Ok(removed)
    }

    /// Number of writes this instance has persisted
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    fn persist(&self, all: &Mapping<Mapping<String>>) -> Result<()> {
        self.store.save(all)?;
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

//! Identifier resolution cache
//!
//! Maps a source reference to its stable channel id. Resolution costs API
//! quota, so a successful answer is persisted forever and the resolver is
//! consulted at most once per distinct reference. Failures are never cached.

use crate::reference::SourceReference;
use crate::store::JsonStore;
use feedwatch_core::{Error, HandleResolver, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Persistent `reference -> channel id` cache in front of a [`HandleResolver`]
pub struct ResolutionCache {
    store: JsonStore<String>,
    resolver: Arc<dyn HandleResolver>,
    /// Held across the whole load-resolve-save sequence, together with the
    /// store's file lock
    guard: Mutex<()>,
}

impl ResolutionCache {
    pub fn new(path: impl Into<PathBuf>, resolver: Arc<dyn HandleResolver>) -> Self {
        Self {
            store: JsonStore::new(path),
            resolver,
            guard: Mutex::new(()),
        }
    }

    /// Previously resolved id for `input`, without any external call
    pub fn cached(&self, input: &str) -> Option<String> {
        self.store.load().remove(input)
    }

    /// Number of cached references
    pub fn len(&self) -> usize {
        self.store.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve `input` to a stable id, consulting the resolver only on a miss
    pub async fn resolve(&self, input: &str) -> Result<String> {
        let _guard = self.guard.lock().await;
        let _lock = self.store.lock_async().await?;

        let mut cache = self.store.load();
        if let Some(id) = cache.get(input) {
            tracing::debug!(reference = %input, channel_id = %id, "cache hit");
            return Ok(id.clone());
        }

        let id = match SourceReference::parse(input) {
            Some(SourceReference::DirectId(id)) => {
                tracing::info!(reference = %input, channel_id = %id, "saved direct channel id");
                id.to_string()
            }
            Some(SourceReference::Handle(handle)) => self.lookup(input, handle).await?,
            None => return Err(Error::invalid_source_reference(input)),
        };

        cache.insert(input.to_string(), id.clone());
        self.store.save(&cache)?;
        Ok(id)
    }

    async fn lookup(&self, input: &str, handle: &str) -> Result<String> {
        tracing::info!(handle = %handle, "resolving channel id");

        if let Some(id) = self
            .resolver
            .lookup_handle(handle)
            .await
            .map_err(|e| unresolvable(input, e))?
        {
            tracing::info!(handle = %handle, channel_id = %id, "resolved by handle");
            return Ok(id);
        }

        tracing::info!(handle = %handle, "handle lookup found nothing, searching");
        match self
            .resolver
            .search_handle(handle)
            .await
            .map_err(|e| unresolvable(input, e))?
        {
            Some(id) => {
                tracing::info!(handle = %handle, channel_id = %id, "resolved by search");
                Ok(id)
            }
            None => Err(Error::not_resolvable(input, "no channel matched handle or search")),
        }
    }
}

/// Missing credentials stay distinguishable; everything else is a lookup that
/// could not complete this time
fn unresolvable(input: &str, error: Error) -> Error {
    match error {
        Error::ResolverUnavailable { .. } => error,
        other => Error::not_resolvable(input, other.to_string()),
    }
}

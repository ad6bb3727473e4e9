//! Contracts of the collaborators the monitoring engine talks to.
//!
//! Networked collaborators are async (`async_trait`) so they can be shared
//! behind `Arc<dyn ...>`. The registry and target provider are plain file or
//! environment reads and stay synchronous.

use crate::errors::{NotifyError, Result};
use crate::types::{LatestItem, Notification, SourceConfig};
use async_trait::async_trait;

/// Maps a human handle to a stable channel id
#[async_trait]
pub trait HandleResolver: Send + Sync {
    /// Exact handle lookup.
    ///
    /// # Returns
    /// * `Ok(Some(id))` - the handle is known
    /// * `Ok(None)` - the platform has no channel under this handle
    /// * `Err(error)` - the lookup could not be performed
    async fn lookup_handle(&self, handle: &str) -> Result<Option<String>>;

    /// Fuzzy search used when the exact lookup finds nothing
    async fn search_handle(&self, handle: &str) -> Result<Option<String>>;
}

/// Reads the newest item of a feed
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// `Ok(None)` means the feed is legitimately empty.
    async fn fetch_latest(&self, stable_id: &str) -> Result<Option<LatestItem>>;
}

/// Delivers an announcement to a webhook
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> std::result::Result<(), NotifyError>;
}

/// Resolves a notification-target key to a delivery URL at call time
pub trait TargetProvider: Send + Sync {
    fn target_url(&self, key: &str) -> Option<String>;
}

/// Lists the tracked sources in registry order
pub trait SourceRegistry: Send + Sync {
    fn list_sources(&self) -> Result<Vec<SourceConfig>>;
}

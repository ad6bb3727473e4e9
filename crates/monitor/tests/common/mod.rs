//! In-memory collaborators with call counters

#![allow(dead_code)]

use async_trait::async_trait;
use feedwatch_cache::{Ledger, ResolutionCache};
use feedwatch_core::{
    CancellationFlag, Error, FeedFetcher, HandleResolver, LatestItem, Notification, Notifier, NotifyError, Result,
    SourceConfig, SourceRegistry, TargetProvider,
};
use feedwatch_monitor::Monitor;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Default)]
pub struct FakeResolver {
    pub handles: Mutex<HashMap<String, String>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl HandleResolver for FakeResolver {
    async fn lookup_handle(&self, handle: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.handles.lock().get(handle).cloned())
    }

    async fn search_handle(&self, _handle: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

/// What the fake feed answers for one channel id
#[derive(Clone)]
pub enum Feed {
    Item(String),
    /// Raise the flag, then answer with the item
    CancelAfter(CancellationFlag, String),
    Empty,
    Unavailable,
    Broken,
    Panic,
}

#[derive(Default)]
pub struct FakeFetcher {
    pub feeds: Mutex<HashMap<String, Feed>>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn set(&self, channel_id: &str, feed: Feed) {
        self.feeds.lock().insert(channel_id.to_string(), feed);
    }

    pub fn set_item(&self, channel_id: &str, item_id: &str) {
        self.set(channel_id, Feed::Item(item_id.to_string()));
    }
}

#[async_trait]
impl FeedFetcher for FakeFetcher {
    async fn fetch_latest(&self, stable_id: &str) -> Result<Option<LatestItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let feed = self.feeds.lock().get(stable_id).cloned().unwrap_or(Feed::Empty);
        match feed {
            Feed::Item(item_id) => Ok(Some(LatestItem {
                title: format!("Video {item_id}"),
                thumbnail_url: None,
                item_id,
            })),
            Feed::CancelAfter(flag, item_id) => {
                flag.cancel();
                Ok(Some(LatestItem {
                    title: format!("Video {item_id}"),
                    thumbnail_url: None,
                    item_id,
                }))
            }
            Feed::Empty => Ok(None),
            Feed::Unavailable => Err(Error::fetch_unavailable(stable_id, "HTTP 500")),
            Feed::Broken => Err(Error::configuration("feed adapter misconfigured")),
            Feed::Panic => panic!("fetcher exploded"),
        }
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub sent: Mutex<Vec<Notification>>,
    pub fail_with: Mutex<Option<NotifyError>>,
}

impl FakeNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, notification: &Notification) -> std::result::Result<(), NotifyError> {
        self.sent.lock().push(notification.clone());
        match self.fail_with.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct FakeTargets {
    pub urls: Mutex<HashMap<String, String>>,
}

impl TargetProvider for FakeTargets {
    fn target_url(&self, key: &str) -> Option<String> {
        self.urls.lock().get(key).cloned()
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    pub sources: Mutex<Vec<SourceConfig>>,
    pub fail: Mutex<bool>,
}

impl SourceRegistry for FakeRegistry {
    fn list_sources(&self) -> Result<Vec<SourceConfig>> {
        if *self.fail.lock() {
            return Err(Error::registry("registry unreadable"));
        }
        Ok(self.sources.lock().clone())
    }
}

/// A monitor wired to fakes, with its state in a temporary directory
pub struct Harness {
    pub dir: TempDir,
    pub resolver: Arc<FakeResolver>,
    pub fetcher: Arc<FakeFetcher>,
    pub notifier: Arc<FakeNotifier>,
    pub targets: Arc<FakeTargets>,
    pub ledger: Arc<Ledger>,
    pub monitor: Arc<Monitor>,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let resolver = Arc::new(FakeResolver::default());
        let fetcher = Arc::new(FakeFetcher::default());
        let notifier = Arc::new(FakeNotifier::default());
        let targets = Arc::new(FakeTargets::default());

        let resolution = Arc::new(ResolutionCache::new(
            dir.path().join("cache_channel_ids.json"),
            resolver.clone(),
        ));
        let ledger = Arc::new(Ledger::new(dir.path().join("last_seen.json")));
        let monitor = Arc::new(Monitor::new(
            resolution,
            ledger.clone(),
            fetcher.clone(),
            notifier.clone(),
            targets.clone(),
        ));

        Self {
            dir,
            resolver,
            fetcher,
            notifier,
            targets,
            ledger,
            monitor,
        }
    }

    /// Register a handle-based source whose webhook is configured
    pub fn source(&self, name: &str, channel_id: &str) -> SourceConfig {
        let key = format!("{}_WEBHOOK", name.to_uppercase());
        self.resolver
            .handles
            .lock()
            .insert(name.to_string(), channel_id.to_string());
        self.targets
            .urls
            .lock()
            .insert(key.clone(), format!("https://discord.test/{name}"));
        SourceConfig::new(name, format!("https://www.youtube.com/@{name}"), key)
    }
}

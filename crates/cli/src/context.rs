//! Wiring from settings to stores, adapters and the monitor

use feedwatch_cache::{Ledger, ResolutionCache};
use feedwatch_clients::{build_client, DiscordNotifier, RssFeedFetcher, YouTubeResolver};
use feedwatch_config::{ChannelRegistry, EnvFile, EnvFileTargets, Settings};
use feedwatch_core::Result;
use feedwatch_monitor::Monitor;
use std::sync::Arc;

/// Everything a command needs, derived from the loaded [`Settings`]
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn registry(&self) -> ChannelRegistry {
        ChannelRegistry::new(self.settings.registry_path())
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.settings.last_seen_path())
    }

    pub fn env_file(&self) -> EnvFile {
        EnvFile::new(&self.settings.env_file)
    }

    pub fn resolution_cache(&self) -> Result<ResolutionCache> {
        let client = build_client(self.settings.http_timeout)?;
        Ok(self.resolution_with(client))
    }

    /// Monitor backed by the real YouTube, RSS and Discord adapters
    pub fn monitor(&self) -> Result<Monitor> {
        let client = build_client(self.settings.http_timeout)?;

        Ok(Monitor::new(
            Arc::new(self.resolution_with(client.clone())),
            Arc::new(self.ledger()),
            Arc::new(RssFeedFetcher::new(client.clone())),
            Arc::new(DiscordNotifier::new(client)),
            Arc::new(EnvFileTargets::new(self.env_file())),
        ))
    }

    fn resolution_with(&self, client: reqwest::Client) -> ResolutionCache {
        let resolver = YouTubeResolver::new(client, self.settings.youtube_api_key.clone());
        ResolutionCache::new(self.settings.channel_id_cache_path(), Arc::new(resolver))
    }
}

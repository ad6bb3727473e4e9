//! Runtime settings shared by every command
//!
//! Settings are immutable once loaded and cheap to clone.

use feedwatch_core::{CHANNEL_ID_CACHE_FILE, CHANNEL_REGISTRY_FILE, LAST_SEEN_FILE};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the caches and the registry
    pub data_dir: PathBuf,
    /// `.env` file holding webhook URLs
    pub env_file: PathBuf,
    /// YouTube Data API key; resolution of handles is unavailable without it
    pub youtube_api_key: Option<String>,
    /// Pause between monitoring cycles
    pub check_interval: Duration,
    /// Upper bound on every outbound HTTP request
    pub http_timeout: Duration,
}

impl Settings {
    pub fn channel_id_cache_path(&self) -> PathBuf {
        self.data_dir.join(CHANNEL_ID_CACHE_FILE)
    }

    pub fn last_seen_path(&self) -> PathBuf {
        self.data_dir.join(LAST_SEEN_FILE)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join(CHANNEL_REGISTRY_FILE)
    }
}

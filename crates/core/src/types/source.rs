//! Tracked sources and the items fetched from them

use serde::{Deserialize, Serialize};

/// One tracked source as stored in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Display name, unique within the registry
    pub name: String,
    /// Human-entered reference, e.g. `https://www.youtube.com/@handle`
    #[serde(rename = "url")]
    pub source_reference: String,
    /// Key looked up by the target provider to find the webhook URL
    #[serde(rename = "webhook_env")]
    pub notification_target_key: String,
}

impl SourceConfig {
    pub fn new(
        name: impl Into<String>,
        source_reference: impl Into<String>,
        notification_target_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_reference: source_reference.into(),
            notification_target_key: notification_target_key.into(),
        }
    }
}

/// The newest item a feed currently exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestItem {
    pub item_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

/// Everything a notifier needs to announce a new item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub source_name: String,
    pub item_id: String,
    pub target_url: String,
    pub thumbnail_url: Option<String>,
}

impl Notification {
    pub fn for_item(source: &SourceConfig, item: &LatestItem, target_url: impl Into<String>) -> Self {
        Self {
            title: item.title.clone(),
            source_name: source.name.clone(),
            item_id: item.item_id.clone(),
            target_url: target_url.into(),
            thumbnail_url: item.thumbnail_url.clone(),
        }
    }
}

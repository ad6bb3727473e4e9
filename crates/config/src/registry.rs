//! Channel registry
//!
//! Ordered list of tracked channels persisted as `channels.json`. Names and
//! URLs are unique. Every mutation rewrites the file atomically.

use feedwatch_core::{Error, Result, SourceConfig, SourceRegistry};
use feedwatch_utils::write_atomic;
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Partial edit of a registered channel; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub webhook_env: Option<String>,
}

impl ChannelUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.webhook_env.is_none()
    }
}

#[derive(Debug)]
pub struct ChannelRegistry {
    path: PathBuf,
    guard: Mutex<()>,
}

impl ChannelRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All channels in insertion order
    pub fn list(&self) -> Result<Vec<SourceConfig>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::file_system(&self.path, "read registry", e)),
        };

        // Unlike the caches the registry is user-authored, so a broken file is
        // an error rather than an empty list
        serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("invalid registry {}", self.path.display()), e))
    }

    pub fn get(&self, name: &str) -> Result<Option<SourceConfig>> {
        Ok(self.list()?.into_iter().find(|c| c.name == name))
    }

    /// Register a channel. Duplicate names or URLs are rejected.
    pub fn add(&self, channel: SourceConfig) -> Result<()> {
        validate(&channel)?;
        let _guard = self.guard.lock();
        let mut channels = self.list()?;

        if let Some(existing) = channels
            .iter()
            .find(|c| c.name == channel.name || c.source_reference == channel.source_reference)
        {
            return Err(Error::registry(format!(
                "channel '{}' already exists ({})",
                existing.name, existing.source_reference
            )));
        }

        tracing::info!(name = %channel.name, url = %channel.source_reference, "channel added");
        channels.push(channel);
        self.save(&channels)
    }

    /// Remove a channel by name
    pub fn remove(&self, name: &str) -> Result<SourceConfig> {
        let _guard = self.guard.lock();
        let mut channels = self.list()?;
        let index = position(&channels, name)?;
        let removed = channels.remove(index);
        self.save(&channels)?;
        tracing::info!(name = %name, "channel removed");
        Ok(removed)
    }

    /// Apply `update` to the channel called `name` and return the result
    pub fn update(&self, name: &str, update: ChannelUpdate) -> Result<SourceConfig> {
        let _guard = self.guard.lock();
        let mut channels = self.list()?;
        let index = position(&channels, name)?;

        let mut edited = channels[index].clone();
        if let Some(new_name) = update.name {
            edited.name = new_name;
        }
        if let Some(url) = update.url {
            edited.source_reference = url;
        }
        if let Some(key) = update.webhook_env {
            edited.notification_target_key = key;
        }
        validate(&edited)?;

        let clash = channels.iter().enumerate().any(|(i, c)| {
            i != index
                && (c.name == edited.name || c.source_reference == edited.source_reference)
        });
        if clash {
            return Err(Error::registry(format!(
                "another channel already uses the name '{}' or url '{}'",
                edited.name, edited.source_reference
            )));
        }

        channels[index] = edited.clone();
        self.save(&channels)?;
        tracing::info!(name = %name, "channel updated");
        Ok(edited)
    }

    fn save(&self, channels: &[SourceConfig]) -> Result<()> {
        let content = serde_json::to_vec_pretty(channels)
            .map_err(|e| Error::json("failed to encode registry", e))?;
        write_atomic(&self.path, &content)
    }
}

impl SourceRegistry for ChannelRegistry {
    fn list_sources(&self) -> Result<Vec<SourceConfig>> {
        self.list()
    }
}

fn position(channels: &[SourceConfig], name: &str) -> Result<usize> {
    channels
        .iter()
        .position(|c| c.name == name)
        .ok_or_else(|| Error::registry(format!("no channel named '{name}'")))
}

fn validate(channel: &SourceConfig) -> Result<()> {
    let missing = [
        ("name", &channel.name),
        ("url", &channel.source_reference),
        ("webhook env key", &channel.notification_target_key),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match missing {
        Some((field, _)) => Err(Error::registry(format!("channel {field} is required"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry(dir: &TempDir) -> ChannelRegistry {
        ChannelRegistry::new(dir.path().join("channels.json"))
    }

    fn ltt() -> SourceConfig {
        SourceConfig::new("LTT", "https://www.youtube.com/@LinusTechTips", "LTT_WEBHOOK")
    }

    fn mkbhd() -> SourceConfig {
        SourceConfig::new("MKBHD", "https://www.youtube.com/@mkbhd", "MKBHD_WEBHOOK")
    }

    #[test]
    fn test_empty_registry() {
        let dir = TempDir::new().unwrap();
        assert!(registry(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn test_add_keeps_order() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(ltt()).unwrap();
        registry.add(mkbhd()).unwrap();

        let names: Vec<_> = registry
            .list_sources()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["LTT", "MKBHD"]);
    }

    #[test]
    fn test_duplicates_rejected() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(ltt()).unwrap();

        let same_name = SourceConfig::new("LTT", "https://youtube.com/@other", "X");
        let same_url = SourceConfig::new("Other", "https://www.youtube.com/@LinusTechTips", "X");
        assert!(matches!(registry.add(same_name), Err(Error::Registry { .. })));
        assert!(matches!(registry.add(same_url), Err(Error::Registry { .. })));
        assert_eq!(registry.list().unwrap().len(), 1);
    }

    #[test]
    fn test_required_fields() {
        let dir = TempDir::new().unwrap();
        let err = registry(&dir)
            .add(SourceConfig::new("LTT", " ", "X"))
            .unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(ltt()).unwrap();
        registry.add(mkbhd()).unwrap();

        let removed = registry.remove("LTT").unwrap();

        assert_eq!(removed, ltt());
        assert_eq!(registry.list().unwrap(), vec![mkbhd()]);
        assert!(registry.remove("LTT").is_err());
    }

    #[test]
    fn test_update_partial_fields() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(ltt()).unwrap();

        let edited = registry
            .update(
                "LTT",
                ChannelUpdate {
                    name: Some("Linus".to_string()),
                    webhook_env: Some("LINUS_WEBHOOK".to_string()),
                    ..ChannelUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(edited.name, "Linus");
        assert_eq!(edited.source_reference, "https://www.youtube.com/@LinusTechTips");
        assert_eq!(edited.notification_target_key, "LINUS_WEBHOOK");
        assert!(registry.get("LTT").unwrap().is_none());
        assert_eq!(registry.get("Linus").unwrap(), Some(edited));
    }

    #[test]
    fn test_update_cannot_collide() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry.add(ltt()).unwrap();
        registry.add(mkbhd()).unwrap();

        let err = registry
            .update(
                "MKBHD",
                ChannelUpdate {
                    name: Some("LTT".to_string()),
                    ..ChannelUpdate::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, Error::Registry { .. }));
        assert_eq!(registry.list().unwrap(), vec![ltt(), mkbhd()]);
    }

    #[test]
    fn test_malformed_registry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        fs::write(registry.path(), "not json").unwrap();
        assert!(matches!(registry.list(), Err(Error::Json { .. })));
    }
}

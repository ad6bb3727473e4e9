//! Webhook target resolution

use crate::env_file::EnvFile;
use feedwatch_core::TargetProvider;

/// Looks webhook keys up in the `.env` file first, then in the process
/// environment. Nothing is cached, so a rotated webhook is picked up on the
/// next cycle.
#[derive(Debug, Clone, Default)]
pub struct EnvFileTargets {
    env_file: Option<EnvFile>,
}

impl EnvFileTargets {
    pub fn new(env_file: EnvFile) -> Self {
        Self {
            env_file: Some(env_file),
        }
    }

    /// Only consult the process environment
    pub fn process_only() -> Self {
        Self::default()
    }
}

impl TargetProvider for EnvFileTargets {
    fn target_url(&self, key: &str) -> Option<String> {
        self.env_file
            .as_ref()
            .and_then(|file| non_blank(file.get(key)))
            .or_else(|| non_blank(std::env::var(key).ok()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_rotation_is_seen_without_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "FW_TARGET_ROTATE=https://one\n").unwrap();
        let targets = EnvFileTargets::new(EnvFile::new(&path));

        assert_eq!(targets.target_url("FW_TARGET_ROTATE").as_deref(), Some("https://one"));

        fs::write(&path, "FW_TARGET_ROTATE=https://two\n").unwrap();
        assert_eq!(targets.target_url("FW_TARGET_ROTATE").as_deref(), Some("https://two"));
    }

    #[test]
    #[serial]
    fn test_falls_back_to_process_environment() {
        let dir = TempDir::new().unwrap();
        let targets = EnvFileTargets::new(EnvFile::new(dir.path().join(".env")));
        std::env::set_var("FW_TARGET_PROCESS", "https://proc");

        assert_eq!(targets.target_url("FW_TARGET_PROCESS").as_deref(), Some("https://proc"));

        std::env::remove_var("FW_TARGET_PROCESS");
        assert!(targets.target_url("FW_TARGET_PROCESS").is_none());
    }

    #[test]
    #[serial]
    fn test_empty_value_is_absent() {
        std::env::set_var("FW_TARGET_EMPTY", "");
        assert!(EnvFileTargets::process_only()
            .target_url("FW_TARGET_EMPTY")
            .is_none());
        std::env::remove_var("FW_TARGET_EMPTY");
    }
}

//! The `.env` file that stores webhook URLs
//!
//! Webhook URLs are secrets, so the registry only stores the *name* of the
//! variable and the URL itself lives here.

use feedwatch_core::{Error, Result};
use feedwatch_utils::write_atomic_string;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `key` from a fresh parse of the file
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = match dotenv::from_path_iter(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                if !e.not_found() {
                    tracing::warn!(path = %self.path.display(), error = %e, "cannot read .env");
                }
                return None;
            }
        };

        // Later assignments win, as they would when sourcing the file
        let mut found = None;
        for entry in entries {
            match entry {
                Ok((name, value)) if name == key => found = Some(value),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping malformed .env line")
                }
            }
        }
        found
    }

    /// Reject a key or value that would not survive as one `KEY=value` line
    pub fn check_assignment(key: &str, value: &str) -> Result<()> {
        if key.is_empty() || key.contains('=') || key.contains(char::is_whitespace) {
            return Err(Error::configuration(format!("invalid environment key '{key}'")));
        }
        if value.contains(['\n', '\r']) {
            return Err(Error::configuration(format!(
                "value for '{key}' must be a single line"
            )));
        }
        Ok(())
    }

    /// Add or replace `key=value`, keeping every other line as it was
    pub fn upsert(&self, key: &str, value: &str) -> Result<()> {
        Self::check_assignment(key, value)?;

        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::file_system(&self.path, "read .env", e)),
        };

        let assignment = format!("{key}={value}");
        let mut found = false;
        let mut lines: Vec<String> = existing
            .lines()
            .map(|line| {
                if assigns(line, key) {
                    found = true;
                    assignment.clone()
                } else {
                    line.to_string()
                }
            })
            .collect();

        if !found {
            if lines.last().is_some_and(|line| !line.trim().is_empty()) {
                lines.push(String::new());
            }
            lines.push(assignment);
        }

        let mut content = lines.join("\n");
        content.push('\n');
        write_atomic_string(&self.path, &content)?;
        tracing::info!(key = %key, path = %self.path.display(), "saved webhook to .env");
        Ok(())
    }
}

fn assigns(line: &str, key: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    line.strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_creates_file() {
        let dir = TempDir::new().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));

        env.upsert("LTT_WEBHOOK", "https://discord.com/api/webhooks/1/a")
            .unwrap();

        assert_eq!(
            env.get("LTT_WEBHOOK").as_deref(),
            Some("https://discord.com/api/webhooks/1/a")
        );
    }

    #[test]
    fn test_upsert_replaces_in_place_and_preserves_other_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# secrets\nYOUTUBE_API_KEY=abc\nLTT_WEBHOOK=old\n\nOTHER=1\n",
        )
        .unwrap();
        let env = EnvFile::new(&path);

        env.upsert("LTT_WEBHOOK", "new").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# secrets\nYOUTUBE_API_KEY=abc\nLTT_WEBHOOK=new\n\nOTHER=1\n"
        );
    }

    #[test]
    fn test_upsert_appends_new_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "A=1\n").unwrap();
        let env = EnvFile::new(&path);

        env.upsert("B", "2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n\nB=2\n");
        assert_eq!(env.get("A").as_deref(), Some("1"));
        assert_eq!(env.get("B").as_deref(), Some("2"));
    }

    #[test]
    fn test_prefix_keys_are_not_confused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "HOOK_LONG=keep\n").unwrap();
        let env = EnvFile::new(&path);

        env.upsert("HOOK", "x").unwrap();

        assert_eq!(env.get("HOOK_LONG").as_deref(), Some("keep"));
        assert_eq!(env.get("HOOK").as_deref(), Some("x"));
    }

    #[test]
    fn test_rejects_invalid_keys() {
        let dir = TempDir::new().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));
        assert!(env.upsert("", "x").is_err());
        assert!(env.upsert("A B", "x").is_err());
        assert!(env.upsert("A=B", "x").is_err());
    }

    #[test]
    fn test_missing_file_reads_nothing() {
        let dir = TempDir::new().unwrap();
        let env = EnvFile::new(dir.path().join("absent.env"));
        assert!(env.get("ANY").is_none());
    }

    #[test]
    fn test_upsert_rejects_multiline_values() {
        let dir = TempDir::new().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));
        env.upsert("LTT_WEBHOOK", "https://discord.test/1").unwrap();

        let err = env
            .upsert("LTT_WEBHOOK", "https://discord.test/2\nYOUTUBE_API_KEY=stolen")
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(env.upsert("LTT_WEBHOOK", "https://discord.test/2\r").is_err());

        assert_eq!(env.get("LTT_WEBHOOK").as_deref(), Some("https://discord.test/1"));
        assert!(env.get("YOUTUBE_API_KEY").is_none());
    }
}

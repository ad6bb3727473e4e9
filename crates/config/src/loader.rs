//! Settings loader for feedwatch
//!
//! Loads the `.env` file (without overriding variables already set in the
//! process), then reads every setting from the environment. Command-line
//! overrides are applied through the builder methods.

use crate::settings::Settings;
use feedwatch_core::{
    constants::{
        CHECK_INTERVAL_VAR, DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_ENV_FILE,
        DEFAULT_HTTP_TIMEOUT_SECS, FEEDWATCH_DATA_DIR_VAR, FEEDWATCH_ENV_FILE_VAR,
        FEEDWATCH_HTTP_TIMEOUT_VAR, YOUTUBE_API_KEY_VAR,
    },
    Error, Result,
};
use feedwatch_utils::XdgPaths;
use std::path::PathBuf;
use std::time::Duration;

/// Builder that assembles [`Settings`]
#[derive(Debug, Default)]
pub struct SettingsLoader {
    env_file: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    check_interval: Option<Duration>,
    load_dotenv: bool,
}

impl SettingsLoader {
    /// Create a new loader that reads `.env` before the environment
    pub fn new() -> Self {
        Self {
            load_dotenv: true,
            ..Self::default()
        }
    }

    /// Use a specific `.env` file
    pub fn env_file(mut self, path: PathBuf) -> Self {
        self.env_file = Some(path);
        self
    }

    /// Override the data directory
    pub fn data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    /// Override the interval between cycles
    pub fn check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = Some(interval);
        self
    }

    /// Whether to load the `.env` file into the process environment
    pub fn load_dotenv(mut self, load: bool) -> Self {
        self.load_dotenv = load;
        self
    }

    /// Load the `.env` file into the process environment, keeping variables
    /// that are already set. Returns the file that was consulted.
    pub fn load_env_file(&self) -> Result<PathBuf> {
        let env_file = self.resolve_env_file(|key| std::env::var(key).ok());

        match dotenv::from_path(&env_file) {
            Ok(()) => tracing::debug!(path = %env_file.display(), "loaded .env"),
            Err(e) if e.not_found() => {
                tracing::debug!(path = %env_file.display(), "no .env file")
            }
            Err(e) => {
                return Err(Error::configuration(format!(
                    "failed to load {}: {e}",
                    env_file.display()
                )))
            }
        }
        Ok(env_file)
    }

    /// Load the settings from the process environment
    pub fn load(self) -> Result<Settings> {
        if self.load_dotenv {
            self.load_env_file()?;
        }

        self.load_from(|key| std::env::var(key).ok())
    }

    /// Load the settings from an arbitrary variable lookup
    pub fn load_from<F>(self, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_file = self.resolve_env_file(&lookup);

        let data_dir = self
            .data_dir
            .or_else(|| non_empty(lookup(FEEDWATCH_DATA_DIR_VAR)).map(PathBuf::from))
            .unwrap_or_else(|| XdgPaths::data_dir(&lookup));

        let check_interval = match self.check_interval {
            Some(interval) => interval,
            None => seconds(&lookup, CHECK_INTERVAL_VAR, DEFAULT_CHECK_INTERVAL_SECS)?,
        };
        if check_interval.is_zero() {
            return Err(Error::configuration(format!(
                "{CHECK_INTERVAL_VAR} must be greater than zero"
            )));
        }

        let http_timeout = seconds(&lookup, FEEDWATCH_HTTP_TIMEOUT_VAR, DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Settings {
            data_dir,
            env_file,
            youtube_api_key: non_empty(lookup(YOUTUBE_API_KEY_VAR)),
            check_interval,
            http_timeout,
        })
    }

    fn resolve_env_file<F>(&self, lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        self.env_file
            .clone()
            .or_else(|| non_empty(lookup(FEEDWATCH_ENV_FILE_VAR)).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            Error::configuration(format!("{key} must be a whole number of seconds, got '{raw}'"))
        }),
    }
}

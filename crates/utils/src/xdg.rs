//! Default location of feedwatch state

use feedwatch_core::APP_DIR_NAME;
use std::path::PathBuf;

/// XDG Base Directory paths for feedwatch
pub struct XdgPaths;

impl XdgPaths {
    /// `$XDG_DATA_HOME/feedwatch`, falling back to `~/.local/share/feedwatch`.
    ///
    /// Variables are read through `lookup` so callers can substitute the
    /// process environment.
    pub fn data_dir<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("XDG_DATA_HOME")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|home| home.join(".local/share"))
                    .unwrap_or_else(|| PathBuf::from(".local/share"))
            })
            .join(APP_DIR_NAME)
    }
}

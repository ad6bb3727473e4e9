//! Atomic file operations so readers never observe a half-written file

use feedwatch_core::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Content written to a temporary sibling of its destination but not yet
/// renamed into place. Dropping it without [`StagedWrite::commit`] removes the
/// temporary file and leaves the destination untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    /// Path of the temporary file holding the staged content
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the staged content over the destination
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.temp_path, &self.target)
            .map_err(|e| Error::file_system(self.target.clone(), "atomic rename", e))?;
        self.committed = true;

        // Persist the directory entry too; not every platform supports this
        if let Some(parent) = self.target.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Write `content` to a temporary file next to `path` and fsync it
pub fn stage_write(path: &Path, content: &[u8]) -> Result<StagedWrite> {
    let parent = path.parent().ok_or_else(|| {
        Error::configuration(format!("invalid file path '{}': no parent directory", path.display()))
    })?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    fs::create_dir_all(parent)
        .map_err(|e| Error::file_system(parent.to_path_buf(), "create parent directory", e))?;

    // Same directory as the destination so the rename never crosses filesystems
    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4()));
    let staged = StagedWrite {
        temp_path,
        target: path.to_path_buf(),
        committed: false,
    };

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&staged.temp_path)
        .map_err(|e| Error::file_system(&staged.temp_path, "create temporary file", e))?;

    file.write_all(content)
        .map_err(|e| Error::file_system(&staged.temp_path, "write to temporary file", e))?;

    file.sync_all()
        .map_err(|e| Error::file_system(&staged.temp_path, "sync temporary file", e))?;

    Ok(staged)
}

/// Write data to a file atomically by writing to a temporary file and renaming
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    stage_write(path, content)?.commit()
}

/// Write string content to a file atomically
pub fn write_atomic_string(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

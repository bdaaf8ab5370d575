//! File-based modification source.

use super::ModificationSource;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// File-based modification source.
///
/// Reports the file's modification time from filesystem metadata. A missing or
/// unreadable file reports `0`.
///
/// # Examples
///
/// ```rust,no_run
/// use config_monitor::sources::{FileSource, ModificationSource};
///
/// let source = FileSource::new("config/log.yaml");
/// let millis = source.last_modified_millis();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The watched path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_modified(&self) -> std::io::Result<u64> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        let since_epoch = modified
            .duration_since(UNIX_EPOCH)
            .map_err(std::io::Error::other)?;
        Ok(u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }
}

impl ModificationSource for FileSource {
    fn last_modified_millis(&self) -> u64 {
        match self.read_modified() {
            Ok(millis) => millis,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    path = %self.path.display(),
                    error = %_err,
                    "Unable to read modification time, treating as unchanged"
                );
                0
            }
        }
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

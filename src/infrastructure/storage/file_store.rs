//! Async filesystem access for content sources and cache files.

use std::path::Path;

use tokio::fs;
use tracing::{debug, error, warn};

use crate::domain::entities::ImageFormat;
use crate::domain::errors::FileError;

/// Result type for file operations.
pub type FileResult<T> = std::result::Result<T, FileError>;

/// Returns whether `name` has one of the supported image extensions.
#[must_use]
pub fn is_image_file(name: impl AsRef<Path>) -> bool {
    ImageFormat::from_path(name).is_some()
}

/// Returns the MIME type for `name`, falling back to JPEG.
#[must_use]
pub fn mime_type(name: impl AsRef<Path>) -> &'static str {
    ImageFormat::from_path(name).unwrap_or_default().mime_type()
}

/// Thin async wrapper over `tokio::fs` that logs and types its failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks whether a path exists.
    pub async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    /// Creates a directory and its parents if missing.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn ensure_dir(&self, path: &Path) -> FileResult<()> {
        if self.exists(path).await {
            return Ok(());
        }
        fs::create_dir_all(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to create directory");
            FileError::io(path, e)
        })?;
        debug!(path = %path.display(), "Created directory");
        Ok(())
    }

    /// Lists entry names in a directory, sorted.
    ///
    /// # Errors
    /// Returns error if the path is missing, not a directory, or unreadable.
    pub async fn read_dir(&self, path: &Path) -> FileResult<Vec<String>> {
        let meta = fs::metadata(path).await.map_err(|e| {
            warn!(path = %path.display(), "Directory does not exist");
            FileError::io(path, e)
        })?;
        if !meta.is_dir() {
            warn!(path = %path.display(), "Path is not a directory");
            return Err(FileError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let mut entries = fs::read_dir(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to read directory");
            FileError::io(path, e)
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FileError::io(path, e))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Reads a whole file.
    ///
    /// # Errors
    /// Returns `FileError::NotFound` if the file is missing, `FileError::Io` otherwise.
    pub async fn read(&self, path: &Path) -> FileResult<Vec<u8>> {
        fs::read(path).await.map_err(|e| {
            let err = FileError::io(path, e);
            if err.is_not_found() {
                warn!(path = %path.display(), "File does not exist");
            } else {
                error!(path = %path.display(), error = %err, "Failed to read file");
            }
            err
        })
    }

    /// Reads a UTF-8 text file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid UTF-8.
    pub async fn read_text(&self, path: &Path) -> FileResult<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
    }

    /// Writes a whole file, replacing any previous content.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub async fn write(&self, path: &Path, data: impl AsRef<[u8]>) -> FileResult<()> {
        fs::write(path, data).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write file");
            FileError::io(path, e)
        })
    }
}

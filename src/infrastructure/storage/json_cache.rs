//! Disk cache for remote JSON content lists.
//!
//! A list is downloaded once per cache file and kept forever: an existing file
//! is authoritative and never refreshed or overwritten.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::errors::ContentError;
use crate::domain::ports::{FetchRequest, HttpPort};

use super::file_store::FileStore;

/// Cache file stem used when a command has no name.
pub const DEFAULT_CACHE_NAME: &str = "default";

/// Default download timeout for lists.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(60);

/// Returns the content cache directory under `base_dir`.
#[must_use]
pub fn content_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("data").join("content")
}

/// Cache of remote JSON lists keyed by command name.
pub struct JsonListCache {
    content_dir: PathBuf,
    files: FileStore,
    http: Arc<dyn HttpPort>,
    timeout: Duration,
    // One entry per cache file ever requested, so bounded by the command table.
    in_flight: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for JsonListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonListCache")
            .field("content_dir", &self.content_dir)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl JsonListCache {
    /// Creates a cache rooted at `<base_dir>/data/content`.
    #[must_use]
    pub fn new(base_dir: &Path, http: Arc<dyn HttpPort>) -> Self {
        Self {
            content_dir: content_dir(base_dir),
            files: FileStore::new(),
            http,
            timeout: DEFAULT_LIST_TIMEOUT,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the download timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Returns the cache file for a command name.
    #[must_use]
    pub fn cache_path(&self, name: &str) -> PathBuf {
        let name = if name.is_empty() {
            DEFAULT_CACHE_NAME
        } else {
            name
        };
        self.content_dir.join(format!("{name}.json"))
    }

    /// Returns the cached list text, downloading `url` first if no cache file exists.
    ///
    /// Concurrent first-time loads of the same file are serialized: later
    /// callers wait for the first download and then read its file.
    ///
    /// # Errors
    /// Returns `ContentError::Unavailable` if the list cannot be downloaded,
    /// stored, or read back.
    pub async fn load_or_fetch(&self, url: &str, name: &str) -> Result<String, ContentError> {
        let path = self.cache_path(name);
        if self.files.exists(&path).await {
            debug!(path = %path.display(), "Content list cache hit");
            return self.read(&path).await;
        }

        let lock = self.lock_for(&path);
        let _guard = lock.lock().await;

        if self.files.exists(&path).await {
            debug!(path = %path.display(), "Content list cached by concurrent load");
            return self.read(&path).await;
        }

        self.files
            .ensure_dir(&self.content_dir)
            .await
            .map_err(|e| ContentError::unavailable(e.to_string()))?;

        debug!(url = %url, "Downloading content list");
        let response = self
            .http
            .get(FetchRequest::new(url).with_timeout(self.timeout))
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Failed to download content list");
                ContentError::unavailable(format!("下载失败: {e}"))
            })?;

        if !response.is_success() {
            warn!(url = %url, status = response.status, "Content list download rejected");
            return Err(ContentError::unavailable(format!(
                "下载失败: {}",
                response.status
            )));
        }

        self.files
            .write(&path, &response.body)
            .await
            .map_err(|e| ContentError::unavailable(e.to_string()))?;

        info!(
            url = %url,
            path = %path.display(),
            size = response.body.len(),
            "Cached content list"
        );

        self.read(&path).await
    }

    async fn read(&self, path: &Path) -> Result<String, ContentError> {
        self.files
            .read_text(path)
            .await
            .map_err(|e| ContentError::unavailable(e.to_string()))
    }

    fn lock_for(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        self.in_flight
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }
}

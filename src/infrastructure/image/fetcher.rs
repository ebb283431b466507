//! Remote image download.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use super::pixiv::referer_for;
use crate::domain::errors::ContentError;
use crate::domain::ports::{FetchRequest, HttpPort};

/// Default timeout for an image download.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads remote images, adding the referer some CDNs require.
pub struct ImageFetcher {
    http: Arc<dyn HttpPort>,
    timeout: Duration,
}

impl std::fmt::Debug for ImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ImageFetcher {
    /// Creates a fetcher with the default timeout.
    #[must_use]
    pub fn new(http: Arc<dyn HttpPort>) -> Self {
        Self {
            http,
            timeout: DEFAULT_IMAGE_TIMEOUT,
        }
    }

    /// Sets the download timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Downloads one image.
    ///
    /// # Errors
    /// Returns `ContentError::Download` on a non-success status and
    /// `ContentError::Request` if the request itself fails.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, ContentError> {
        let request = FetchRequest::new(url)
            .with_timeout(self.timeout)
            .with_referer(referer_for(url));

        debug!(url = %url, referer = ?request.referer, "Downloading image");

        let response = self.http.get(request).await.map_err(|e| {
            warn!(url = %url, error = %e, "Image request failed");
            ContentError::request(e.to_string())
        })?;

        if !response.is_success() {
            warn!(url = %url, status = response.status, "Image download rejected");
            return Err(ContentError::Download {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

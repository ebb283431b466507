//! Citation API client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{HitokotoResponse, P6oyResponse};
use crate::domain::entities::ContentKind;
use crate::domain::errors::ContentError;
use crate::domain::ports::{FetchRequest, FetchResponse, HttpPort};

/// hitokoto endpoint.
pub const HITOKOTO_API_BASE: &str = "https://v1.hitokoto.cn/";
/// p6oy endpoint.
pub const P6OY_API_BASE: &str = "https://api.p6oy.top/api/yy";
/// Default timeout for a quote request.
pub const DEFAULT_CITATION_TIMEOUT: Duration = Duration::from_secs(3);

const HITOKOTO_CATEGORIES: [(&str, &str); 13] = [
    ("all", ""),
    ("anime", "c=a"),
    ("comic", "c=b"),
    ("game", "c=c"),
    ("novel", "c=d"),
    ("original", "c=e"),
    ("internet", "c=f"),
    ("other", "c=g"),
    ("movie", "c=h"),
    ("poetry", "c=i"),
    ("netease", "c=j"),
    ("philosophy", "c=k"),
    ("clever", "c=l"),
];

const P6OY_TYPES: [(&str, &str); 3] = [("poetry", "sc"), ("chicken", "djt"), ("dog", "tgrj")];
const P6OY_DEFAULT_TYPE: &str = "sc";

/// Client for the quote services.
pub struct CitationClient {
    http: Arc<dyn HttpPort>,
    hitokoto_base: String,
    p6oy_base: String,
    timeout: Duration,
}

impl std::fmt::Debug for CitationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationClient")
            .field("hitokoto_base", &self.hitokoto_base)
            .field("p6oy_base", &self.p6oy_base)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CitationClient {
    /// Creates a client for the public endpoints.
    #[must_use]
    pub fn new(http: Arc<dyn HttpPort>) -> Self {
        Self::with_base_urls(http, HITOKOTO_API_BASE, P6OY_API_BASE)
    }

    /// Creates a client with custom endpoints.
    #[must_use]
    pub fn with_base_urls(
        http: Arc<dyn HttpPort>,
        hitokoto_base: impl Into<String>,
        p6oy_base: impl Into<String>,
    ) -> Self {
        Self {
            http,
            hitokoto_base: hitokoto_base.into(),
            p6oy_base: p6oy_base.into(),
            timeout: DEFAULT_CITATION_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the hitokoto URL. `param` is a category name, a raw query such
    /// as `c=a`, or empty for all categories.
    #[must_use]
    pub fn hitokoto_url(&self, param: &str) -> String {
        let query = HITOKOTO_CATEGORIES
            .iter()
            .find(|(name, _)| *name == param)
            .map_or(param, |(_, query)| *query);
        if query.is_empty() {
            self.hitokoto_base.clone()
        } else {
            format!("{}?{query}", self.hitokoto_base)
        }
    }

    /// Builds the p6oy URL. Unknown types fall back to poetry.
    #[must_use]
    pub fn p6oy_url(&self, param: &str) -> String {
        let code = P6OY_TYPES
            .iter()
            .find(|(name, _)| *name == param)
            .map_or(P6OY_DEFAULT_TYPE, |(_, code)| *code);
        format!("{}?type={code}", self.p6oy_base)
    }

    /// Fetches one formatted quote.
    ///
    /// # Errors
    /// Returns `ContentError::InvalidApiType` for non-citation kinds and
    /// `ContentError::Api` for failed requests, bad status, or missing quotes.
    pub async fn fetch(&self, kind: ContentKind, param: &str) -> Result<String, ContentError> {
        let url = match kind {
            ContentKind::Hitokoto => self.hitokoto_url(param),
            ContentKind::P6oy => self.p6oy_url(param),
            other => return Err(ContentError::InvalidApiType { kind: other }),
        };

        debug!(kind = %kind, url = %url, "Requesting quote");

        let response = self
            .http
            .get(FetchRequest::new(&url).with_timeout(self.timeout))
            .await
            .map_err(|e| ContentError::api_request(kind, e))?;

        if !response.is_success() {
            warn!(kind = %kind, status = response.status, "Quote API returned error status");
            return Err(ContentError::api_status(response.status));
        }

        let text = match kind {
            ContentKind::Hitokoto => decode::<HitokotoResponse>(kind, &response)?.into_text(),
            _ => decode::<P6oyResponse>(kind, &response)?.into_text(),
        };

        text.ok_or_else(|| {
            warn!(kind = %kind, "Quote API response has no quote");
            ContentError::api_missing_field(kind)
        })
    }
}

fn decode<T: DeserializeOwned>(
    kind: ContentKind,
    response: &FetchResponse,
) -> Result<T, ContentError> {
    serde_json::from_slice(&response.body).map_err(|e| ContentError::api_request(kind, e))
}

//! Content resolution.
//!
//! Turns a command's `(kind, source)` pair into one ready-to-send piece of
//! content: a quote from a citation API, a random picture from a directory or
//! URL list, or a random line from a JSON list.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::IndexedRandom;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::{CommandDefinition, Content, ContentKind, ContentResult};
use crate::domain::errors::{ContentError, FileError};
use crate::domain::ports::HttpPort;
use crate::infrastructure::citation::CitationClient;
use crate::infrastructure::config::TimeoutConfig;
use crate::infrastructure::image::ImageFetcher;
use crate::infrastructure::storage::{FileStore, JsonListCache, is_image_file, mime_type};

const IMAGE_CACHE_NAME: &str = "images";
const TEXT_CACHE_NAME: &str = "texts";

/// Returns whether a source or candidate is an `http(s)` URL.
#[must_use]
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Dependencies shared by every resolution.
#[derive(Clone)]
pub struct ResolverContext {
    /// Root under which remote lists are cached.
    pub base_dir: PathBuf,
    /// Network timeouts.
    pub timeouts: TimeoutConfig,
    /// Outgoing HTTP.
    pub http: Arc<dyn HttpPort>,
}

impl ResolverContext {
    /// Creates a context with default timeouts.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, http: Arc<dyn HttpPort>) -> Self {
        Self {
            base_dir: base_dir.into(),
            timeouts: TimeoutConfig::default(),
            http,
        }
    }

    /// Replaces the timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }
}

impl std::fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverContext")
            .field("base_dir", &self.base_dir)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

/// Resolves commands into content.
#[derive(Debug)]
pub struct ContentResolver {
    files: FileStore,
    lists: JsonListCache,
    citations: CitationClient,
    images: ImageFetcher,
}

impl ContentResolver {
    /// Creates a resolver from its context.
    #[must_use]
    pub fn new(ctx: ResolverContext) -> Self {
        let ResolverContext {
            base_dir,
            timeouts,
            http,
        } = ctx;

        Self {
            files: FileStore::new(),
            lists: JsonListCache::new(&base_dir, Arc::clone(&http))
                .with_timeout(timeouts.list()),
            citations: CitationClient::new(Arc::clone(&http)).with_timeout(timeouts.citation()),
            images: ImageFetcher::new(http).with_timeout(timeouts.image()),
        }
    }

    /// Resolves content and folds the outcome into a [`ContentResult`].
    pub async fn get_content(
        &self,
        kind: ContentKind,
        source: &str,
        command_name: &str,
    ) -> ContentResult {
        let result = self.resolve(kind, source, command_name).await;
        if let Err(e) = &result {
            debug!(kind = %kind, command = command_name, error = %e, "Content resolution failed");
        }
        result.into()
    }

    /// Resolves a configured command.
    ///
    /// # Errors
    /// See [`ContentResolver::resolve`].
    pub async fn resolve_definition(
        &self,
        definition: &CommandDefinition,
    ) -> Result<Content, ContentError> {
        self.resolve(definition.kind, &definition.source, &definition.name)
            .await
    }

    /// Resolves one piece of content.
    ///
    /// Citation kinds call their API with `source` as the parameter. Other
    /// kinds gather candidates from a local directory, a local JSON file, or
    /// a cached remote JSON list, and pick one at random.
    ///
    /// # Errors
    /// Returns a [`ContentError`] describing the first failure.
    pub async fn resolve(
        &self,
        kind: ContentKind,
        source: &str,
        command_name: &str,
    ) -> Result<Content, ContentError> {
        if kind.is_citation_api() {
            return self.api_content(kind, source).await.map(Content::text);
        }

        let candidates = if is_remote_source(source) {
            let cache_name = match (command_name.is_empty(), kind) {
                (false, _) => command_name,
                (true, ContentKind::Image) => IMAGE_CACHE_NAME,
                (true, _) => TEXT_CACHE_NAME,
            };
            self.remote_candidates(source, cache_name).await?
        } else if kind == ContentKind::Image {
            self.local_images(Path::new(source))
                .await?
                .into_iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect()
        } else {
            self.json_content(Path::new(source)).await?
        };

        debug!(kind = %kind, count = candidates.len(), "Collected candidates");

        let choice = pick(&candidates).ok_or(ContentError::EmptyContent { kind })?;

        match kind {
            ContentKind::Image => self.load_image(&choice).await,
            _ => Ok(Content::text(choice)),
        }
    }

    /// Fetches a formatted quote.
    ///
    /// # Errors
    /// Returns `ContentError::Api` or `ContentError::InvalidApiType`.
    pub async fn api_content(
        &self,
        kind: ContentKind,
        param: &str,
    ) -> Result<String, ContentError> {
        self.citations.fetch(kind, param).await
    }

    /// Reads the string candidates of a local JSON list.
    ///
    /// # Errors
    /// Returns `ContentError::Unavailable` if the file is unreadable or not a
    /// JSON array.
    pub async fn json_content(&self, path: &Path) -> Result<Vec<String>, ContentError> {
        let text = self
            .files
            .read_text(path)
            .await
            .map_err(|e| ContentError::unavailable(e.to_string()))?;
        parse_candidates(&text)
    }

    /// Lists image files in `dir`, sorted by file name, as absolute paths.
    ///
    /// # Errors
    /// Returns `ContentError::Unavailable` if `dir` is missing or not a
    /// directory.
    pub async fn local_images(&self, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        let names = self
            .files
            .read_dir(dir)
            .await
            .map_err(|e| ContentError::unavailable(e.to_string()))?;

        let root = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        Ok(names
            .into_iter()
            .filter(|name| is_image_file(name))
            .map(|name| root.join(name))
            .collect())
    }

    async fn remote_candidates(
        &self,
        url: &str,
        cache_name: &str,
    ) -> Result<Vec<String>, ContentError> {
        let text = self.lists.load_or_fetch(url, cache_name).await?;
        parse_candidates(&text)
    }

    async fn load_image(&self, candidate: &str) -> Result<Content, ContentError> {
        if is_remote_source(candidate) {
            let bytes = self.images.fetch(candidate).await?;
            let path = candidate.split(['?', '#']).next().unwrap_or(candidate);
            return Ok(Content::image(&bytes, mime_type(path)));
        }

        let bytes = self.files.read(Path::new(candidate)).await.map_err(|e| {
            if !matches!(e, FileError::NotFound { .. }) {
                warn!(path = candidate, error = %e, "Image file unreadable");
            }
            ContentError::FileMissing {
                path: candidate.to_string(),
            }
        })?;
        Ok(Content::image(&bytes, mime_type(candidate)))
    }
}

fn pick(candidates: &[String]) -> Option<String> {
    candidates.choose(&mut rand::rng()).cloned()
}

/// Extracts the string elements of a top-level JSON array.
///
/// # Errors
/// Returns `ContentError::Unavailable` for malformed JSON or a non-array.
pub fn parse_candidates(text: &str) -> Result<Vec<String>, ContentError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ContentError::unavailable(format!("JSON 解析失败: {e}")))?;

    let Value::Array(items) = value else {
        return Err(ContentError::unavailable("JSON 内容不是数组"));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            other => {
                debug!(element = %other, "Skipping non-string list element");
                None
            }
        })
        .collect())
}

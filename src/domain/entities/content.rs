//! Resolved content and the boundary result shape.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;

use crate::domain::errors::ContentError;

/// One ready-to-send content unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Base64 encoded picture.
    Image {
        /// Standard base64 of the raw bytes.
        base64: String,
        /// MIME type derived from the source extension.
        mime_type: &'static str,
    },
    /// Plain text, sent verbatim.
    Text(String),
}

impl Content {
    /// Encodes raw image bytes.
    #[must_use]
    pub fn image(bytes: &[u8], mime_type: &'static str) -> Self {
        Self::Image {
            base64: STANDARD.encode(bytes),
            mime_type,
        }
    }

    /// Creates text content.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns whether this is an image.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Renders the content into the message markup understood by the host.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Image { base64, mime_type } => {
                format!(r#"<image src="base64://{base64}" type="{mime_type}"/>"#)
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Outcome of a content request as handed to the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentResult {
    /// Whether content was produced.
    pub success: bool,
    /// Rendered content on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Short cause on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentResult {
    /// Creates a successful result.
    #[must_use]
    pub fn ok(data: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<Content, ContentError>> for ContentResult {
    fn from(result: Result<Content, ContentError>) -> Self {
        match result {
            Ok(content) => Self::ok(content.render()),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ContentKind;

    #[test]
    fn test_render_image_markup() {
        let content = Content::image(b"hello", "image/png");
        assert_eq!(
            content.render(),
            r#"<image src="base64://aGVsbG8=" type="image/png"/>"#
        );
    }

    #[test]
    fn test_render_text_verbatim() {
        let content = Content::text("  line one\nline two ");
        assert_eq!(content.render(), "  line one\nline two ");
        assert!(!content.is_image());
    }

    #[test]
    fn test_result_from_error() {
        let result = ContentResult::from(Err(ContentError::EmptyContent {
            kind: ContentKind::Image,
        }));
        assert!(!result.success);
        assert_eq!(result.data, None);
        assert_eq!(result.error.as_deref(), Some("无可用图片"));
    }

    #[test]
    fn test_result_serializes_without_empty_fields() {
        let json = serde_json::to_string(&ContentResult::ok("hi")).unwrap();
        assert_eq!(json, r#"{"success":true,"data":"hi"}"#);
    }
}

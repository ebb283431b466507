//! Reply DTOs.

use crate::domain::entities::Content;

/// Message handed back to the chat host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Image markup, `<image src="base64://..." type="..."/>`.
    Image(String),
    /// Plain text, including failure notices.
    Text(String),
}

impl Reply {
    /// Returns the message body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Image(markup) => markup,
            Self::Text(text) => text,
        }
    }

    /// Returns whether the reply carries an image.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

impl From<Content> for Reply {
    fn from(content: Content) -> Self {
        match content {
            Content::Image { .. } => Self::Image(content.render()),
            Content::Text(text) => Self::Text(text),
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Configured content command.

use serde::{Deserialize, Serialize};

/// Kind of content a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Random picture from a directory or a JSON list of URLs.
    Image,
    /// Random string from a JSON list.
    Text,
    /// Quote from the hitokoto API.
    Hitokoto,
    /// Quote from the p6oy API.
    P6oy,
}

impl ContentKind {
    /// Returns whether content comes straight from a citation API
    /// instead of a candidate list.
    #[must_use]
    pub const fn is_citation_api(self) -> bool {
        matches!(self, Self::Hitokoto | Self::P6oy)
    }

    /// Returns the configuration name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Hitokoto => "hitokoto",
            Self::P6oy => "p6oy",
        }
    }

    /// Returns the user-facing label used in replies.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "图片",
            Self::Text => "文本",
            Self::Hitokoto | Self::P6oy => "一言",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static command definition loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Sub-command name, unique within the configuration.
    pub name: String,

    /// Help text shown next to the command.
    #[serde(default)]
    pub description: String,

    /// Content kind.
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Directory, file path, URL or API parameter depending on `kind`.
    pub source: String,
}

impl CommandDefinition {
    /// Creates a new command definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ContentKind,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            source: source.into(),
        }
    }
}

//! Citation API response DTOs.

use serde::Deserialize;

use crate::domain::services::{attribution, format_citation};

/// hitokoto API response structure.
#[derive(Debug, Deserialize)]
pub struct HitokotoResponse {
    /// Quote text.
    #[serde(default)]
    pub hitokoto: Option<String>,
    /// Work the quote comes from.
    #[serde(default)]
    pub from: Option<String>,
    /// Author, when known.
    #[serde(default)]
    pub from_who: Option<String>,
}

impl HitokotoResponse {
    /// Formats the quote with its attribution, or `None` without a quote.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        let quote = self.hitokoto.filter(|q| !q.is_empty())?;
        Some(match self.from.filter(|f| !f.is_empty()) {
            Some(from) => format_citation(&quote, &attribution(&from, self.from_who.as_deref())),
            None => quote,
        })
    }
}

/// p6oy API response structure.
#[derive(Debug, Deserialize)]
pub struct P6oyResponse {
    /// Quote text.
    #[serde(default)]
    pub hitokoto: Option<String>,
    /// Work the quote comes from.
    #[serde(default)]
    pub hitokoto_from: Option<String>,
}

impl P6oyResponse {
    /// Formats the quote with its attribution, or `None` without a quote.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        let quote = self.hitokoto.filter(|q| !q.is_empty())?;
        Some(match self.hitokoto_from.filter(|f| !f.is_empty()) {
            Some(from) => format_citation(&quote, &attribution(&from, None)),
            None => quote,
        })
    }
}

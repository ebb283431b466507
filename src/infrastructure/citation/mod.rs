//! Citation API adapters (hitokoto, p6oy).

/// Endpoint client.
pub mod client;
/// Response DTOs.
pub mod dto;

pub use client::{CitationClient, DEFAULT_CITATION_TIMEOUT, HITOKOTO_API_BASE, P6OY_API_BASE};
pub use dto::{HitokotoResponse, P6oyResponse};

//! Image handling infrastructure.
//!
//! This module provides:
//! - Remote image download with per-host referer rules
//! - Pixiv CDN detection

pub mod fetcher;
pub mod pixiv;

pub use fetcher::{DEFAULT_IMAGE_TIMEOUT, ImageFetcher};
pub use pixiv::{PIXIV_IMAGE_HOST, PIXIV_REFERER, is_pixiv_url, referer_for};

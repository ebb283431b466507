//! Content resolution error types.
//!
//! Display strings are the terse, localized causes shown to chat users.

use thiserror::Error;

use crate::domain::entities::ContentKind;

/// Content resolution error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("无效的 API 类型: {kind}")]
    InvalidApiType { kind: ContentKind },

    #[error("{message}")]
    Api { message: String },

    #[error("无可用{}", .kind.label())]
    EmptyContent { kind: ContentKind },

    #[error("图片文件不存在: {path}")]
    FileMissing { path: String },

    #[error("获取网络图片失败: {status}")]
    Download { status: u16 },

    #[error("内容不可用: {reason}")]
    Unavailable { reason: String },

    #[error("处理错误: {message}")]
    Request { message: String },
}

impl ContentError {
    /// Creates an API error for a non-success HTTP status.
    #[must_use]
    pub fn api_status(status: u16) -> Self {
        Self::Api {
            message: format!("请求失败: {status}"),
        }
    }

    /// Creates an API error for a response without a quote.
    #[must_use]
    pub fn api_missing_field(kind: ContentKind) -> Self {
        Self::Api {
            message: format!("获取{kind}内容失败"),
        }
    }

    /// Creates an API error for a failed request or unreadable body.
    #[must_use]
    pub fn api_request(kind: ContentKind, cause: impl std::fmt::Display) -> Self {
        Self::Api {
            message: format!("获取{kind}内容出错: {cause}"),
        }
    }

    /// Creates an error for a candidate source that could not be read or parsed.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates an error for a failed image request.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Returns whether the failure came from a remote service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Download { .. } | Self::Request { .. }
        )
    }
}

//! Command execution use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::Reply;
use crate::application::services::ContentResolver;
use crate::domain::entities::CommandDefinition;

/// Runs a configured command and produces the reply to send.
pub struct RunCommandUseCase {
    resolver: Arc<ContentResolver>,
}

impl RunCommandUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(resolver: Arc<ContentResolver>) -> Self {
        Self { resolver }
    }

    /// Resolves the command's content.
    ///
    /// Never fails: resolution errors become a short text notice such as
    /// `获取图片失败: 无可用图片`.
    pub async fn execute(&self, definition: &CommandDefinition) -> Reply {
        match self.resolver.resolve_definition(definition).await {
            Ok(content) => {
                info!(
                    command = %definition.name,
                    kind = %definition.kind,
                    image = content.is_image(),
                    "Command resolved"
                );
                Reply::from(content)
            }
            Err(e) => {
                warn!(
                    command = %definition.name,
                    kind = %definition.kind,
                    remote = e.is_remote(),
                    error = %e,
                    "Command failed"
                );
                Reply::Text(format!("获取{}失败: {e}", definition.kind.label()))
            }
        }
    }
}

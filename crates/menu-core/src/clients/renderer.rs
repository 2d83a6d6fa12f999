//! Renderer client trait (port)

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::dto::MenuDto;

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("renderer unreachable: {0}")]
    Transport(String),
    #[error("renderer returned status {0}")]
    Status(u16),
}

/// Gateway to the external rendering service.
///
/// One attempt per call; any retry policy belongs to the implementation's
/// transport, never to callers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RendererClient: Send + Sync {
    async fn render(&self, menu: &MenuDto) -> Result<Vec<u8>, RendererError>;
}

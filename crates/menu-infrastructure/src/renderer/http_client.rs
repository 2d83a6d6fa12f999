// ============================================================================
// Menu Infrastructure - HTTP Renderer Client
// File: crates/menu-infrastructure/src/renderer/http_client.rs
// ============================================================================
//! HTTP gateway to the external rendering service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use menu_core::clients::{RendererClient, RendererError};
use menu_core::dto::MenuDto;

/// Renders a menu by id against `{base_url}/api/render/{id}`.
///
/// The request timeout bounds every call; cancellation follows the caller's
/// task. No retries here: a failed render is the caller's decision.
pub struct HttpRendererClient {
    client: Client,
    base_url: String,
}

impl HttpRendererClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
        }
    }
}

#[async_trait]
impl RendererClient for HttpRendererClient {
    async fn render(&self, menu: &MenuDto) -> Result<Vec<u8>, RendererError> {
        let url = format!(
            "{}/api/render/{}",
            self.base_url.trim_end_matches('/'),
            menu.id
        );
        debug!("Rendering menu {} via {}", menu.id, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RendererError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RendererError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RendererError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn menu_dto(id: &str) -> MenuDto {
        MenuDto {
            id: id.to_string(),
            name: "Lunch".to_string(),
            categories: Vec::new(),
            author: Uuid::new_v4().to_string(),
            shared: false,
            markdown: Some("Lunch\n=====\n\n".to_string()),
        }
    }

    #[tokio::test]
    async fn test_render_returns_body_bytes() {
        let server = MockServer::start().await;
        let menu = menu_dto("11111111-2222-3333-4444-555555555555");

        Mock::given(method("GET"))
            .and(path(format!("/api/render/{}", menu.id)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpRendererClient::new(server.uri(), Duration::from_secs(5));
        let bytes = client.render(&menu).await.unwrap();

        assert_eq!(bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error_and_not_retried() {
        let server = MockServer::start().await;
        let menu = menu_dto("11111111-2222-3333-4444-555555555555");

        Mock::given(method("GET"))
            .and(path(format!("/api/render/{}", menu.id)))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = HttpRendererClient::new(server.uri(), Duration::from_secs(5))
            .render(&menu)
            .await
            .unwrap_err();

        assert!(matches!(err, RendererError::Status(500)));
    }

    #[tokio::test]
    async fn test_unreachable_renderer_is_a_transport_error() {
        // Nothing listens on this port.
        let client =
            HttpRendererClient::new("http://127.0.0.1:9".to_string(), Duration::from_secs(1));

        let err = client.render(&menu_dto("some-id")).await.unwrap_err();
        assert!(matches!(err, RendererError::Transport(_)));
    }
}

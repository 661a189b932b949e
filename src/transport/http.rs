//! HTTP transport for the chat backend REST API

use super::{Transport, TransportConfig, TransportError};
use crate::types::{ChatRequest, ChatResponse, Conversation};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::invalid_url(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::invalid_url(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build `{base}/seg/seg/...`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::invalid_url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::decode(format!("Failed to parse response: {e} - body: {body}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let url = self.endpoint(&["api", "chat"])?;
        let response = self.client.post(url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn get_conversation_history(&self, conversation_id: &str) -> Result<Conversation, TransportError> {
        let url = self.endpoint(&["api", "conversations", conversation_id])?;
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn get_user_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, TransportError> {
        let url = self.endpoint(&["api", "users", user_id, "conversations"])?;
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }
}

/// Map a non-2xx response, preferring the backend's `detail` field
fn classify_error(status: reqwest::StatusCode, body: &str) -> TransportError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string());

    TransportError::status(status.as_u16(), format!("HTTP {status}: {detail}"))
}

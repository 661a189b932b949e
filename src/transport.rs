//! Backend transport abstraction
//!
//! The three REST calls the chat store depends on, behind a trait so the
//! store can be driven by mocks in tests.

mod config;
mod error;
mod http;

pub use config::TransportConfig;
pub use error::TransportError;
#[allow(unused_imports)] // Public API re-exports
pub use error::TransportErrorKind;
pub use http::HttpTransport;

use crate::types::{ChatRequest, ChatResponse, Conversation};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Client for the chat backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a user message and wait for the assistant reply
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;

    /// Fetch the full transcript of a conversation
    async fn get_conversation_history(&self, conversation_id: &str) -> Result<Conversation, TransportError>;

    /// List the conversations belonging to a user
    async fn get_user_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        (**self).send_message(request).await
    }

    async fn get_conversation_history(&self, conversation_id: &str) -> Result<Conversation, TransportError> {
        (**self).get_conversation_history(conversation_id).await
    }

    async fn get_user_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, TransportError> {
        (**self).get_user_conversations(user_id).await
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: Transport> LoggingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

fn log_outcome<R>(operation: &str, start: Instant, result: &Result<R, TransportError>) {
    let duration = start.elapsed();
    match result {
        Ok(_) => {
            tracing::info!(
                operation,
                duration_ms = %duration.as_millis(),
                "Backend request completed"
            );
        }
        Err(e) => {
            tracing::error!(
                operation,
                duration_ms = %duration.as_millis(),
                kind = ?e.kind,
                error = %e.message,
                "Backend request failed"
            );
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for LoggingTransport<T> {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let start = Instant::now();
        tracing::debug!(
            conversation_id = ?request.conversation_id,
            chars = request.message.chars().count(),
            "POST /api/chat"
        );
        let result = self.inner.send_message(request).await;
        log_outcome("send_message", start, &result);
        result
    }

    async fn get_conversation_history(&self, conversation_id: &str) -> Result<Conversation, TransportError> {
        let start = Instant::now();
        tracing::debug!(conversation_id, "GET /api/conversations/{{id}}");
        let result = self.inner.get_conversation_history(conversation_id).await;
        log_outcome("get_conversation_history", start, &result);
        result
    }

    async fn get_user_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, TransportError> {
        let start = Instant::now();
        tracing::debug!(user_id, "GET /api/users/{{id}}/conversations");
        let result = self.inner.get_user_conversations(user_id).await;
        log_outcome("get_user_conversations", start, &result);
        result
    }
}

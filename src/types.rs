//! Chat data model and backend wire types

use serde::{Deserialize, Serialize};

/// Number of characters kept when a title is derived from the first message
const TITLE_PREVIEW_CHARS: usize = 30;

/// Title shown for a conversation with no title and no messages
pub const UNTITLED_CONVERSATION: &str = "New Conversation";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub role: Role,
    /// ISO-8601 timestamp. History from the backend carries it as `created_at`.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
            timestamp: Some(timestamp.into()),
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            timestamp: Some(timestamp.into()),
        }
    }
}

/// A backend conversation with its transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Backend rows also carry an integer `id`, which is ignored
    #[serde(rename = "conversation_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// The user conversation listing may omit transcripts
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Conversation {
    /// Title for list display.
    ///
    /// Falls back to the first message (first 30 characters, then `...`)
    /// and finally to a fixed placeholder.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }

        match self.messages.first() {
            Some(first) => truncate_preview(&first.content),
            None => UNTITLED_CONVERSATION.to_string(),
        }
    }

    /// Most recent activity timestamp
    pub fn last_activity(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.created_at)
    }
}

fn truncate_preview(content: &str) -> String {
    if content.chars().count() > TITLE_PREVIEW_CHARS {
        let head: String = content.chars().take(TITLE_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub user_id: String,
}

/// Reply from `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub message_id: String,
}

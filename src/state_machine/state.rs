//! Chat state types

use crate::types::{Conversation, Message};
use serde::{Deserialize, Serialize};

/// Outstanding network operation, if any
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    /// No request in flight
    #[default]
    Idle,

    /// Chat request in flight
    AwaitingReply {
        /// Set when the user started a new conversation mid-flight
        #[serde(default)]
        discard_result: bool,
    },

    /// Conversation history request in flight
    LoadingHistory {
        conversation_id: String,
        #[serde(default)]
        discard_result: bool,
    },

    /// User conversation listing in flight
    ListingConversations,
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    /// Mark an in-flight send or load as stale
    pub(crate) fn discarded(self) -> Self {
        match self {
            Phase::AwaitingReply { .. } => Phase::AwaitingReply {
                discard_result: true,
            },
            Phase::LoadingHistory {
                conversation_id, ..
            } => Phase::LoadingHistory {
                conversation_id,
                discard_result: true,
            },
            other => other,
        }
    }
}

/// The canonical client state owned by the chat store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChatState {
    /// Transcript of the active conversation
    pub messages: Vec<Message>,
    pub phase: Phase,
    /// Backend id of the active conversation; `None` for a fresh one
    pub current_conversation_id: Option<String>,
    /// Conversations known for this user
    pub conversations: Vec<Conversation>,
    /// Draft input text
    pub user_input: String,
}

impl ChatState {
    /// True for the whole span of one outstanding network operation
    pub fn is_loading(&self) -> bool {
        !self.phase.is_idle()
    }
}

/// Immutable configuration for a store
#[derive(Debug, Clone)]
pub struct ChatContext {
    /// Session identifier sent with every chat request
    pub user_id: String,
}

impl ChatContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

//! Effects produced by state transitions

use crate::types::ChatRequest;

/// Transport calls to run after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /api/chat`
    SendMessage { request: ChatRequest },

    /// `GET /api/conversations/{id}`
    FetchHistory { conversation_id: String },

    /// `GET /api/users/{user_id}/conversations`
    FetchConversations { user_id: String },
}

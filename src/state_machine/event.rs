//! Events that drive chat state transitions

use crate::types::{ChatResponse, Conversation};

/// Events that trigger state transitions
///
/// Timestamps travel inside events so transitions never read a clock.
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
        timestamp: String,
    },
    LoadRequested {
        conversation_id: String,
    },
    ConversationsRequested,
    NewConversation,
    UserInputChanged {
        text: String,
    },

    // Transport completions
    ReplyReceived {
        response: ChatResponse,
        timestamp: String,
    },
    ReplyFailed {
        timestamp: String,
    },
    HistoryReceived {
        conversation: Conversation,
    },
    HistoryFailed,
    ConversationsReceived {
        conversations: Vec<Conversation>,
    },
    ConversationsFailed,

    /// The operation awaiting a completion was dropped before it resolved
    OperationAbandoned,
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::UserMessage { .. } => "user_message",
            Event::LoadRequested { .. } => "load_requested",
            Event::ConversationsRequested => "conversations_requested",
            Event::NewConversation => "new_conversation",
            Event::UserInputChanged { .. } => "user_input_changed",
            Event::ReplyReceived { .. } => "reply_received",
            Event::ReplyFailed { .. } => "reply_failed",
            Event::HistoryReceived { .. } => "history_received",
            Event::HistoryFailed => "history_failed",
            Event::ConversationsReceived { .. } => "conversations_received",
            Event::ConversationsFailed => "conversations_failed",
            Event::OperationAbandoned => "operation_abandoned",
        }
    }
}

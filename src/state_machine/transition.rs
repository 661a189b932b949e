//! Pure state transition function

use super::{ChatContext, ChatState, Effect, Event, Phase};
use crate::types::{ChatRequest, Message};
use thiserror::Error;

/// Assistant message shown in place of a reply the backend failed to deliver
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in flight, wait for it to finish")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs. Each call
/// applies exactly one event to exactly one prior state.
pub fn transition(
    state: &ChatState,
    context: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&state.phase, event) {
        // ============================================================
        // Always-available events
        // ============================================================
        (_, Event::UserInputChanged { text }) => Ok(TransitionResult::new(ChatState {
            user_input: text,
            ..state.clone()
        })),

        // A completion still in flight must not write into the fresh conversation
        (phase, Event::NewConversation) => Ok(TransitionResult::new(ChatState {
            messages: vec![],
            current_conversation_id: None,
            phase: phase.clone().discarded(),
            ..state.clone()
        })),

        (Phase::Idle, Event::OperationAbandoned) => Ok(TransitionResult::new(state.clone())),
        (_, Event::OperationAbandoned) => Ok(TransitionResult::new(idle(state))),

        // ============================================================
        // Starting operations
        // ============================================================
        (Phase::Idle, Event::UserMessage { text, timestamp }) => {
            let request = ChatRequest {
                message: text.clone(),
                conversation_id: state.current_conversation_id.clone(),
                user_id: context.user_id.clone(),
            };

            let mut new_state = state.clone();
            new_state.phase = Phase::AwaitingReply {
                discard_result: false,
            };
            new_state.messages.push(Message::user(text, timestamp));

            Ok(TransitionResult::new(new_state).with_effect(Effect::SendMessage { request }))
        }

        (Phase::Idle, Event::LoadRequested { conversation_id }) => {
            let new_state = ChatState {
                phase: Phase::LoadingHistory {
                    conversation_id: conversation_id.clone(),
                    discard_result: false,
                },
                ..state.clone()
            };
            Ok(TransitionResult::new(new_state).with_effect(Effect::FetchHistory { conversation_id }))
        }

        (Phase::Idle, Event::ConversationsRequested) => {
            let new_state = ChatState {
                phase: Phase::ListingConversations,
                ..state.clone()
            };
            Ok(TransitionResult::new(new_state).with_effect(Effect::FetchConversations {
                user_id: context.user_id.clone(),
            }))
        }

        (_, Event::UserMessage { .. } | Event::LoadRequested { .. } | Event::ConversationsRequested) => {
            Err(TransitionError::Busy)
        }

        // ============================================================
        // Chat reply
        // ============================================================
        (Phase::AwaitingReply { discard_result: true }, Event::ReplyReceived { .. } | Event::ReplyFailed { .. }) => {
            Ok(TransitionResult::new(idle(state)))
        }

        (Phase::AwaitingReply { .. }, Event::ReplyReceived { response, timestamp }) => {
            let mut new_state = idle(state);
            new_state
                .messages
                .push(Message::assistant(response.response, timestamp));
            if new_state.current_conversation_id.is_none() {
                new_state.current_conversation_id = Some(response.conversation_id);
            }
            Ok(TransitionResult::new(new_state))
        }

        (Phase::AwaitingReply { .. }, Event::ReplyFailed { timestamp }) => {
            let mut new_state = idle(state);
            new_state
                .messages
                .push(Message::assistant(FALLBACK_REPLY, timestamp));
            Ok(TransitionResult::new(new_state))
        }

        // ============================================================
        // Conversation history
        // ============================================================
        (
            Phase::LoadingHistory {
                conversation_id,
                discard_result,
            },
            Event::HistoryReceived { conversation },
        ) => {
            let mut new_state = idle(state);
            if !*discard_result {
                new_state.messages = conversation.messages;
                new_state.current_conversation_id = Some(conversation_id.clone());
            }
            Ok(TransitionResult::new(new_state))
        }

        (Phase::LoadingHistory { .. }, Event::HistoryFailed) => Ok(TransitionResult::new(idle(state))),

        // ============================================================
        // Conversation listing
        // ============================================================
        (Phase::ListingConversations, Event::ConversationsReceived { conversations }) => {
            Ok(TransitionResult::new(ChatState {
                conversations,
                ..idle(state)
            }))
        }

        (Phase::ListingConversations, Event::ConversationsFailed) => Ok(TransitionResult::new(idle(state))),

        // ============================================================
        // Completions that don't match the outstanding operation
        // ============================================================
        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {phase:?}",
            event.name()
        ))),
    }
}

fn idle(state: &ChatState) -> ChatState {
    ChatState {
        phase: Phase::Idle,
        ..state.clone()
    }
}

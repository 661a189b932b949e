//! Chat store executor

use crate::state_machine::{transition, ChatContext, ChatState, Effect, Event, TransitionError};
use crate::transport::Transport;
use chrono::{SecondsFormat, Utc};
use tokio::sync::watch;

/// Single authoritative holder of `ChatState`
///
/// Every mutation goes through [`transition`] inside one `watch` update, so
/// each published state derives from exactly one prior state and one event.
/// Only one of send, load and refresh may be in flight; a second one is
/// rejected with [`TransitionError::Busy`].
pub struct ChatStore<T: Transport> {
    context: ChatContext,
    state: watch::Sender<ChatState>,
    transport: T,
}

impl<T: Transport> ChatStore<T> {
    pub fn new(context: ChatContext, transport: T) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self {
            context,
            state,
            transport,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    #[allow(dead_code)] // For surfaces that re-render on change
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    pub fn user_id(&self) -> &str {
        &self.context.user_id
    }

    /// Send `text` verbatim and append the reply, or a fallback on failure.
    ///
    /// The user message is visible before the request starts. Transport
    /// errors are logged and never returned.
    pub async fn send_message(&self, text: &str) -> Result<(), TransitionError> {
        let effects = self.dispatch(Event::UserMessage {
            text: text.to_string(),
            timestamp: now(),
        })?;
        self.run_effects(effects).await;
        Ok(())
    }

    /// Clear the transcript and forget the active conversation id
    pub fn start_new_conversation(&self) {
        self.complete(Event::NewConversation);
    }

    /// Replace the transcript with the backend's copy of `conversation_id`.
    ///
    /// On failure the current transcript is kept; the error is only logged.
    pub async fn load_conversation(&self, conversation_id: &str) -> Result<(), TransitionError> {
        let effects = self.dispatch(Event::LoadRequested {
            conversation_id: conversation_id.to_string(),
        })?;
        self.run_effects(effects).await;
        Ok(())
    }

    /// Store draft input text
    pub fn set_user_input(&self, text: &str) {
        self.complete(Event::UserInputChanged {
            text: text.to_string(),
        });
    }

    /// Re-fetch this user's conversation list
    pub async fn refresh_conversations(&self) -> Result<(), TransitionError> {
        let effects = self.dispatch(Event::ConversationsRequested)?;
        self.run_effects(effects).await;
        Ok(())
    }

    /// Apply one event atomically and return the effects it produced
    fn dispatch(&self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let name = event.name();
        let mut outcome = Ok(vec![]);

        self.state.send_if_modified(|state| {
            match transition(state, &self.context, event) {
                Ok(result) => {
                    *state = result.new_state;
                    outcome = Ok(result.effects);
                    true
                }
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            }
        });

        match &outcome {
            Ok(effects) => {
                tracing::debug!(event = name, effects = effects.len(), "State transition");
            }
            Err(e) => {
                tracing::warn!(event = name, error = %e, "Event rejected");
            }
        }
        outcome
    }

    /// Dispatch an event that cannot start an operation
    fn complete(&self, event: Event) {
        if let Ok(effects) = self.dispatch(event) {
            debug_assert!(effects.is_empty());
        }
    }

    async fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let mut release = ReleaseOnDrop::new(self);
            let completion = self.execute_effect(effect).await;
            release.disarm();
            self.complete(completion);
        }
    }

    async fn execute_effect(&self, effect: Effect) -> Event {
        match effect {
            Effect::SendMessage { request } => match self.transport.send_message(&request).await {
                Ok(response) => Event::ReplyReceived {
                    response,
                    timestamp: now(),
                },
                Err(e) => {
                    tracing::error!(error = %e, "Error sending message");
                    Event::ReplyFailed { timestamp: now() }
                }
            },

            Effect::FetchHistory { conversation_id } => {
                match self.transport.get_conversation_history(&conversation_id).await {
                    Ok(conversation) => Event::HistoryReceived { conversation },
                    Err(e) => {
                        tracing::error!(conversation_id = %conversation_id, error = %e, "Error loading conversation");
                        Event::HistoryFailed
                    }
                }
            }

            Effect::FetchConversations { user_id } => {
                match self.transport.get_user_conversations(&user_id).await {
                    Ok(conversations) => Event::ConversationsReceived { conversations },
                    Err(e) => {
                        tracing::error!(user_id = %user_id, error = %e, "Error listing conversations");
                        Event::ConversationsFailed
                    }
                }
            }
        }
    }
}

/// Releases the loading flag if an operation's future is dropped mid-flight
struct ReleaseOnDrop<'a, T: Transport> {
    store: &'a ChatStore<T>,
    armed: bool,
}

impl<'a, T: Transport> ReleaseOnDrop<'a, T> {
    fn new(store: &'a ChatStore<T>) -> Self {
        Self { store, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<T: Transport> Drop for ReleaseOnDrop<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Operation dropped before completion, releasing loading state");
            self.store.complete(Event::OperationAbandoned);
        }
    }
}

/// Current time as ISO-8601
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

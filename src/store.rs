//! Conversation store
//!
//! Owns the chat state, sequences transport calls against user actions and
//! publishes every new state to subscribers.

mod executor;


pub use executor::ChatStore;

use crate::state_machine::ChatContext;

/// Session identifier used when none is configured
pub const DEFAULT_USER_ID: &str = "user123";

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub user_id: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            user_id: std::env::var("CHAT_USER_ID")
                .ok()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        }
    }

    pub fn context(&self) -> ChatContext {
        ChatContext::new(self.user_id.clone())
    }
}

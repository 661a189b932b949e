//! Core chat state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatContext, ChatState, Phase};
pub use transition::{transition, TransitionError};
#[allow(unused_imports)] // Used by store tests
pub use transition::FALLBACK_REPLY;

//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::types::{ChatResponse, Conversation, Message, Role};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ChatContext {
    ChatContext::new("user123")
}

const TIMESTAMP: &str = "2024-05-01T10:00:00Z";

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant)]
}

fn arb_message() -> impl Strategy<Value = Message> {
    ("[a-zA-Z ]{0,40}", arb_role()).prop_map(|(content, role)| Message {
        content,
        role,
        timestamp: Some(TIMESTAMP.to_string()),
    })
}

fn arb_conversation() -> impl Strategy<Value = Conversation> {
    ("c[0-9]{1,3}", proptest::collection::vec(arb_message(), 0..6)).prop_map(|(id, messages)| {
        Conversation {
            id,
            title: None,
            messages,
            created_at: TIMESTAMP.to_string(),
            updated_at: None,
        }
    })
}

fn arb_chat_response() -> impl Strategy<Value = ChatResponse> {
    ("[a-zA-Z ]{1,30}", "c[0-9]{1,3}").prop_map(|(response, conversation_id)| ChatResponse {
        response,
        conversation_id,
        message_id: "m1".to_string(),
    })
}

fn arb_idle_state() -> impl Strategy<Value = ChatState> {
    (
        proptest::collection::vec(arb_message(), 0..6),
        proptest::option::of("c[0-9]{1,3}"),
        "[a-z ]{0,10}",
    )
        .prop_map(|(messages, current_conversation_id, user_input)| ChatState {
            messages,
            phase: Phase::Idle,
            current_conversation_id,
            conversations: vec![],
            user_input,
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{1,30}".prop_map(|text| Event::UserMessage {
            text,
            timestamp: TIMESTAMP.to_string(),
        }),
        "c[0-9]{1,3}".prop_map(|conversation_id| Event::LoadRequested { conversation_id }),
        Just(Event::ConversationsRequested),
        Just(Event::NewConversation),
        "[a-z ]{0,10}".prop_map(|text| Event::UserInputChanged { text }),
        arb_chat_response().prop_map(|response| Event::ReplyReceived {
            response,
            timestamp: TIMESTAMP.to_string(),
        }),
        Just(Event::ReplyFailed {
            timestamp: TIMESTAMP.to_string(),
        }),
        arb_conversation().prop_map(|conversation| Event::HistoryReceived { conversation }),
        Just(Event::HistoryFailed),
        proptest::collection::vec(arb_conversation(), 0..3)
            .prop_map(|conversations| Event::ConversationsReceived { conversations }),
        Just(Event::ConversationsFailed),
        Just(Event::OperationAbandoned),
    ]
}

// ============================================================================
// Validity Checkers
// ============================================================================

/// Each effect starts the operation recorded in the new phase, and only
/// an Idle -> busy step produces one.
fn effects_are_valid(effects: &[Effect], old: &ChatState, new: &ChatState) -> bool {
    match effects {
        [] => true,
        [effect] => {
            old.phase.is_idle()
                && match (effect, &new.phase) {
                    (Effect::SendMessage { .. }, Phase::AwaitingReply { discard_result }) => !discard_result,
                    (
                        Effect::FetchHistory { conversation_id },
                        Phase::LoadingHistory {
                            conversation_id: pending,
                            discard_result,
                        },
                    ) => conversation_id == pending && !discard_result,
                    (Effect::FetchConversations { user_id }, Phase::ListingConversations) => {
                        user_id == "user123"
                    }
                    _ => false,
                }
        }
        _ => false,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: effects always agree with the phase they start
    #[test]
    fn prop_effects_match_phase(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = ChatState::default();
        let ctx = test_context();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                prop_assert!(
                    effects_are_valid(&result.effects, &state, &result.new_state),
                    "Invalid effects {:?} for {:?} -> {:?}",
                    result.effects,
                    state.phase,
                    result.new_state.phase
                );
                state = result.new_state;
            }
        }
    }

    // Invariant 2: a second operation is rejected while one is in flight
    #[test]
    fn prop_busy_rejects_overlap(
        events in proptest::collection::vec(arb_event(), 0..30),
        text in "[a-zA-Z ]{1,20}"
    ) {
        let mut state = ChatState::default();
        let ctx = test_context();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                state = result.new_state;
            }
        }

        let result = transition(&state, &ctx, Event::UserMessage {
            text,
            timestamp: TIMESTAMP.to_string(),
        });
        if state.is_loading() {
            prop_assert_eq!(result.unwrap_err(), TransitionError::Busy);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    // Invariant 3: successful round trips grow the transcript by two, in order
    #[test]
    fn prop_successful_sends_append_pairs(
        texts in proptest::collection::vec("[a-zA-Z ]{1,20}", 1..8),
        conversation_id in "c[0-9]{1,3}"
    ) {
        let mut state = ChatState::default();
        let ctx = test_context();

        for (i, text) in texts.iter().enumerate() {
            let sent = transition(&state, &ctx, Event::UserMessage {
                text: text.clone(),
                timestamp: TIMESTAMP.to_string(),
            }).unwrap();
            prop_assert!(sent.new_state.is_loading());

            let replied = transition(&sent.new_state, &ctx, Event::ReplyReceived {
                response: ChatResponse {
                    response: format!("reply {i}"),
                    conversation_id: conversation_id.clone(),
                    message_id: format!("m{i}"),
                },
                timestamp: TIMESTAMP.to_string(),
            }).unwrap();
            state = replied.new_state;

            prop_assert!(!state.is_loading());
            prop_assert_eq!(state.messages.len(), 2 * (i + 1));
            prop_assert_eq!(&state.messages[2 * i].content, text);
            prop_assert_eq!(state.messages[2 * i].role, Role::User);
            prop_assert_eq!(state.messages[2 * i + 1].role, Role::Assistant);
        }

        prop_assert_eq!(state.current_conversation_id, Some(conversation_id));
    }

    // Invariant 4: new conversation always yields an empty transcript
    #[test]
    fn prop_new_conversation_clears(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = ChatState::default();
        let ctx = test_context();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                state = result.new_state;
            }
        }

        let fresh = transition(&state, &ctx, Event::NewConversation).unwrap().new_state;
        prop_assert!(fresh.messages.is_empty());
        prop_assert_eq!(&fresh.current_conversation_id, &None);
        prop_assert_eq!(&fresh.conversations, &state.conversations);
        prop_assert_eq!(fresh.is_loading(), state.is_loading());
    }

    // Invariant 5: every in-flight operation is released by its failure
    #[test]
    fn prop_failure_releases_loading(state in arb_idle_state(), conversation_id in "c[0-9]{1,3}") {
        let ctx = test_context();
        let starts_and_failures = [
            (
                Event::UserMessage { text: "hi".to_string(), timestamp: TIMESTAMP.to_string() },
                Event::ReplyFailed { timestamp: TIMESTAMP.to_string() },
            ),
            (Event::LoadRequested { conversation_id }, Event::HistoryFailed),
            (Event::ConversationsRequested, Event::ConversationsFailed),
        ];

        for (start, failure) in starts_and_failures {
            let busy = transition(&state, &ctx, start).unwrap().new_state;
            prop_assert!(busy.is_loading());
            let released = transition(&busy, &ctx, failure).unwrap().new_state;
            prop_assert!(!released.is_loading());
        }
    }

    // Invariant 6: a failed load leaves the transcript and id untouched
    #[test]
    fn prop_failed_load_is_silent(state in arb_idle_state(), conversation_id in "c[0-9]{1,3}") {
        let ctx = test_context();
        let loading = transition(&state, &ctx, Event::LoadRequested { conversation_id })
            .unwrap()
            .new_state;
        let after = transition(&loading, &ctx, Event::HistoryFailed).unwrap().new_state;
        prop_assert_eq!(after, state);
    }

    // Invariant 7: a successful load replaces the transcript wholesale
    #[test]
    fn prop_load_replaces_transcript(state in arb_idle_state(), conversation in arb_conversation()) {
        let ctx = test_context();
        let loading = transition(&state, &ctx, Event::LoadRequested {
            conversation_id: conversation.id.clone(),
        })
        .unwrap()
        .new_state;
        let loaded = transition(&loading, &ctx, Event::HistoryReceived {
            conversation: conversation.clone(),
        })
        .unwrap()
        .new_state;

        prop_assert_eq!(&loaded.messages, &conversation.messages);
        prop_assert_eq!(&loaded.current_conversation_id, &Some(conversation.id.clone()));
        prop_assert!(!loaded.is_loading());
    }
}

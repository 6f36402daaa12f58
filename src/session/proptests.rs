//! Property-based tests for session invariants
//!
//! These tests verify key invariants hold across arbitrary turn sequences.

use super::*;
use crate::analysis::render_transcript;
use crate::backend::Backend;
use crate::llm::{LlmError, LlmResponse, Message, Role};
use crate::prompts::{SYSTEM_PROMPT, TURN_FALLBACK};
use crate::testing::MockLlmService;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// A scripted backend answer: `Some(text)` succeeds, `None` fails
fn arb_backend_answer() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => "[a-zA-Z ,.!?]{1,40}".prop_map(Some),
        1 => Just(None),
    ]
}

fn arb_turns() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::vec(("[ -~]{0,60}", arb_backend_answer()), 0..12)
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop_oneof![Just(Role::System), Just(Role::User), Just(Role::Assistant)],
        "[a-z ]{0,20}",
    )
        .prop_map(|(role, content)| Message { role, content })
}

fn queue(mock: &MockLlmService, answer: Option<&str>) {
    match answer {
        Some(text) => mock.queue_response(LlmResponse::from_text(text)),
        None => mock.queue_error(LlmError::network("scripted failure")),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Each turn adds exactly one user and one assistant message, bumps the
    /// counter by one, and the system instruction stays first and unchanged.
    #[test]
    fn prop_turns_append_pairs(greeting in arb_backend_answer(), turns in arb_turns()) {
        runtime().block_on(async {
            let mock = Arc::new(MockLlmService::new("mock"));
            queue(&mock, greeting.as_deref());
            for (_, answer) in &turns {
                queue(&mock, answer.as_deref());
            }
            let manager = SessionManager::new(Arc::new(TranscriptStore::new()), Backend::new(mock));

            let created = manager.create().await;
            let mut expected_len = 2;

            for (i, (text, answer)) in turns.iter().enumerate() {
                let turn = manager.advance(&created.id, text.clone()).await.unwrap();
                expected_len += 2;

                prop_assert_eq!(turn.turn_count as usize, i + 1);
                let expected_reply = match answer {
                    Some(a) if !a.trim().is_empty() => a.as_str(),
                    _ => TURN_FALLBACK,
                };
                prop_assert_eq!(turn.reply.as_str(), expected_reply);

                let handle = manager.store().get(&created.id).await.unwrap();
                let state = handle.lock().await;
                let messages = state.messages();
                prop_assert_eq!(messages.len(), expected_len);
                prop_assert_eq!(&messages[0], &Message::system(SYSTEM_PROMPT));
                prop_assert_eq!(messages.iter().filter(|m| m.role == Role::System).count(), 1);
                prop_assert_eq!(&messages[expected_len - 2], &Message::user(text.clone()));
                prop_assert_eq!(messages[expected_len - 1].role, Role::Assistant);
            }
            Ok(())
        })?;
    }

    /// Rendering drops system entries and keeps the others in order.
    #[test]
    fn prop_render_excludes_system_and_preserves_order(messages in prop::collection::vec(arb_message(), 0..20)) {
        let rendered = render_transcript(&messages);
        let expected: Vec<String> = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| match m.role {
                Role::User => format!("User: {}", m.content),
                _ => format!("AI: {}", m.content),
            })
            .collect();

        prop_assert_eq!(rendered, expected.join("\n"));
    }

    /// Unknown ids are rejected whatever the store holds, with no backend call.
    #[test]
    fn prop_unknown_id_is_not_found(existing in 0usize..4, probe in "[a-f0-9-]{1,36}") {
        runtime().block_on(async {
            let mock = Arc::new(MockLlmService::new("mock"));
            let manager = SessionManager::new(
                Arc::new(TranscriptStore::new()),
                Backend::new(Arc::clone(&mock) as Arc<dyn crate::llm::LlmService>),
            );
            let mut ids = Vec::new();
            for _ in 0..existing {
                ids.push(manager.create().await.id);
            }
            prop_assume!(!ids.contains(&probe));
            let calls_before = mock.recorded_requests().len();

            let result = manager.advance(&probe, "hello".to_string()).await;
            prop_assert!(matches!(result, Err(SessionError::NotFound(_))));
            prop_assert_eq!(mock.recorded_requests().len(), calls_before);
            Ok(())
        })?;
    }
}

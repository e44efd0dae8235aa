//! Property tests for the execution-event translator, plus a pinned
//! end-to-end streaming scenario.
//!
//! The properties hold for any event script an executor might emit:
//! 1. Token fragments pass through verbatim, in arrival order
//! 2. The client never sees the same node announced twice in a row
//! 3. Every state snapshot reaches the client, with no fields merged in
//! 4. Announced node names never carry pipeline path prefixes

use futures::StreamExt;
use proptest::prelude::*;
use std::sync::Arc;

use netmind::adapters::agent::ScriptedExecutor;
use netmind::adapters::session::InMemorySessionStore;
use netmind::application::handlers::{
    IncomingMessage, StreamQueryCommand, StreamQueryConfig, StreamQueryHandler,
};
use netmind::domain::agent::{
    ClientEvent, EventTranslator, ExecutionEvent, NodeStatus, StateSnapshot,
};
use netmind::domain::session::{Role, SessionKey};

// =============================================================================
// Strategies
// =============================================================================

fn node_status() -> impl Strategy<Value = NodeStatus> {
    prop_oneof![Just(NodeStatus::Started), Just(NodeStatus::Completed)]
}

fn node_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "plan",
        "respond",
        "agent.retrieve",
        "agent.respond",
        "pipeline.agent.act",
    ])
    .prop_map(str::to_string)
}

fn steps() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec("[a-z_]{1,8}", 0..3))
}

fn execution_event() -> impl Strategy<Value = ExecutionEvent> {
    prop_oneof![
        (node_name(), node_status())
            .prop_map(|(name, status)| ExecutionEvent::NodeLifecycle { name, status }),
        "[ -~]{0,12}".prop_map(|content| ExecutionEvent::Token { content }),
        (steps(), steps(), steps()).prop_map(|(plan_steps, executed_tools, executed_steps)| {
            ExecutionEvent::StateSnapshot(StateSnapshot {
                plan_steps,
                executed_tools,
                executed_steps,
            })
        }),
    ]
}

fn translate_all(events: &[ExecutionEvent]) -> Vec<ClientEvent> {
    let mut translator = EventTranslator::new();
    events
        .iter()
        .filter_map(|event| translator.translate(event))
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn tokens_pass_through_verbatim_and_in_order(
        events in prop::collection::vec(execution_event(), 0..40)
    ) {
        let outputs = translate_all(&events);

        let sent: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                ExecutionEvent::Token { content } if !content.is_empty() => {
                    Some(content.as_str())
                }
                _ => None,
            })
            .collect();
        let delivered: Vec<&str> = outputs
            .iter()
            .filter_map(|event| match event {
                ClientEvent::Token { content } => Some(content.as_str()),
                _ => None,
            })
            .collect();

        prop_assert_eq!(sent, delivered);
    }

    #[test]
    fn adjacent_node_updates_always_differ(
        events in prop::collection::vec(execution_event(), 0..40)
    ) {
        let nodes: Vec<String> = translate_all(&events)
            .into_iter()
            .filter_map(|event| match event {
                ClientEvent::NodeUpdate { node, .. } => Some(node),
                _ => None,
            })
            .collect();

        for pair in nodes.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn every_snapshot_reaches_the_client(
        events in prop::collection::vec(execution_event(), 0..40)
    ) {
        let outputs = translate_all(&events);

        let sent = events
            .iter()
            .filter(|event| matches!(event, ExecutionEvent::StateSnapshot(_)))
            .count();
        let delivered = outputs
            .iter()
            .filter(|event| matches!(event, ClientEvent::StateUpdate { .. }))
            .count();

        prop_assert_eq!(sent, delivered);
        prop_assert!(outputs.len() <= events.len());
    }

    #[test]
    fn announced_node_names_carry_no_path_prefix(
        events in prop::collection::vec(execution_event(), 0..40)
    ) {
        for event in translate_all(&events) {
            if let ClientEvent::NodeUpdate { node, .. } = event {
                prop_assert!(!node.contains('.'));
                prop_assert!(!node.is_empty());
            }
        }
    }

    #[test]
    fn translation_is_deterministic(
        events in prop::collection::vec(execution_event(), 0..40)
    ) {
        prop_assert_eq!(translate_all(&events), translate_all(&events));
    }
}

// =============================================================================
// Pinned scenario
// =============================================================================

fn query(content: &str) -> StreamQueryCommand {
    StreamQueryCommand {
        session_key: SessionKey::new("stream-scenario").unwrap(),
        user_key: None,
        messages: vec![IncomingMessage {
            role: Role::User,
            content: content.to_string(),
        }],
    }
}

/// The full frame sequence for a scripted two-node run, frame by frame.
#[tokio::test]
async fn scripted_run_produces_the_exact_frame_sequence() {
    let handler = StreamQueryHandler::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(ScriptedExecutor::new().with_answer("BGP sessions are stable.")),
        StreamQueryConfig::default(),
    );

    let events: Vec<ClientEvent> = handler
        .handle(query("how is BGP doing?"))
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(
        events,
        vec![
            ClientEvent::node_update("retrieve", NodeStatus::Started),
            ClientEvent::StateUpdate {
                plan_steps: vec!["retrieve".to_string(), "respond".to_string()],
                executed_tools: vec!["vector_search".to_string()],
                executed_steps: vec!["retrieve".to_string()],
            },
            ClientEvent::node_update("respond", NodeStatus::Started),
            ClientEvent::token("BGP sessions are stable."),
            ClientEvent::FinalResponse {
                content: "BGP sessions are stable.".to_string(),
                executed_tools: vec!["vector_search".to_string()],
                executed_steps: vec!["retrieve".to_string(), "respond".to_string()],
                thought_chain: None,
            },
            ClientEvent::Done,
        ]
    );
}

/// Every frame of a successful stream serializes to JSON carrying a
/// `type` discriminator; the translator and the wire protocol agree.
#[tokio::test]
async fn every_frame_serializes_with_a_type_discriminator() {
    let handler = StreamQueryHandler::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(ScriptedExecutor::new().with_answer("ok")),
        StreamQueryConfig::default(),
    );

    let events: Vec<ClientEvent> = handler
        .handle(query("status?"))
        .await
        .unwrap()
        .collect()
        .await;

    for event in events {
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("type").is_some(), "frame without type: {value}");
    }
}

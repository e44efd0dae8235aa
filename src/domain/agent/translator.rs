//! Execution-event to client-event translation.
//!
//! The translator is a pure state machine: one `ExecutionEvent` in, at
//! most one `ClientEvent` out, in arrival order. The only state carried
//! across a stream is the identifier of the last node announced to the
//! client, used to collapse consecutive lifecycle notifications for the
//! same node into a single transition.

use super::events::{ClientEvent, ExecutionEvent};

/// Translates a single query's execution events into client events.
///
/// One translator instance serves exactly one stream; construct a fresh
/// one per query.
#[derive(Debug, Default)]
pub struct EventTranslator {
    last_node: Option<String>,
}

impl EventTranslator {
    /// Creates a translator with no node announced yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one execution event.
    ///
    /// Returns `None` for suppressed events: repeated lifecycle
    /// notifications for the node most recently announced, and empty
    /// token fragments.
    pub fn translate(&mut self, event: &ExecutionEvent) -> Option<ClientEvent> {
        match event {
            ExecutionEvent::NodeLifecycle { name, status } => {
                let node = short_node_name(name);
                if self.last_node.as_deref() == Some(node) {
                    return None;
                }
                self.last_node = Some(node.to_string());
                Some(ClientEvent::node_update(node, *status))
            }
            ExecutionEvent::Token { content } => {
                if content.is_empty() {
                    return None;
                }
                Some(ClientEvent::token(content.clone()))
            }
            ExecutionEvent::StateSnapshot(snapshot) => Some(ClientEvent::StateUpdate {
                plan_steps: snapshot.plan_steps.clone().unwrap_or_default(),
                executed_tools: snapshot.executed_tools.clone().unwrap_or_default(),
                executed_steps: snapshot.executed_steps.clone().unwrap_or_default(),
            }),
        }
    }
}

/// Trailing path component of a dotted node name.
fn short_node_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

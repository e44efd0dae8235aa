//! Evaluation Observer Adapter
//!
//! Records node transitions and final answers from streaming runs so
//! offline evaluation can replay what the agent did per session. Data
//! stays in memory; accessors hand out snapshots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::domain::agent::{AgentFinalState, NodeStatus};
use crate::domain::session::SessionKey;
use crate::ports::StreamObserver;

/// A recorded node lifecycle transition.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTransition {
    pub session_key: SessionKey,
    pub node: String,
    pub status: NodeStatus,
    pub at: DateTime<Utc>,
}

/// A recorded final answer with its execution metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalAnswer {
    pub session_key: SessionKey,
    pub answer: String,
    pub executed_tools: Vec<String>,
    pub executed_steps: Vec<String>,
    pub at: DateTime<Utc>,
}

/// In-memory recorder of streaming runs.
#[derive(Debug, Default)]
pub struct EvaluationObserver {
    node_transitions: Mutex<Vec<NodeTransition>>,
    final_answers: Mutex<Vec<FinalAnswer>>,
}

impl EvaluationObserver {
    /// Creates an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded node transition.
    pub fn node_transitions(&self) -> Vec<NodeTransition> {
        self.node_transitions
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Returns every recorded final answer.
    pub fn final_answers(&self) -> Vec<FinalAnswer> {
        self.final_answers
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StreamObserver for EvaluationObserver {
    async fn on_node_update(&self, session_key: &SessionKey, node: &str, status: NodeStatus) {
        debug!(session = %session_key, node, ?status, "observed node transition");

        if let Ok(mut transitions) = self.node_transitions.lock() {
            transitions.push(NodeTransition {
                session_key: session_key.clone(),
                node: node.to_string(),
                status,
                at: Utc::now(),
            });
        }
    }

    async fn on_final_response(&self, session_key: &SessionKey, state: &AgentFinalState) {
        let answer = state.resolved_answer().to_string();
        info!(
            session = %session_key,
            answer_len = answer.len(),
            steps = state.executed_steps.len(),
            "observed final response"
        );

        if let Ok(mut answers) = self.final_answers.lock() {
            answers.push(FinalAnswer {
                session_key: session_key.clone(),
                answer,
                executed_tools: state.executed_tools.clone(),
                executed_steps: state.executed_steps.clone(),
                at: Utc::now(),
            });
        }
    }
}

//! Scripted Agent Executor Adapter
//!
//! Replays a fixed event script and final state instead of running a
//! real pipeline. Used in tests and for demoing the streaming protocol
//! without a model backend.
//!
//! # Example
//!
//! ```ignore
//! let executor = ScriptedExecutor::new().with_answer("All links are up.");
//! let events = executor.stream_events(&history).await?;
//! ```

use async_trait::async_trait;
use futures::stream;

use crate::domain::agent::{AgentFinalState, ExecutionEvent, NodeStatus, StateSnapshot};
use crate::domain::session::Message;
use crate::ports::{AgentExecutor, ExecutionEventStream, ExecutorError};

/// Agent executor that replays a pre-configured script.
#[derive(Debug, Clone)]
pub struct ScriptedExecutor {
    events: Vec<ExecutionEvent>,
    trailing_error: Option<ExecutorError>,
    final_state: Result<AgentFinalState, ExecutorError>,
}

impl ScriptedExecutor {
    /// Creates an executor with an empty script.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            trailing_error: None,
            final_state: Ok(AgentFinalState::default()),
        }
    }

    /// Configures a complete two-node run that answers with `answer`.
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        let events = vec![
            ExecutionEvent::NodeLifecycle {
                name: "agent.retrieve".to_string(),
                status: NodeStatus::Started,
            },
            ExecutionEvent::NodeLifecycle {
                name: "agent.retrieve".to_string(),
                status: NodeStatus::Completed,
            },
            ExecutionEvent::StateSnapshot(StateSnapshot {
                plan_steps: Some(vec!["retrieve".to_string(), "respond".to_string()]),
                executed_tools: Some(vec!["vector_search".to_string()]),
                executed_steps: Some(vec!["retrieve".to_string()]),
            }),
            ExecutionEvent::NodeLifecycle {
                name: "agent.respond".to_string(),
                status: NodeStatus::Started,
            },
            ExecutionEvent::Token {
                content: answer.clone(),
            },
            ExecutionEvent::NodeLifecycle {
                name: "agent.respond".to_string(),
                status: NodeStatus::Completed,
            },
        ];
        let final_state = AgentFinalState {
            final_output: Some(answer),
            executed_tools: vec!["vector_search".to_string()],
            executed_steps: vec!["retrieve".to_string(), "respond".to_string()],
            ..Default::default()
        };
        self.with_events(events).with_final_state(final_state)
    }

    /// Replaces the event script.
    pub fn with_events(mut self, events: Vec<ExecutionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Replaces the final state.
    pub fn with_final_state(mut self, state: AgentFinalState) -> Self {
        self.final_state = Ok(state);
        self
    }

    /// Emits `error` as the last stream item, after the scripted events.
    pub fn with_stream_error(mut self, error: ExecutorError) -> Self {
        self.trailing_error = Some(error);
        self
    }

    /// Makes `final_state` fail with `error`.
    pub fn with_final_error(mut self, error: ExecutorError) -> Self {
        self.final_state = Err(error);
        self
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentExecutor for ScriptedExecutor {
    async fn stream_events(
        &self,
        _messages: &[Message],
    ) -> Result<ExecutionEventStream, ExecutorError> {
        let items: Vec<Result<ExecutionEvent, ExecutorError>> = self
            .events
            .iter()
            .cloned()
            .map(Ok)
            .chain(self.trailing_error.clone().map(Err))
            .collect();
        Ok(Box::pin(stream::iter(items)))
    }

    async fn final_state(&self, _messages: &[Message]) -> Result<AgentFinalState, ExecutorError> {
        self.final_state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_scripted_answer_replays_both_nodes() {
        let executor = ScriptedExecutor::new().with_answer("done");

        let events: Vec<_> = executor
            .stream_events(&[])
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|e| e.is_ok()));
        assert!(matches!(
            events[0].as_ref().unwrap(),
            ExecutionEvent::NodeLifecycle { name, .. } if name == "agent.retrieve"
        ));

        let state = executor.final_state(&[]).await.unwrap();
        assert_eq!(state.resolved_answer(), "done");
        assert_eq!(state.executed_steps, vec!["retrieve", "respond"]);
    }

    #[tokio::test]
    async fn test_stream_error_is_last_item() {
        let executor = ScriptedExecutor::new()
            .with_events(vec![ExecutionEvent::Token {
                content: "partial".to_string(),
            }])
            .with_stream_error(ExecutorError::completion("model gone"));

        let events: Vec<_> = executor
            .stream_events(&[])
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert!(events[1].is_err());
    }

    #[tokio::test]
    async fn test_final_error_is_reported() {
        let executor =
            ScriptedExecutor::new().with_final_error(ExecutorError::internal("state lost"));

        assert!(executor.final_state(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_script_replays_for_every_call() {
        let executor = ScriptedExecutor::new().with_answer("stable");

        for _ in 0..3 {
            let events: Vec<_> = executor
                .stream_events(&[])
                .await
                .unwrap()
                .collect()
                .await;
            assert_eq!(events.len(), 6);
        }
    }
}

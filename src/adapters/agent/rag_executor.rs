//! RAG Agent Executor - Retrieval-augmented answer pipeline.
//!
//! Runs a two-node pipeline per query: `agent.retrieve` embeds the
//! latest user query and pulls the nearest document chunks from the
//! vector index, `agent.respond` streams a completion grounded in
//! those chunks. Progress surfaces as execution events; the aggregate
//! outcome is reported through `final_state`.

use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tracing::debug;

use crate::domain::agent::{AgentFinalState, ExecutionEvent, NodeStatus, StateSnapshot};
use crate::domain::session::{Message, Role};
use crate::ports::{
    AgentExecutor, ChatMessage, ChatModel, ChatRequest, EmbeddingGenerator, ExecutionEventStream,
    ExecutorError, ScoredChunk, VectorIndex,
};

const RETRIEVE_NODE: &str = "agent.retrieve";
const RESPOND_NODE: &str = "agent.respond";

const SYSTEM_PROMPT: &str = "You are NetMind, a network operations assistant. \
Answer using the context retrieved from the operations knowledge base. \
When the context does not cover the question, say so instead of guessing.";

/// Tuning knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct RagExecutorConfig {
    /// Number of chunks retrieved per query.
    pub top_k: usize,
    /// Completion temperature.
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
}

impl Default for RagExecutorConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

/// Retrieval-augmented agent executor.
pub struct RagAgentExecutor {
    chat: Arc<dyn ChatModel>,
    embeddings: Arc<dyn EmbeddingGenerator>,
    index: Arc<dyn VectorIndex>,
    config: RagExecutorConfig,
}

impl RagAgentExecutor {
    /// Creates an executor over the given providers.
    pub fn new(
        chat: Arc<dyn ChatModel>,
        embeddings: Arc<dyn EmbeddingGenerator>,
        index: Arc<dyn VectorIndex>,
        config: RagExecutorConfig,
    ) -> Self {
        Self {
            chat,
            embeddings,
            index,
            config,
        }
    }
}

#[async_trait]
impl AgentExecutor for RagAgentExecutor {
    async fn stream_events(
        &self,
        messages: &[Message],
    ) -> Result<ExecutionEventStream, ExecutorError> {
        let query = latest_user_query(messages)?;
        let history = messages.to_vec();
        let chat = Arc::clone(&self.chat);
        let embeddings = Arc::clone(&self.embeddings);
        let index = Arc::clone(&self.index);
        let config = self.config.clone();

        let events = stream! {
            yield Ok(lifecycle(RETRIEVE_NODE, NodeStatus::Started));

            let context = match retrieve_context(
                embeddings.as_ref(),
                index.as_ref(),
                &query,
                config.top_k,
            )
            .await
            {
                Ok(context) => context,
                Err(error) => {
                    yield Err(error);
                    return;
                }
            };
            debug!(chunks = context.len(), "context retrieved");

            yield Ok(lifecycle(RETRIEVE_NODE, NodeStatus::Completed));
            yield Ok(ExecutionEvent::StateSnapshot(StateSnapshot {
                plan_steps: Some(vec!["retrieve".to_string(), "respond".to_string()]),
                executed_tools: Some(vec!["vector_search".to_string()]),
                executed_steps: Some(vec!["retrieve".to_string()]),
            }));
            yield Ok(lifecycle(RESPOND_NODE, NodeStatus::Started));

            let request = build_request(&history, &context, config.temperature, config.max_tokens);
            let mut deltas = match chat.stream_complete(request).await {
                Ok(deltas) => deltas,
                Err(error) => {
                    yield Err(ExecutorError::completion(error.to_string()));
                    return;
                }
            };

            while let Some(delta) = deltas.next().await {
                match delta {
                    Ok(delta) => {
                        if !delta.content.is_empty() {
                            yield Ok(ExecutionEvent::Token {
                                content: delta.content,
                            });
                        }
                    }
                    Err(error) => {
                        yield Err(ExecutorError::completion(error.to_string()));
                        return;
                    }
                }
            }

            yield Ok(lifecycle(RESPOND_NODE, NodeStatus::Completed));
        };

        Ok(Box::pin(events))
    }

    async fn final_state(&self, messages: &[Message]) -> Result<AgentFinalState, ExecutorError> {
        let query = latest_user_query(messages)?;
        let context = retrieve_context(
            self.embeddings.as_ref(),
            self.index.as_ref(),
            &query,
            self.config.top_k,
        )
        .await?;

        let request = build_request(
            messages,
            &context,
            self.config.temperature,
            self.config.max_tokens,
        );
        let completion = self
            .chat
            .complete(request)
            .await
            .map_err(|error| ExecutorError::completion(error.to_string()))?;

        Ok(AgentFinalState {
            supervised_output: None,
            final_output: Some(completion.content),
            executed_tools: vec!["vector_search".to_string()],
            executed_steps: vec!["retrieve".to_string(), "respond".to_string()],
            thought_chain: context.iter().map(chunk_summary).collect(),
        })
    }
}

fn lifecycle(name: &str, status: NodeStatus) -> ExecutionEvent {
    ExecutionEvent::NodeLifecycle {
        name: name.to_string(),
        status,
    }
}

fn latest_user_query(messages: &[Message]) -> Result<String, ExecutorError> {
    messages
        .iter()
        .rev()
        .find(|message| message.role() == Role::User)
        .map(|message| message.content().to_string())
        .ok_or_else(|| ExecutorError::internal("history holds no user message"))
}

async fn retrieve_context(
    embeddings: &dyn EmbeddingGenerator,
    index: &dyn VectorIndex,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>, ExecutorError> {
    let vectors = embeddings
        .embed(&[query.to_string()])
        .await
        .map_err(|error| ExecutorError::retrieval(error.to_string()))?;
    let vector = vectors
        .into_iter()
        .next()
        .ok_or_else(|| ExecutorError::retrieval("embedding batch came back empty"))?;

    index
        .search(&vector, top_k)
        .await
        .map_err(|error| ExecutorError::retrieval(error.to_string()))
}

fn build_request(
    history: &[Message],
    context: &[ScoredChunk],
    temperature: f32,
    max_tokens: u32,
) -> ChatRequest {
    let mut system = String::from(SYSTEM_PROMPT);
    if !context.is_empty() {
        system.push_str("\n\nContext:\n");
        for (position, chunk) in context.iter().enumerate() {
            system.push_str(&format!("[{}] {}\n", position + 1, chunk.text));
        }
    }

    let mut request = ChatRequest::new().with_message(ChatMessage::system(system));
    for message in history {
        request = request.with_message(match message.role() {
            Role::User => ChatMessage::user(message.content()),
            Role::Assistant => ChatMessage::assistant(message.content()),
        });
    }
    request
        .with_temperature(temperature)
        .with_max_tokens(max_tokens)
}

/// One thought-chain line per retrieved chunk.
fn chunk_summary(chunk: &ScoredChunk) -> String {
    const PREVIEW_CHARS: usize = 120;
    let preview: String = chunk.text.chars().take(PREVIEW_CHARS).collect();
    format!("score {:.3}: {}", chunk.score, preview.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{DocumentChunk, DocumentId};
    use crate::ports::{
        ChatCompletion, ChatDelta, ChatDeltaStream, ChatModelError, EmbeddingError,
        VectorIndexError,
    };
    use futures::stream;
    use std::sync::Mutex;

    struct StubChatModel {
        deltas: Vec<&'static str>,
        answer: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl ChatModel for StubChatModel {
        async fn complete(&self, _request: ChatRequest) -> Result<ChatCompletion, ChatModelError> {
            if self.fail {
                return Err(ChatModelError::unavailable("stub down"));
            }
            Ok(ChatCompletion {
                content: self.answer.to_string(),
                model: "stub".to_string(),
            })
        }

        async fn stream_complete(
            &self,
            _request: ChatRequest,
        ) -> Result<ChatDeltaStream, ChatModelError> {
            if self.fail {
                return Err(ChatModelError::unavailable("stub down"));
            }
            let deltas: Vec<Result<ChatDelta, ChatModelError>> = self
                .deltas
                .iter()
                .map(|content| Ok(ChatDelta::content(*content)))
                .collect();
            Ok(Box::pin(stream::iter(deltas)))
        }
    }

    struct StubEmbeddings {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingGenerator for StubEmbeddings {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            if self.fail {
                return Err(EmbeddingError::network("stub offline"));
            }
            Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
        }

        fn dimension(&self) -> usize {
            3
        }
    }

    struct StubIndex {
        chunks: Vec<ScoredChunk>,
        searches: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl VectorIndex for StubIndex {
        async fn ensure_collection(&self) -> Result<(), VectorIndexError> {
            Ok(())
        }

        async fn upsert_chunks(
            &self,
            _chunks: &[DocumentChunk],
            _vectors: &[Vec<f32>],
        ) -> Result<(), VectorIndexError> {
            Ok(())
        }

        async fn search(
            &self,
            _vector: &[f32],
            limit: usize,
        ) -> Result<Vec<ScoredChunk>, VectorIndexError> {
            self.searches.lock().unwrap().push(limit);
            Ok(self.chunks.clone())
        }

        async fn delete_document(&self, _document_id: DocumentId) -> Result<(), VectorIndexError> {
            Ok(())
        }
    }

    fn scored(text: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            document_id: DocumentId::new(),
            text: text.to_string(),
            score,
        }
    }

    fn executor(chat: StubChatModel, embeddings: StubEmbeddings, index: StubIndex) -> RagAgentExecutor {
        RagAgentExecutor::new(
            Arc::new(chat),
            Arc::new(embeddings),
            Arc::new(index),
            RagExecutorConfig::default(),
        )
    }

    fn history() -> Vec<Message> {
        vec![Message::new(Role::User, "why is the uplink flapping?").unwrap()]
    }

    #[tokio::test]
    async fn test_stream_runs_both_nodes_in_order() {
        let executor = executor(
            StubChatModel {
                deltas: vec!["The ", "uplink ", "is fine."],
                answer: "unused",
                fail: false,
            },
            StubEmbeddings { fail: false },
            StubIndex {
                chunks: vec![scored("uplink runbook", 0.91)],
                searches: Mutex::new(Vec::new()),
            },
        );

        let events: Vec<_> = executor
            .stream_events(&history())
            .await
            .unwrap()
            .collect()
            .await;

        let events: Vec<ExecutionEvent> = events.into_iter().map(|e| e.unwrap()).collect();
        assert!(matches!(
            &events[0],
            ExecutionEvent::NodeLifecycle { name, status: NodeStatus::Started } if name == RETRIEVE_NODE
        ));
        assert!(matches!(
            &events[1],
            ExecutionEvent::NodeLifecycle { name, status: NodeStatus::Completed } if name == RETRIEVE_NODE
        ));
        assert!(matches!(&events[2], ExecutionEvent::StateSnapshot(_)));
        assert!(matches!(
            &events[3],
            ExecutionEvent::NodeLifecycle { name, status: NodeStatus::Started } if name == RESPOND_NODE
        ));

        let tokens: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                ExecutionEvent::Token { content } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tokens, vec!["The ", "uplink ", "is fine."]);

        assert!(matches!(
            events.last().unwrap(),
            ExecutionEvent::NodeLifecycle { name, status: NodeStatus::Completed } if name == RESPOND_NODE
        ));
    }

    #[tokio::test]
    async fn test_snapshot_reports_retrieve_step_and_tool() {
        let executor = executor(
            StubChatModel {
                deltas: vec!["ok"],
                answer: "unused",
                fail: false,
            },
            StubEmbeddings { fail: false },
            StubIndex {
                chunks: Vec::new(),
                searches: Mutex::new(Vec::new()),
            },
        );

        let events: Vec<_> = executor
            .stream_events(&history())
            .await
            .unwrap()
            .collect()
            .await;

        let snapshot = events
            .iter()
            .find_map(|event| match event {
                Ok(ExecutionEvent::StateSnapshot(snapshot)) => Some(snapshot.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            snapshot.plan_steps,
            Some(vec!["retrieve".to_string(), "respond".to_string()])
        );
        assert_eq!(snapshot.executed_tools, Some(vec!["vector_search".to_string()]));
        assert_eq!(snapshot.executed_steps, Some(vec!["retrieve".to_string()]));
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces_as_retrieval_error() {
        let executor = executor(
            StubChatModel {
                deltas: vec![],
                answer: "unused",
                fail: false,
            },
            StubEmbeddings { fail: true },
            StubIndex {
                chunks: Vec::new(),
                searches: Mutex::new(Vec::new()),
            },
        );

        let events: Vec<_> = executor
            .stream_events(&history())
            .await
            .unwrap()
            .collect()
            .await;

        assert!(matches!(&events[0], Ok(ExecutionEvent::NodeLifecycle { .. })));
        assert!(matches!(
            events.last().unwrap(),
            Err(ExecutorError::RetrievalFailed { .. })
        ));
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_completion_failure_surfaces_after_retrieval() {
        let executor = executor(
            StubChatModel {
                deltas: vec![],
                answer: "unused",
                fail: true,
            },
            StubEmbeddings { fail: false },
            StubIndex {
                chunks: Vec::new(),
                searches: Mutex::new(Vec::new()),
            },
        );

        let events: Vec<_> = executor
            .stream_events(&history())
            .await
            .unwrap()
            .collect()
            .await;

        assert!(matches!(
            events.last().unwrap(),
            Err(ExecutorError::CompletionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_final_state_carries_answer_and_chunk_summaries() {
        let executor = executor(
            StubChatModel {
                deltas: vec![],
                answer: "Restart the optics.",
                fail: false,
            },
            StubEmbeddings { fail: false },
            StubIndex {
                chunks: vec![scored("optics troubleshooting guide", 0.87)],
                searches: Mutex::new(Vec::new()),
            },
        );

        let state = executor.final_state(&history()).await.unwrap();
        assert_eq!(state.final_output.as_deref(), Some("Restart the optics."));
        assert!(state.supervised_output.is_none());
        assert_eq!(state.executed_tools, vec!["vector_search"]);
        assert_eq!(state.executed_steps, vec!["retrieve", "respond"]);
        assert_eq!(state.thought_chain.len(), 1);
        assert!(state.thought_chain[0].contains("optics troubleshooting guide"));
        assert!(state.thought_chain[0].starts_with("score 0.870"));
    }

    #[tokio::test]
    async fn test_rejects_history_without_user_message() {
        let executor = executor(
            StubChatModel {
                deltas: vec![],
                answer: "unused",
                fail: false,
            },
            StubEmbeddings { fail: false },
            StubIndex {
                chunks: Vec::new(),
                searches: Mutex::new(Vec::new()),
            },
        );

        let history = vec![Message::new(Role::Assistant, "hello").unwrap()];
        assert!(matches!(
            executor.stream_events(&history).await,
            Err(ExecutorError::Internal { .. })
        ));
    }
}

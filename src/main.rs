//! NetMind backend entrypoint.
//!
//! Loads configuration, wires the adapters into the application
//! handlers, and serves the HTTP API until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use secrecy::ExposeSecret;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use netmind::adapters::http::{
    agent_router, files_router, health_router, tools_router, AgentAppState, FilesAppState,
    ToolsAppState,
};
use netmind::adapters::{
    EvaluationObserver, HttpRouteTracer, InMemoryDocumentRepository, InMemorySessionStore,
    IpApiGeoResolver, LocalDocumentStorage, OpenAiChatConfig, OpenAiChatModel,
    OpenAiEmbeddingConfig, OpenAiEmbeddingGenerator, QdrantIndexConfig, QdrantVectorIndex,
    RagAgentExecutor, RagExecutorConfig, TcpLatencyProbe,
};
use netmind::application::handlers::{
    DeleteDocumentHandler, IngestDocumentConfig, IngestDocumentHandler, QueryHandler,
    StreamQueryConfig, StreamQueryHandler,
};
use netmind::config::{AppConfig, ServerConfig};
use netmind::ports::{
    ChatModel, DocumentRepository, DocumentStorage, EmbeddingGenerator, GeoResolver, LatencyProbe,
    RouteTracer, SessionStore, VectorIndex,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server.log_level);

    // Outbound providers
    let chat: Arc<dyn ChatModel> = Arc::new(OpenAiChatModel::new(
        OpenAiChatConfig::new(config.openai.api_key.expose_secret().clone())
            .with_model(config.openai.chat_model.clone())
            .with_base_url(config.openai.base_url.clone())
            .with_timeout(config.openai.timeout())
            .with_max_retries(config.openai.max_retries),
    ));
    let embeddings: Arc<dyn EmbeddingGenerator> = Arc::new(OpenAiEmbeddingGenerator::new(
        OpenAiEmbeddingConfig::new(config.openai.api_key.expose_secret().clone())
            .with_model(config.openai.embedding_model.clone())
            .with_base_url(config.openai.base_url.clone())
            .with_timeout(config.openai.timeout())
            .with_dimension(config.qdrant.vector_size),
    ));
    let index: Arc<dyn VectorIndex> = Arc::new(QdrantVectorIndex::new(
        QdrantIndexConfig::new(config.qdrant.collection.clone(), config.qdrant.vector_size)
            .with_base_url(config.qdrant.base_url.clone()),
    ));

    // The ingestion pipeline also creates the collection on demand, so a
    // cold Qdrant at boot only costs a warning.
    if let Err(error) = index.ensure_collection().await {
        tracing::warn!(%error, "vector collection not ready at startup");
    }

    // Stores
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let storage: Arc<dyn DocumentStorage> = Arc::new(LocalDocumentStorage::new(
        config.ingestion.upload_dir.clone(),
    ));
    let repository: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());

    // Agent pipeline
    let executor = Arc::new(RagAgentExecutor::new(
        Arc::clone(&chat),
        Arc::clone(&embeddings),
        Arc::clone(&index),
        RagExecutorConfig {
            top_k: config.qdrant.top_k,
            ..RagExecutorConfig::default()
        },
    ));
    let observer = Arc::new(EvaluationObserver::new());
    let stream_handler = Arc::new(
        StreamQueryHandler::new(
            Arc::clone(&sessions),
            executor.clone(),
            StreamQueryConfig {
                include_thought_chain: config.agent.show_thought_chain,
                debug: config.agent.debug,
            },
        )
        .with_observer(observer),
    );
    let query_handler = Arc::new(QueryHandler::new(Arc::clone(&sessions), executor));

    // Ingestion pipeline
    let ingest_handler = Arc::new(IngestDocumentHandler::new(
        Arc::clone(&storage),
        Arc::clone(&repository),
        Arc::clone(&embeddings),
        Arc::clone(&index),
        IngestDocumentConfig {
            chunk_size: config.ingestion.chunk_size,
            chunk_overlap: config.ingestion.chunk_overlap,
        },
    ));
    let delete_handler = Arc::new(DeleteDocumentHandler::new(
        Arc::clone(&repository),
        Arc::clone(&storage),
        Arc::clone(&index),
    ));

    // Diagnostics
    let probe: Arc<dyn LatencyProbe> =
        Arc::new(TcpLatencyProbe::new(config.diagnostics.probe_timeout()));
    let tracer: Arc<dyn RouteTracer> =
        Arc::new(HttpRouteTracer::new(config.diagnostics.trace_timeout()));
    let geo: Arc<dyn GeoResolver> =
        Arc::new(IpApiGeoResolver::new(config.diagnostics.trace_timeout()));

    let agent_state = AgentAppState {
        stream_handler,
        query_handler,
        sessions,
    };
    let files_state = FilesAppState {
        ingest_handler,
        delete_handler,
        repository,
    };
    let tools_state = ToolsAppState {
        probe,
        tracer,
        geo,
        services: config.diagnostics.services_list(),
        degraded_threshold_ms: config.diagnostics.degraded_threshold_ms as f64,
    };

    let router = build_router(&config.server, agent_state, files_state, tools_state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "netmind server started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("netmind server stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Assembles the full API surface.
///
/// The request timeout is not applied to the agent routes: streaming
/// responses outlive any sensible per-request deadline.
fn build_router(
    server: &ServerConfig,
    agent_state: AgentAppState,
    files_state: FilesAppState,
    tools_state: ToolsAppState,
) -> Router {
    let timeout = TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs));

    Router::new()
        .merge(health_router())
        .nest("/api/agent", agent_router().with_state(agent_state))
        .nest(
            "/api/files",
            files_router().with_state(files_state).layer(timeout.clone()),
        )
        .nest(
            "/api/tools",
            tools_router().with_state(tools_state).layer(timeout),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

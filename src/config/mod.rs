//! Typed configuration for the NetMind backend.
//!
//! Settings come from environment variables (a `.env` file is honored in
//! development via `dotenvy`). Variables carry the `NETMIND` prefix and
//! nest with double underscores, e.g. `NETMIND__SERVER__PORT=8000` or
//! `NETMIND__OPENAI__API_KEY=sk-...`. The `config` crate deserializes
//! them into the section structs re-exported here.
//!
//! # Example
//!
//! ```no_run
//! use netmind::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server listening on {:?}", config.server.socket_addr());
//! ```

mod agent;
mod diagnostics;
mod error;
mod ingestion;
mod openai;
mod qdrant;
mod server;

pub use agent::AgentConfig;
pub use diagnostics::{DiagnosticsConfig, MonitoredService};
pub use error::{ConfigError, ValidationError};
pub use ingestion::IngestionConfig;
pub use openai::OpenAiConfig;
pub use qdrant::QdrantConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration, one field per subsystem.
///
/// Built by [`AppConfig::load()`]; only the OpenAI section has a required
/// value (the API key), every other section falls back to its defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener: bind address, environment, CORS
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI chat and embedding models
    pub openai: OpenAiConfig,

    /// Qdrant vector index
    #[serde(default)]
    pub qdrant: QdrantConfig,

    /// Document chunking and upload limits
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Agent pipeline flags
    #[serde(default)]
    pub agent: AgentConfig,

    /// Probe targets and thresholds for network diagnostics
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// A `.env` file in the working directory is applied first when
    /// present; real deployments are expected to set variables directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails to parse into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = config::Environment::default()
            .prefix("NETMIND")
            .separator("__");

        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Run semantic validation over every section.
    ///
    /// Deserialization only proves the types line up; this catches values
    /// that are well-typed but unusable (port 0, empty collection name,
    /// out-of-range timeouts).
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.openai.validate()?;
        self.qdrant.validate()?;
        self.ingestion.validate()?;
        self.diagnostics.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

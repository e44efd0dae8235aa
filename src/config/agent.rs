//! Agent pipeline configuration

use serde::Deserialize;

/// Flags controlling agent response shaping
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AgentConfig {
    /// Include the thought-chain trace in final responses
    #[serde(default)]
    pub show_thought_chain: bool,

    /// Include diagnostic traces in error frames
    #[serde(default)]
    pub debug: bool,
}

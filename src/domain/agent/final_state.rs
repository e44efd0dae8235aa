//! Final aggregate result of an agent execution.

use super::events::ClientEvent;

/// Answer emitted when neither output field holds usable text.
pub const FALLBACK_ANSWER: &str = "No answer could be produced.";

/// The aggregate state an executor reports after its event stream ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentFinalState {
    /// Output of a supervision stage, preferred when non-empty.
    pub supervised_output: Option<String>,

    /// Output of the final pipeline node.
    pub final_output: Option<String>,

    /// Tools invoked during the run.
    pub executed_tools: Vec<String>,

    /// Pipeline steps that ran.
    pub executed_steps: Vec<String>,

    /// Intermediate reasoning trace, surfaced only behind a flag.
    pub thought_chain: Vec<String>,
}

impl AgentFinalState {
    /// Resolves the final answer text.
    ///
    /// Prefers `supervised_output` when present and non-empty, then
    /// `final_output`, then the fixed fallback.
    pub fn resolved_answer(&self) -> &str {
        if let Some(supervised) = non_empty(&self.supervised_output) {
            return supervised;
        }
        if let Some(output) = non_empty(&self.final_output) {
            return output;
        }
        FALLBACK_ANSWER
    }

    /// Builds the terminal `final_response` event from this state.
    ///
    /// `thought_chain` is carried only when `include_thought_chain` is
    /// set; otherwise the field is an explicit null on the wire.
    pub fn to_final_response(&self, include_thought_chain: bool) -> ClientEvent {
        ClientEvent::FinalResponse {
            content: self.resolved_answer().to_string(),
            executed_tools: self.executed_tools.clone(),
            executed_steps: self.executed_steps.clone(),
            thought_chain: include_thought_chain.then(|| self.thought_chain.clone()),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

use serde::Serialize;

use crate::core::state::runtime::analysis::analysis_session_state::AnalysisEntry;

/// Analysis outcome relayed to the UI. `narrative` is either the
/// collaborator's free text or the `"Error: {details}"` sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResultDto {
    /// Deterministic session-store key the result was saved under.
    pub key: String,
    pub narrative: String,
    pub failed: bool,
    pub failure_kind: Option<String>,
}

impl AnalysisResultDto {
    pub fn from_entry(key: String, entry: &AnalysisEntry) -> Self {
        Self {
            key,
            narrative: entry.narrative.clone(),
            failed: entry.failed,
            failure_kind: entry.failure_kind.clone(),
        }
    }
}

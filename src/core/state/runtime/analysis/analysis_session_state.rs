use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::telemetry::model::record::{ErrorCode, Outcome};

/// Which comparison side a drilldown analysis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSlot {
    Period1,
    Period2,
}

impl PeriodSlot {
    pub fn label(&self) -> &'static str {
        match self {
            PeriodSlot::Period1 => "Period 1",
            PeriodSlot::Period2 => "Period 2",
        }
    }

    fn key_prefix(&self) -> &'static str {
        match self {
            PeriodSlot::Period1 => "p1",
            PeriodSlot::Period2 => "p2",
        }
    }
}

/// Deterministic session-store key derived from what was analyzed, never
/// from widget iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisKey {
    PeriodComparison { outcome: Outcome },
    ErrorSpread { slot: PeriodSlot, code: ErrorCode },
}

impl AnalysisKey {
    /// Stable storage form: `comparison_success` / `p1_500` / `p2_ERR`.
    pub fn storage_key(&self) -> String {
        match self {
            AnalysisKey::PeriodComparison { outcome } => {
                format!("comparison_{}", outcome.label().to_ascii_lowercase())
            }
            AnalysisKey::ErrorSpread { slot, code } => {
                format!("{}_{}", slot.key_prefix(), code.as_str())
            }
        }
    }
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// One stored narrative result (or its failure sentinel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    /// The collaborator's narrative, or the `"Error: {details}"` sentinel.
    pub narrative: String,
    pub failed: bool,
    /// Failure category when `failed`, e.g. "transport" or "upstream".
    pub failure_kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisEntry {
    pub fn narrative(text: String) -> Self {
        Self {
            narrative: text,
            failed: false,
            failure_kind: None,
            created_at: Utc::now(),
        }
    }

    pub fn failure(sentinel: String, kind: &str) -> Self {
        Self {
            narrative: sentinel,
            failed: true,
            failure_kind: Some(kind.to_string()),
            created_at: Utc::now(),
        }
    }
}

/// Session-scoped narrative results for the currently loaded dataset.
///
/// Replacing the dataset snapshot clears this store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSessionState {
    pub entries: BTreeMap<String, AnalysisEntry>,
}

impl AnalysisSessionState {
    pub fn insert(&mut self, key: &AnalysisKey, entry: AnalysisEntry) {
        self.entries.insert(key.storage_key(), entry);
    }

    pub fn get(&self, key: &AnalysisKey) -> Option<&AnalysisEntry> {
        self.entries.get(&key.storage_key())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic() {
        let comparison = AnalysisKey::PeriodComparison {
            outcome: Outcome::Success,
        };
        assert_eq!(comparison.storage_key(), "comparison_success");

        let spread = AnalysisKey::ErrorSpread {
            slot: PeriodSlot::Period1,
            code: ErrorCode::new("500"),
        };
        assert_eq!(spread.storage_key(), "p1_500");

        let spread2 = AnalysisKey::ErrorSpread {
            slot: PeriodSlot::Period2,
            code: ErrorCode::new("CONN_RESET"),
        };
        assert_eq!(spread2.storage_key(), "p2_CONN_RESET");
    }

    #[test]
    fn entries_replace_on_same_key_and_clear() {
        let mut state = AnalysisSessionState::default();
        let key = AnalysisKey::ErrorSpread {
            slot: PeriodSlot::Period1,
            code: ErrorCode::new("500"),
        };
        state.insert(&key, AnalysisEntry::narrative("first".into()));
        state.insert(&key, AnalysisEntry::failure("Error: timeout".into(), "transport"));

        let entry = state.get(&key).unwrap();
        assert!(entry.failed);
        assert_eq!(entry.failure_kind.as_deref(), Some("transport"));
        assert_eq!(state.entries.len(), 1);

        state.clear();
        assert!(state.entries.is_empty());
    }
}

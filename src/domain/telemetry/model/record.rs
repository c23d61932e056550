use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary outcome class derived from the response status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Success iff the status code text starts with '2'; everything else,
    /// including garbage codes, is Failure.
    pub fn from_status_code(code: &str) -> Self {
        if code.starts_with('2') {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Case-insensitive label parse ("Success", "FAILURE", ...).
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "success" => Some(Outcome::Success),
            "failure" => Some(Outcome::Failure),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response status code kept verbatim as text, since real sources carry
/// non-numeric values. Orders numerically when both sides parse as integers,
/// numeric before non-numeric, lexicographic otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

impl ErrorCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl Ord for ErrorCode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ErrorCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observed API call, normalized at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// UTC instant; None when the source value could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub service_name: String,
    pub endpoint: String,
    pub region: String,
    pub response_status_code: ErrorCode,
    /// Always derived from `response_status_code`, never set independently.
    pub outcome: Outcome,
}

impl TelemetryRecord {
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        service_name: impl Into<String>,
        endpoint: impl Into<String>,
        region: impl Into<String>,
        response_status_code: impl Into<String>,
    ) -> Self {
        let response_status_code = ErrorCode::new(response_status_code);
        let outcome = Outcome::from_status_code(response_status_code.as_str());
        Self {
            timestamp,
            service_name: service_name.into(),
            endpoint: endpoint.into(),
            region: region.into(),
            response_status_code,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_leading_two() {
        assert_eq!(Outcome::from_status_code("200"), Outcome::Success);
        assert_eq!(Outcome::from_status_code("201"), Outcome::Success);
        assert_eq!(Outcome::from_status_code("299"), Outcome::Success);
        assert_eq!(Outcome::from_status_code("404"), Outcome::Failure);
        assert_eq!(Outcome::from_status_code("500"), Outcome::Failure);
        assert_eq!(Outcome::from_status_code("ERR"), Outcome::Failure);
        assert_eq!(Outcome::from_status_code(""), Outcome::Failure);
        // Text semantics, not numeric: any leading '2' counts.
        assert_eq!(Outcome::from_status_code("2xx"), Outcome::Success);
    }

    #[test]
    fn outcome_labels_parse_case_insensitively() {
        assert_eq!(Outcome::parse_label("success"), Some(Outcome::Success));
        assert_eq!(Outcome::parse_label(" FAILURE "), Some(Outcome::Failure));
        assert_eq!(Outcome::parse_label("sUcCeSs"), Some(Outcome::Success));
        assert_eq!(Outcome::parse_label("degraded"), None);
    }

    #[test]
    fn error_codes_order_numeric_first_then_lexicographic() {
        let mut codes: Vec<ErrorCode> = ["ERR", "500", "404", "99", "CONN_RESET", "200"]
            .into_iter()
            .map(ErrorCode::new)
            .collect();
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(ErrorCode::as_str).collect();
        assert_eq!(sorted, vec!["99", "200", "404", "500", "CONN_RESET", "ERR"]);
    }

    #[test]
    fn record_derives_outcome_from_code() {
        let ok = TelemetryRecord::new(None, "auth", "/login", "eu-west-1", "201");
        assert_eq!(ok.outcome, Outcome::Success);

        let bad = TelemetryRecord::new(None, "auth", "/login", "eu-west-1", "503");
        assert_eq!(bad.outcome, Outcome::Failure);
    }
}

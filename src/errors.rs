use std::path::PathBuf;

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

/// Failures raised while loading, filtering, or splitting telemetry.
///
/// These propagate to the HTTP layer for user-facing correction; nothing in
/// this enum is swallowed into the narrative sentinel.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{} not found", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Unsupported file format '{0}'. Use .csv, .tsv, .xlsx or .xls")]
    UnsupportedFormat(String),

    #[error("Source is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Failed to parse source: {0}")]
    Malformed(String),

    #[error("{label}: start date must be before end date ({start} >= {end})")]
    InvalidPeriod {
        label: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Unknown outcome '{0}'; expected Success or Failure")]
    InvalidOutcome(String),

    #[error("No telemetry source loaded")]
    SourceNotLoaded,

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures from the narrative collaborator.
///
/// Callers never see these raw: the analysis boundary converts them into the
/// `"Error: {details}"` sentinel string. The tags exist so tests and the
/// session store can name the failure category.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative service is not configured: {0}")]
    Configuration(String),

    #[error("narrative request failed: {0}")]
    Transport(String),

    #[error("narrative service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("narrative response was malformed: {0}")]
    MalformedResponse(String),
}

impl NarrativeError {
    /// Stable category label stored next to sentinel results.
    pub fn kind_label(&self) -> &'static str {
        match self {
            NarrativeError::Configuration(_) => "configuration",
            NarrativeError::Transport(_) => "transport",
            NarrativeError::Upstream { .. } => "upstream",
            NarrativeError::MalformedResponse(_) => "malformed-response",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

/// Map a propagated domain error onto the HTTP taxonomy.
pub fn map_domain_error(err: anyhow::Error) -> AppError {
    if let Some(te) = err.downcast_ref::<TelemetryError>() {
        return match te {
            TelemetryError::SourceNotFound(_) => AppError::NotFound(err.to_string()),
            TelemetryError::Io(_) => AppError::InternalServerError(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        };
    }
    if err.downcast_ref::<validator::ValidationErrors>().is_some() {
        return AppError::BadRequest(err.to_string());
    }
    internal_error(err)
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_taxonomy() {
        let not_found = map_domain_error(TelemetryError::SourceNotFound("x.csv".into()).into());
        assert!(matches!(not_found, AppError::NotFound(_)));

        let bad_format =
            map_domain_error(TelemetryError::UnsupportedFormat("parquet".into()).into());
        assert!(matches!(bad_format, AppError::BadRequest(_)));

        let unknown = map_domain_error(anyhow::anyhow!("boom"));
        assert!(matches!(unknown, AppError::InternalServerError(_)));
    }

    #[test]
    fn narrative_kinds_have_stable_labels() {
        assert_eq!(NarrativeError::Transport("timed out".into()).kind_label(), "transport");
        assert_eq!(
            NarrativeError::Upstream { status: 429, body: "quota".into() }.kind_label(),
            "upstream"
        );
    }
}

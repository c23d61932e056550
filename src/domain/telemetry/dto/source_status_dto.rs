use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::state::runtime::dataset::dataset_state::DatasetState;

/// Snapshot metadata for the UI header.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatusDto {
    pub loaded: bool,
    pub source: Option<String>,
    pub rows: usize,
    pub unparsable_timestamps: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub first_observed: Option<DateTime<Utc>>,
    pub last_observed: Option<DateTime<Utc>>,
}

impl From<&DatasetState> for SourceStatusDto {
    fn from(state: &DatasetState) -> Self {
        Self {
            loaded: state.is_loaded(),
            source: state
                .source
                .as_ref()
                .map(|p| p.display().to_string()),
            rows: state.records.len(),
            unparsable_timestamps: state.unparsable_timestamps,
            loaded_at: state.loaded_at,
            first_observed: state.first_observed(),
            last_observed: state.last_observed(),
        }
    }
}

/// Sorted distinct dimension catalogs for the filter controls.
#[derive(Debug, Clone, Serialize)]
pub struct SourceDimensionsDto {
    pub services: Vec<String>,
    pub endpoints: Vec<String>,
    pub regions: Vec<String>,
}

impl From<&DatasetState> for SourceDimensionsDto {
    fn from(state: &DatasetState) -> Self {
        Self {
            services: state.services.clone(),
            endpoints: state.endpoints.clone(),
            regions: state.regions.clone(),
        }
    }
}

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::telemetry::model::record::TelemetryRecord;

/// In-memory snapshot of the currently loaded telemetry source.
///
/// This state:
/// - lives only in memory (NOT persisted)
/// - is replaced wholesale by each load
/// - is handed out as an immutable `Arc`, so a reload never mutates a
///   record set a computation is already running against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetState {
    /// Path the snapshot was loaded from; `None` until a first load.
    pub source: Option<PathBuf>,
    pub loaded_at: Option<DateTime<Utc>>,

    pub records: Vec<TelemetryRecord>,
    /// Rows whose source timestamp could not be parsed. They stay in the
    /// record vector but never match a period.
    pub unparsable_timestamps: usize,

    // Sorted distinct dimension catalogs for UI filter options.
    pub services: Vec<String>,
    pub endpoints: Vec<String>,
    pub regions: Vec<String>,
}

impl DatasetState {
    /// Build a snapshot from freshly loaded records.
    pub fn from_records(source: PathBuf, records: Vec<TelemetryRecord>) -> Self {
        let unparsable_timestamps = records.iter().filter(|r| r.timestamp.is_none()).count();

        let mut services = BTreeSet::new();
        let mut endpoints = BTreeSet::new();
        let mut regions = BTreeSet::new();
        for record in &records {
            if !record.service_name.is_empty() {
                services.insert(record.service_name.clone());
            }
            if !record.endpoint.is_empty() {
                endpoints.insert(record.endpoint.clone());
            }
            if !record.region.is_empty() {
                regions.insert(record.region.clone());
            }
        }

        Self {
            source: Some(source),
            loaded_at: Some(Utc::now()),
            records,
            unparsable_timestamps,
            services: services.into_iter().collect(),
            endpoints: endpoints.into_iter().collect(),
            regions: regions.into_iter().collect(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Earliest observed instant, ignoring unparsable rows.
    pub fn first_observed(&self) -> Option<DateTime<Utc>> {
        self.records.iter().filter_map(|r| r.timestamp).min()
    }

    /// Latest observed instant, ignoring unparsable rows.
    pub fn last_observed(&self) -> Option<DateTime<Utc>> {
        self.records.iter().filter_map(|r| r.timestamp).max()
    }
}

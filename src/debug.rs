use std::path::Path;

use tracing::{error, info};

use crate::domain::telemetry::service::loader_service;

/// Runs only when in APISCOPE_DEBUG_MODE
pub async fn run_debug() {
    info!("🔧 Debug mode: running debug tasks...");

    // Sanity-load the configured source and report what the parser sees.
    if let Ok(path) = std::env::var("TELEMETRY_SOURCE") {
        match loader_service::load_records(Path::new(&path)) {
            Ok(records) => {
                let unparsable = records.iter().filter(|r| r.timestamp.is_none()).count();
                info!(rows = records.len(), unparsable, "parsed {path}");
            }
            Err(e) => error!("failed to parse {path}: {e:#}"),
        }
    } else {
        info!("TELEMETRY_SOURCE not set; nothing to inspect");
    }

    info!("Debug tasks completed. Exiting...");
}

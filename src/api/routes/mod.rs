//! API route declarations (e.g., /api/v1/*)

pub mod analysis_routes;
pub mod llm_routes;
pub mod source_routes;
pub mod telemetry_routes;

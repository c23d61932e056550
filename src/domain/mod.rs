pub mod analysis;
pub mod info;
pub mod llm;
pub mod telemetry;

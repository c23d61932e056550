pub mod analysis;
pub mod llm;
pub mod source;
pub mod telemetry;

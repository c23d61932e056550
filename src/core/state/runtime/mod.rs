//! In-memory runtime state (never persisted).

pub mod analysis;
pub mod dataset;

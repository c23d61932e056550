//! The aggregation and period-comparison pipeline.

pub mod aggregate_service;
pub mod comparison_service;
pub mod filter_service;
pub mod loader_service;
pub mod query_service;
pub mod source_service;

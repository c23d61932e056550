//! Typed telemetry data model populated once at load time.

pub mod counts;
pub mod criteria;
pub mod period;
pub mod record;

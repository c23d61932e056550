use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use crate::domain::telemetry::model::counts::{DailyCount, ErrorCodeCount, HourlyCount};
use crate::domain::telemetry::model::record::{ErrorCode, Outcome, TelemetryRecord};

/// Count rows with the given outcome per calendar date (UTC), ascending.
/// Dates with no matching rows are absent, not zero.
pub fn count_by_day(records: &[TelemetryRecord], outcome: Outcome) -> Vec<DailyCount> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        if record.outcome != outcome {
            continue;
        }
        if let Some(ts) = record.timestamp {
            *buckets.entry(ts.date_naive()).or_default() += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Count rows per hour-of-day (0-23), ascending. Callers typically narrow
/// to one day and one code first, but nothing here requires that.
pub fn count_by_hour(records: &[TelemetryRecord]) -> Vec<HourlyCount> {
    let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        if let Some(ts) = record.timestamp {
            *buckets.entry(ts.hour()).or_default() += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(hour, count)| HourlyCount { hour, count })
        .collect()
}

/// Count rows per response status code, ascending per `ErrorCode` order
/// (numeric codes first, then non-numeric lexicographically).
pub fn count_by_error_code(records: &[TelemetryRecord]) -> Vec<ErrorCodeCount> {
    let mut buckets: BTreeMap<ErrorCode, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.response_status_code.clone()).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(code, count)| ErrorCodeCount { code, count })
        .collect()
}

/// Sorted distinct calendar dates observed in the subset, ignoring outcome.
/// Feeds the drilldown date choices.
pub fn dates_with_data(records: &[TelemetryRecord]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = records
        .iter()
        .filter_map(|r| r.timestamp.map(|t| t.date_naive()))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::ErrorCode;

/// Count of records observed on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Count of records observed in one hour-of-day bucket (0-23).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: u64,
}

/// Count of records observed for one response status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeCount {
    pub code: ErrorCode,
    pub count: u64,
}

/// One calendar date with the count contributed by each period,
/// zero-filled where the date is absent on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyComparisonRow {
    pub date: NaiveDate,
    pub count1: u64,
    pub count2: u64,
}

/// One status code with the count contributed by each period,
/// zero-filled where the code is absent on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeComparisonRow {
    pub code: ErrorCode,
    pub count1: u64,
    pub count2: u64,
}

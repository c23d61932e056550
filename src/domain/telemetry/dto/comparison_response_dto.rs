use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::telemetry::model::counts::{
    DailyComparisonRow, DailyCount, ErrorCodeComparisonRow, ErrorCodeCount, HourlyCount,
};

/// Daily aggregate of one period, with its date catalog for drilldowns.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodDailyDto {
    pub label: String,
    pub start_date: NaiveDate,
    /// Inclusive last date of the window.
    pub end_date: NaiveDate,
    pub total: u64,
    pub daily: Vec<DailyCount>,
    /// Sorted distinct dates with any data, ignoring outcome.
    pub dates_with_data: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyComparisonResponse {
    pub outcome: String,
    pub period1: PeriodDailyDto,
    pub period2: PeriodDailyDto,
    pub comparison: Vec<DailyComparisonRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorCodeComparisonResponse {
    pub outcome: String,
    pub date1: NaiveDate,
    pub date2: NaiveDate,
    pub period1_counts: Vec<ErrorCodeCount>,
    pub period2_counts: Vec<ErrorCodeCount>,
    pub comparison: Vec<ErrorCodeComparisonRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlySpreadResponse {
    pub date: NaiveDate,
    pub error_code: String,
    pub hourly: Vec<HourlyCount>,
}

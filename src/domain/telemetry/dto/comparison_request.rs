use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::telemetry::model::criteria::FilterCriteria;
use crate::domain::telemetry::model::period::Period;
use crate::errors::TelemetryError;

/// Inclusive calendar-date pair as supplied by the UI; expands to the
/// half-open window `[start 00:00, end + 1 day 00:00)`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PeriodDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodDates {
    pub fn to_period(self, label: &str) -> Result<Period, TelemetryError> {
        Period::from_dates(label, self.start_date, self.end_date)
    }
}

/// Inputs for the two-period daily comparison.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyComparisonRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    pub period1: PeriodDates,
    pub period2: PeriodDates,
    /// "Success" or "Failure", case-insensitive.
    #[validate(length(min = 1))]
    pub outcome: String,
}

/// Inputs for the single-day error-code drilldown: one chosen date per
/// period, compared over the union of observed codes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ErrorCodeComparisonRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    pub period1: PeriodDates,
    pub period2: PeriodDates,
    #[validate(length(min = 1))]
    pub outcome: String,
    pub date1: NaiveDate,
    pub date2: NaiveDate,
}

/// Inputs for the hour-of-day spread of one code on one date.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HourlySpreadRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    pub period: PeriodDates,
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub error_code: String,
    #[validate(length(min = 1))]
    pub outcome: String,
}

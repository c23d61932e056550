use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TelemetryError;

/// Half-open UTC window `[start, end)` used to partition records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TelemetryError> {
        let period = Self {
            label: label.into(),
            start,
            end,
        };
        period.validate()?;
        Ok(period)
    }

    /// Build from a calendar-date pair: `[start 00:00, end + 1 day 00:00)`.
    ///
    /// The dashboard supplies inclusive date pairs, so `start == end` is a
    /// valid single-day window.
    pub fn from_dates(
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TelemetryError> {
        let start = start_date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = end_date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc() + Duration::days(1);
        Self::new(label, start, end)
    }

    /// `start < end` must hold before any split or aggregation runs.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.start >= self.end {
            return Err(TelemetryError::InvalidPeriod {
                label: self.label.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// First calendar date of the window.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar date inside the half-open window.
    pub fn last_date(&self) -> NaiveDate {
        (self.end - Duration::seconds(1)).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_pair_builds_half_open_window() {
        let p = Period::from_dates("Period 1", date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        assert_eq!(p.start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(p.end.to_rfc3339(), "2024-01-03T00:00:00+00:00");
        assert_eq!(p.start_date(), date(2024, 1, 1));
        assert_eq!(p.last_date(), date(2024, 1, 2));
    }

    #[test]
    fn single_day_window_is_valid() {
        let p = Period::from_dates("Period 1", date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert!(p.contains(date(2024, 1, 1).and_hms_opt(23, 59, 59).unwrap().and_utc()));
        assert!(!p.contains(date(2024, 1, 2).and_hms_opt(0, 0, 0).unwrap().and_utc()));
    }

    #[test]
    fn equal_instants_are_rejected() {
        let instant = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap().and_utc();
        let err = Period::new("Period 2", instant, instant).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidPeriod { .. }));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let err = Period::from_dates("Period 1", date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidPeriod { .. }));
    }
}

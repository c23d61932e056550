use chrono::NaiveDate;

use crate::domain::telemetry::model::criteria::FilterCriteria;
use crate::domain::telemetry::model::period::Period;
use crate::domain::telemetry::model::record::{Outcome, TelemetryRecord};
use crate::errors::TelemetryError;

/// Keep rows allowed by every non-empty dimension list.
pub fn apply_filters(
    records: &[TelemetryRecord],
    criteria: &FilterCriteria,
) -> Vec<TelemetryRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Split into the two period subsets, each computed independently against
/// its own bounds. Both periods are validated before any row is touched;
/// overlapping bounds are a caller choice and do not corrupt either subset.
pub fn split_periods(
    records: &[TelemetryRecord],
    period1: &Period,
    period2: &Period,
) -> Result<(Vec<TelemetryRecord>, Vec<TelemetryRecord>), TelemetryError> {
    period1.validate()?;
    period2.validate()?;
    Ok((in_period(records, period1), in_period(records, period2)))
}

/// Rows whose timestamp satisfies `start <= t < end`; rows without a
/// parsed timestamp match no period.
pub fn in_period(records: &[TelemetryRecord], period: &Period) -> Vec<TelemetryRecord> {
    records
        .iter()
        .filter(|r| r.timestamp.is_some_and(|t| period.contains(t)))
        .cloned()
        .collect()
}

/// Narrow a period subset to one calendar date and one outcome, the shape
/// the drilldown flows aggregate over.
pub fn narrow_to_day(
    records: &[TelemetryRecord],
    date: NaiveDate,
    outcome: Outcome,
) -> Vec<TelemetryRecord> {
    records
        .iter()
        .filter(|r| {
            r.outcome == outcome && r.timestamp.is_some_and(|t| t.date_naive() == date)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn record(service: &str, region: &str, timestamp: &str) -> TelemetryRecord {
        let ts = timestamp
            .parse::<DateTime<Utc>>()
            .ok();
        TelemetryRecord::new(ts, service, "/login", region, "200")
    }

    fn period(label: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> Period {
        Period::new(
            label,
            NaiveDate::from_ymd_opt(start.0, start.1, start.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
        )
        .unwrap()
    }

    #[test]
    fn empty_allow_lists_are_identity() {
        let records = vec![
            record("auth", "eu-west-1", "2024-01-01T10:00:00Z"),
            record("billing", "us-east-1", "2024-01-02T10:00:00Z"),
        ];
        let filtered = apply_filters(&records, &FilterCriteria::default());
        assert_eq!(filtered, records);
    }

    #[test]
    fn non_empty_lists_restrict_their_dimension() {
        let records = vec![
            record("auth", "eu-west-1", "2024-01-01T10:00:00Z"),
            record("billing", "us-east-1", "2024-01-02T10:00:00Z"),
        ];
        let criteria = FilterCriteria {
            services: vec!["billing".into()],
            ..Default::default()
        };
        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].service_name, "billing");
    }

    #[test]
    fn half_open_boundary_is_honored() {
        let records = vec![
            record("auth", "eu-west-1", "2024-01-01T10:00:00Z"),
            record("auth", "eu-west-1", "2024-01-03T00:00:00Z"),
            record("auth", "eu-west-1", "2023-12-31T23:59:00Z"),
        ];
        let p1 = period("Period 1", (2024, 1, 1), (2024, 1, 3));
        let p2 = period("Period 2", (2024, 1, 3), (2024, 1, 5));
        let (subset1, subset2) = split_periods(&records, &p1, &p2).unwrap();
        assert_eq!(subset1.len(), 1);
        assert_eq!(
            subset1[0].timestamp.unwrap().to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
        assert_eq!(subset2.len(), 1);
    }

    #[test]
    fn rows_without_timestamp_match_no_period() {
        let records = vec![TelemetryRecord::new(None, "auth", "/login", "eu-west-1", "200")];
        let p1 = period("Period 1", (2024, 1, 1), (2024, 1, 3));
        let p2 = period("Period 2", (2024, 1, 3), (2024, 1, 5));
        let (subset1, subset2) = split_periods(&records, &p1, &p2).unwrap();
        assert!(subset1.is_empty());
        assert!(subset2.is_empty());
    }

    #[test]
    fn overlapping_periods_compute_independently() {
        let records = vec![record("auth", "eu-west-1", "2024-01-02T10:00:00Z")];
        let p1 = period("Period 1", (2024, 1, 1), (2024, 1, 4));
        let p2 = period("Period 2", (2024, 1, 2), (2024, 1, 5));
        let (subset1, subset2) = split_periods(&records, &p1, &p2).unwrap();
        assert_eq!(subset1.len(), 1);
        assert_eq!(subset2.len(), 1);
    }

    #[test]
    fn narrow_to_day_applies_date_and_outcome() {
        use crate::domain::telemetry::model::record::Outcome;

        let records = vec![
            record("auth", "eu-west-1", "2024-01-02T10:00:00Z"),
            TelemetryRecord::new(
                "2024-01-02T11:00:00Z".parse::<DateTime<Utc>>().ok(),
                "auth",
                "/login",
                "eu-west-1",
                "500",
            ),
            record("auth", "eu-west-1", "2024-01-03T10:00:00Z"),
        ];
        let narrowed = narrow_to_day(
            &records,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Outcome::Failure,
        );
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].response_status_code.as_str(), "500");
    }
}

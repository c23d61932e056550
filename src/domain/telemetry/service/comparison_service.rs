use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::telemetry::model::counts::{
    DailyComparisonRow, DailyCount, ErrorCodeComparisonRow, ErrorCodeCount,
};
use crate::domain::telemetry::model::record::ErrorCode;

/// Align two daily aggregates over the union of their dates, ascending,
/// zero-filling the side where a date is absent.
pub fn join_daily_counts(agg1: &[DailyCount], agg2: &[DailyCount]) -> Vec<DailyComparisonRow> {
    let side1: BTreeMap<NaiveDate, u64> = agg1.iter().map(|c| (c.date, c.count)).collect();
    let side2: BTreeMap<NaiveDate, u64> = agg2.iter().map(|c| (c.date, c.count)).collect();

    let mut keys: BTreeMap<NaiveDate, ()> = BTreeMap::new();
    keys.extend(side1.keys().map(|k| (*k, ())));
    keys.extend(side2.keys().map(|k| (*k, ())));

    keys.into_keys()
        .map(|date| DailyComparisonRow {
            date,
            count1: side1.get(&date).copied().unwrap_or(0),
            count2: side2.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Align two error-code aggregates over the union of their codes, ascending,
/// zero-filling the side where a code is absent. A zero on one side is the
/// signal the comparison exists to surface, so no row is ever dropped.
pub fn join_error_code_counts(
    agg1: &[ErrorCodeCount],
    agg2: &[ErrorCodeCount],
) -> Vec<ErrorCodeComparisonRow> {
    let side1: BTreeMap<ErrorCode, u64> =
        agg1.iter().map(|c| (c.code.clone(), c.count)).collect();
    let side2: BTreeMap<ErrorCode, u64> =
        agg2.iter().map(|c| (c.code.clone(), c.count)).collect();

    let mut keys: BTreeMap<ErrorCode, ()> = BTreeMap::new();
    keys.extend(side1.keys().map(|k| (k.clone(), ())));
    keys.extend(side2.keys().map(|k| (k.clone(), ())));

    keys.into_keys()
        .map(|code| {
            let count1 = side1.get(&code).copied().unwrap_or(0);
            let count2 = side2.get(&code).copied().unwrap_or(0);
            ErrorCodeComparisonRow { code, count1, count2 }
        })
        .collect()
}

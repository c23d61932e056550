use std::sync::Arc;

use anyhow::Result;
use validator::Validate;

use crate::core::state::runtime::dataset::dataset_state::DatasetState;
use crate::core::state::runtime::dataset::dataset_state_repository_trait::DatasetStateRepositoryTrait;
use crate::domain::telemetry::dto::comparison_request::{
    DailyComparisonRequest, ErrorCodeComparisonRequest, HourlySpreadRequest,
};
use crate::domain::telemetry::dto::comparison_response_dto::{
    DailyComparisonResponse, ErrorCodeComparisonResponse, HourlySpreadResponse, PeriodDailyDto,
};
use crate::domain::telemetry::model::counts::DailyCount;
use crate::domain::telemetry::model::criteria::FilterCriteria;
use crate::domain::telemetry::model::period::Period;
use crate::domain::telemetry::model::record::{ErrorCode, Outcome, TelemetryRecord};
use crate::domain::telemetry::service::{
    aggregate_service, comparison_service, filter_service,
};
use crate::errors::TelemetryError;

pub const PERIOD_1_LABEL: &str = "Period 1";
pub const PERIOD_2_LABEL: &str = "Period 2";

/// Fetch the snapshot a computation will run against, failing fast when
/// nothing has been loaded yet.
pub async fn loaded_snapshot<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
) -> Result<Arc<DatasetState>, TelemetryError> {
    let snapshot = dataset_repo.get().await;
    if !snapshot.is_loaded() {
        return Err(TelemetryError::SourceNotLoaded);
    }
    Ok(snapshot)
}

pub fn parse_outcome(label: &str) -> Result<Outcome, TelemetryError> {
    Outcome::parse_label(label).ok_or_else(|| TelemetryError::InvalidOutcome(label.to_string()))
}

/// Filter the snapshot and split it into the two period subsets.
///
/// Periods are validated before any filtering work runs.
pub fn filtered_period_subsets(
    snapshot: &DatasetState,
    req_filters: &FilterCriteria,
    period1: &Period,
    period2: &Period,
) -> Result<(Vec<TelemetryRecord>, Vec<TelemetryRecord>), TelemetryError> {
    period1.validate()?;
    period2.validate()?;
    let filtered = filter_service::apply_filters(&snapshot.records, req_filters);
    filter_service::split_periods(&filtered, period1, period2)
}

/// Two-period daily comparison: per-period daily counts and date catalogs,
/// plus the zero-filled joined table.
pub async fn daily_comparison<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
    req: DailyComparisonRequest,
) -> Result<DailyComparisonResponse> {
    req.validate()?;
    let outcome = parse_outcome(&req.outcome)?;
    let period1 = req.period1.to_period(PERIOD_1_LABEL)?;
    let period2 = req.period2.to_period(PERIOD_2_LABEL)?;

    let snapshot = loaded_snapshot(dataset_repo).await?;
    let (subset1, subset2) =
        filtered_period_subsets(&snapshot, &req.filters, &period1, &period2)?;

    let daily1 = aggregate_service::count_by_day(&subset1, outcome);
    let daily2 = aggregate_service::count_by_day(&subset2, outcome);
    let comparison = comparison_service::join_daily_counts(&daily1, &daily2);

    let period_dto = |period: &Period, subset: &[TelemetryRecord], daily: Vec<DailyCount>| {
        PeriodDailyDto {
            label: period.label.clone(),
            start_date: period.start_date(),
            end_date: period.last_date(),
            total: daily.iter().map(|c| c.count).sum(),
            dates_with_data: aggregate_service::dates_with_data(subset),
            daily,
        }
    };

    Ok(DailyComparisonResponse {
        outcome: outcome.label().to_string(),
        period1: period_dto(&period1, &subset1, daily1),
        period2: period_dto(&period2, &subset2, daily2),
        comparison,
    })
}

/// Single-day error-code drilldown: one chosen date per period, compared
/// over the union of observed codes.
pub async fn error_code_comparison<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
    req: ErrorCodeComparisonRequest,
) -> Result<ErrorCodeComparisonResponse> {
    req.validate()?;
    let outcome = parse_outcome(&req.outcome)?;
    let period1 = req.period1.to_period(PERIOD_1_LABEL)?;
    let period2 = req.period2.to_period(PERIOD_2_LABEL)?;

    let snapshot = loaded_snapshot(dataset_repo).await?;
    let (subset1, subset2) =
        filtered_period_subsets(&snapshot, &req.filters, &period1, &period2)?;

    let day1 = filter_service::narrow_to_day(&subset1, req.date1, outcome);
    let day2 = filter_service::narrow_to_day(&subset2, req.date2, outcome);

    let counts1 = aggregate_service::count_by_error_code(&day1);
    let counts2 = aggregate_service::count_by_error_code(&day2);
    let comparison = comparison_service::join_error_code_counts(&counts1, &counts2);

    Ok(ErrorCodeComparisonResponse {
        outcome: outcome.label().to_string(),
        date1: req.date1,
        date2: req.date2,
        period1_counts: counts1,
        period2_counts: counts2,
        comparison,
    })
}

/// Hour-of-day spread of one code on one date inside one period.
pub async fn hourly_spread<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
    req: HourlySpreadRequest,
) -> Result<HourlySpreadResponse> {
    req.validate()?;
    let outcome = parse_outcome(&req.outcome)?;
    let period = req.period.to_period(PERIOD_1_LABEL)?;

    let snapshot = loaded_snapshot(dataset_repo).await?;
    let filtered = filter_service::apply_filters(&snapshot.records, &req.filters);
    let in_period = filter_service::in_period(&filtered, &period);

    let code = ErrorCode::new(req.error_code.clone());
    let narrowed: Vec<TelemetryRecord> =
        filter_service::narrow_to_day(&in_period, req.date, outcome)
            .into_iter()
            .filter(|r| r.response_status_code == code)
            .collect();

    Ok(HourlySpreadResponse {
        date: req.date,
        error_code: req.error_code,
        hourly: aggregate_service::count_by_hour(&narrowed),
    })
}

use anyhow::Result;
use serde_json::Value;
use tracing::error;
use validator::Validate;

use crate::core::state::runtime::analysis::analysis_session_repository_trait::AnalysisSessionRepositoryTrait;
use crate::core::state::runtime::analysis::analysis_session_state::{
    AnalysisEntry, AnalysisKey, AnalysisSessionState,
};
use crate::core::state::runtime::dataset::dataset_state_repository_trait::DatasetStateRepositoryTrait;
use crate::domain::analysis::dto::analysis_request::{
    ErrorSpreadAnalysisRequest, PeriodComparisonAnalysisRequest,
};
use crate::domain::analysis::dto::analysis_result_dto::AnalysisResultDto;
use crate::domain::analysis::service::payload_service;
use crate::domain::llm::service::narrative_service::{NarrativeGenerator, NarrativeRequest};
use crate::domain::telemetry::model::record::{ErrorCode, TelemetryRecord};
use crate::domain::telemetry::service::query_service::{
    self, PERIOD_1_LABEL, PERIOD_2_LABEL,
};
use crate::domain::telemetry::service::{aggregate_service, filter_service};

/// Two-period comparison narrative: assemble the payload, invoke the
/// collaborator, store the result under `comparison_{outcome}`.
///
/// Load and filter errors propagate; anything at or past the narrative
/// boundary is swallowed into the `"Error: {details}"` sentinel.
pub async fn analyze_period_comparison_with<D, A, G>(
    dataset_repo: &D,
    session_repo: &A,
    generator: &G,
    req: PeriodComparisonAnalysisRequest,
) -> Result<AnalysisResultDto>
where
    D: DatasetStateRepositoryTrait,
    A: AnalysisSessionRepositoryTrait,
    G: NarrativeGenerator,
{
    req.validate()?;
    let outcome = query_service::parse_outcome(&req.outcome)?;
    let period1 = req.period1.to_period(PERIOD_1_LABEL)?;
    let period2 = req.period2.to_period(PERIOD_2_LABEL)?;

    let snapshot = query_service::loaded_snapshot(dataset_repo).await?;
    let (subset1, subset2) =
        query_service::filtered_period_subsets(&snapshot, &req.filters, &period1, &period2)?;

    let summary1 = payload_service::build_period_summary_payload(&subset1, outcome);
    let summary2 = payload_service::build_period_summary_payload(&subset2, outcome);
    let prompt = payload_service::build_comparison_prompt(
        outcome,
        &period1,
        &period2,
        &summary1,
        &summary2,
        req.chart1_png_base64.as_deref(),
        req.chart2_png_base64.as_deref(),
    );

    let key = AnalysisKey::PeriodComparison { outcome };
    let request = NarrativeRequest {
        system: payload_service::SYSTEM_MESSAGE.to_string(),
        prompt,
        max_tokens: payload_service::COMPARISON_MAX_TOKENS,
    };
    dispatch_and_store(session_repo, generator, key, request).await
}

/// Hourly error-spread narrative for one code on one date, stored under
/// `p1_{code}` or `p2_{code}` per the requested slot.
pub async fn analyze_error_spread_with<D, A, G>(
    dataset_repo: &D,
    session_repo: &A,
    generator: &G,
    req: ErrorSpreadAnalysisRequest,
) -> Result<AnalysisResultDto>
where
    D: DatasetStateRepositoryTrait,
    A: AnalysisSessionRepositoryTrait,
    G: NarrativeGenerator,
{
    req.validate()?;
    let outcome = query_service::parse_outcome(&req.outcome)?;
    let period = req.period.to_period(req.slot.label())?;

    let snapshot = query_service::loaded_snapshot(dataset_repo).await?;
    let filtered = filter_service::apply_filters(&snapshot.records, &req.filters);
    let in_period = filter_service::in_period(&filtered, &period);

    let code = ErrorCode::new(req.error_code.clone());
    let narrowed: Vec<TelemetryRecord> =
        filter_service::narrow_to_day(&in_period, req.date, outcome)
            .into_iter()
            .filter(|r| r.response_status_code == code)
            .collect();

    let hourly = aggregate_service::count_by_hour(&narrowed);
    let payload = payload_service::build_hourly_spread_payload(&hourly);
    let prompt = payload_service::build_error_spread_prompt(&payload, code.as_str(), req.date);

    let key = AnalysisKey::ErrorSpread {
        slot: req.slot,
        code,
    };
    let request = NarrativeRequest {
        system: payload_service::SYSTEM_MESSAGE.to_string(),
        prompt,
        max_tokens: payload_service::ERROR_SPREAD_MAX_TOKENS,
    };
    dispatch_and_store(session_repo, generator, key, request).await
}

/// Inspect the session store.
pub async fn get_results<A: AnalysisSessionRepositoryTrait>(
    session_repo: &A,
) -> Result<AnalysisSessionState> {
    Ok((*session_repo.get().await).clone())
}

/// Clear the session store.
pub async fn clear_results<A: AnalysisSessionRepositoryTrait>(session_repo: &A) -> Result<Value> {
    session_repo.set(AnalysisSessionState::default()).await;
    Ok(serde_json::json!({ "message": "Analysis results cleared" }))
}

/// The narrative boundary: failures become the sentinel, never a raw
/// error, and every result lands in the session store.
async fn dispatch_and_store<A, G>(
    session_repo: &A,
    generator: &G,
    key: AnalysisKey,
    request: NarrativeRequest,
) -> Result<AnalysisResultDto>
where
    A: AnalysisSessionRepositoryTrait,
    G: NarrativeGenerator,
{
    let entry = match generator.generate(&request).await {
        Ok(narrative) => AnalysisEntry::narrative(narrative),
        Err(e) => {
            error!(key = %key, kind = e.kind_label(), "narrative generation failed: {e}");
            AnalysisEntry::failure(format!("Error: {}", e), e.kind_label())
        }
    };

    let storage_key = key.storage_key();
    let dto = AnalysisResultDto::from_entry(storage_key, &entry);
    session_repo
        .update(move |state| state.insert(&key, entry))
        .await;
    Ok(dto)
}

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::state::runtime::analysis::analysis_session_state::AnalysisSessionState;
use crate::domain::analysis::dto::analysis_request::{
    ErrorSpreadAnalysisRequest, PeriodComparisonAnalysisRequest,
};
use crate::domain::analysis::dto::analysis_result_dto::AnalysisResultDto;
use crate::errors::AppError;

pub struct AnalysisController;

impl AnalysisController {
    pub async fn analyze_period_comparison(
        State(state): State<AppState>,
        Json(payload): Json<PeriodComparisonAnalysisRequest>,
    ) -> Result<Json<ApiResponse<AnalysisResultDto>>, AppError> {
        to_json(state.analysis_service.analyze_period_comparison(payload).await)
    }

    pub async fn analyze_error_spread(
        State(state): State<AppState>,
        Json(payload): Json<ErrorSpreadAnalysisRequest>,
    ) -> Result<Json<ApiResponse<AnalysisResultDto>>, AppError> {
        to_json(state.analysis_service.analyze_error_spread(payload).await)
    }

    pub async fn get_results(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<AnalysisSessionState>>, AppError> {
        to_json(state.analysis_service.get_results().await)
    }

    pub async fn clear_results(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.analysis_service.clear_results().await)
    }
}

use axum::extract::State;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::telemetry::dto::comparison_request::{
    DailyComparisonRequest, ErrorCodeComparisonRequest, HourlySpreadRequest,
};
use crate::domain::telemetry::dto::comparison_response_dto::{
    DailyComparisonResponse, ErrorCodeComparisonResponse, HourlySpreadResponse,
};
use crate::errors::AppError;

pub struct TelemetryController;

impl TelemetryController {
    pub async fn daily_comparison(
        State(state): State<AppState>,
        Json(payload): Json<DailyComparisonRequest>,
    ) -> Result<Json<ApiResponse<DailyComparisonResponse>>, AppError> {
        to_json(state.telemetry_service.daily_comparison(payload).await)
    }

    pub async fn error_code_comparison(
        State(state): State<AppState>,
        Json(payload): Json<ErrorCodeComparisonRequest>,
    ) -> Result<Json<ApiResponse<ErrorCodeComparisonResponse>>, AppError> {
        to_json(state.telemetry_service.error_code_comparison(payload).await)
    }

    pub async fn hourly_spread(
        State(state): State<AppState>,
        Json(payload): Json<HourlySpreadRequest>,
    ) -> Result<Json<ApiResponse<HourlySpreadResponse>>, AppError> {
        to_json(state.telemetry_service.hourly_spread(payload).await)
    }
}

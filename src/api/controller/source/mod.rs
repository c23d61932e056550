use axum::extract::State;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::telemetry::dto::load_source_request::LoadSourceRequest;
use crate::domain::telemetry::dto::source_status_dto::{SourceDimensionsDto, SourceStatusDto};
use crate::errors::AppError;

pub struct SourceController;

impl SourceController {
    pub async fn load_source(
        State(state): State<AppState>,
        Json(payload): Json<LoadSourceRequest>,
    ) -> Result<Json<ApiResponse<SourceStatusDto>>, AppError> {
        to_json(state.source_service.load_source(payload).await)
    }

    pub async fn source_status(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<SourceStatusDto>>, AppError> {
        to_json(state.source_service.source_status().await)
    }

    pub async fn source_dimensions(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<SourceDimensionsDto>>, AppError> {
        to_json(state.source_service.source_dimensions().await)
    }
}

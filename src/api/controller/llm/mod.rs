use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::info::dto::info_llm_upsert_request::InfoLlmUpsertRequest;
use crate::errors::AppError;

pub struct LlmSettingsController;

impl LlmSettingsController {
    pub async fn get_llm_settings(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.llm_settings_service.get_llm_settings().await)
    }

    pub async fn upsert_llm_settings(
        State(state): State<AppState>,
        Json(payload): Json<InfoLlmUpsertRequest>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.llm_settings_service.upsert_llm_settings(payload).await)
    }
}

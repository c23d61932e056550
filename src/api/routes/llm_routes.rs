use axum::{routing::get, Router};

use crate::api::controller::llm::LlmSettingsController;
use crate::app_state::AppState;

pub fn llm_routes() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(LlmSettingsController::get_llm_settings)
            .put(LlmSettingsController::upsert_llm_settings),
    )
}

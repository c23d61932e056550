use axum::{routing::post, Router};

use crate::api::controller::telemetry::TelemetryController;
use crate::app_state::AppState;

pub fn telemetry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/daily-comparison",
            post(TelemetryController::daily_comparison),
        )
        .route(
            "/error-codes",
            post(TelemetryController::error_code_comparison),
        )
        .route("/hourly-spread", post(TelemetryController::hourly_spread))
}

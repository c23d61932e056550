use axum::{
    routing::{get, post},
    Router,
};

use crate::api::controller::analysis::AnalysisController;
use crate::app_state::AppState;

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/period-comparison",
            post(AnalysisController::analyze_period_comparison),
        )
        .route(
            "/error-spread",
            post(AnalysisController::analyze_error_spread),
        )
        .route(
            "/results",
            get(AnalysisController::get_results).delete(AnalysisController::clear_results),
        )
}

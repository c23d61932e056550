use axum::{
    routing::{get, post},
    Router,
};

use crate::api::controller::source::SourceController;
use crate::app_state::AppState;

pub fn source_routes() -> Router<AppState> {
    Router::new()
        .route("/load", post(SourceController::load_source))
        .route("/status", get(SourceController::source_status))
        .route("/dimensions", get(SourceController::source_dimensions))
}

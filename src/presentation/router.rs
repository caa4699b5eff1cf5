// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart, controls, dashboard, dataset_summary, health_check, summary};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/controls", get(controls))
        .route("/dataset/summary", get(dataset_summary))
        .route("/chart", get(chart))
        .route("/summary", get(summary))
        .route("/dashboard", get(dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

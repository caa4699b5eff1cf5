// HTTP request handlers
use crate::application::dashboard_service::DashboardService;
use crate::domain::telemetry::ChartData;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{AppError, AppResult};
use crate::presentation::params::SelectionParams;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Selector options, date bounds and defaults
pub async fn controls(headers: HeaderMap, State(state): State<Arc<AppState>>) -> AppResult<Response> {
    respond(&state.catalog_service.controls(), &headers).await
}

/// Statistics over the whole dataset
pub async fn dataset_summary(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> AppResult<Response> {
    respond(&state.catalog_service.dataset_summary(), &headers).await
}

/// Charts for the current selection, one per cell
pub async fn chart(
    Query(params): Query<SelectionParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> AppResult<Response> {
    let charts = match params.to_query()? {
        Some(query) => state.dashboard_service.charts(&query),
        None => vec![ChartData::placeholder(params.chart_kind()?, "")],
    };
    respond(&charts, &headers).await
}

/// Summary tables for every selected (metric, cell)
pub async fn summary(
    Query(params): Query<SelectionParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> AppResult<Response> {
    let tables = match params.to_query()? {
        Some(query) => state.dashboard_service.summaries(&query),
        None => Vec::new(),
    };
    respond(&tables, &headers).await
}

/// Charts and summary tables in one response
pub async fn dashboard(
    Query(params): Query<SelectionParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> AppResult<Response> {
    let dashboard = match params.to_query()? {
        Some(query) => state.dashboard_service.dashboard(&query),
        None => {
            tracing::debug!("Incomplete selection, returning empty dashboard");
            DashboardService::empty(params.chart_kind()?)
        }
    };
    respond(&dashboard, &headers).await
}

async fn respond<T: Serialize>(data: &T, headers: &HeaderMap) -> AppResult<Response> {
    json_response(data, accepts_brotli(headers))
        .await
        .map_err(AppError::Encoding)
}

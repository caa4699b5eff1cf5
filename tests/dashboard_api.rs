//! Integration tests for the dashboard HTTP API against a small CSV fixture.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use nr_kpi_dashboard::application::catalog_service::CatalogService;
use nr_kpi_dashboard::application::dashboard_service::DashboardService;
use nr_kpi_dashboard::infrastructure::config::ChartsConfig;
use nr_kpi_dashboard::infrastructure::csv_repository::CsvRepository;
use nr_kpi_dashboard::presentation::app_state::AppState;
use nr_kpi_dashboard::presentation::router::build_router;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/kpis.csv");

fn build_test_app() -> Router {
    let repository = Arc::new(CsvRepository::load(FIXTURE).expect("fixture loads"));
    let state = Arc::new(AppState {
        catalog_service: CatalogService::new(repository.clone()),
        dashboard_service: DashboardService::new(repository, ChartsConfig::default()),
    });
    build_router(state)
}

async fn get(uri: &str) -> Response {
    build_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok() {
    let response = get("/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn controls_list_cells_metrics_and_defaults() {
    let response = get("/controls").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["cells"], serde_json::json!(["Cell_A", "Cell_B"]));
    assert_eq!(json["metrics"], serde_json::json!(["RSRP", "SINR"]));
    assert_eq!(json["kpi_categories"], serde_json::json!(["Coverage", "Quality"]));
    assert_eq!(json["date_bounds"]["min"], "2023-01-01T08:00:00");
    assert_eq!(json["date_bounds"]["max"], "2023-01-03T08:00:00");
    assert_eq!(json["defaults"]["frequency"], "daily");
    assert_eq!(json["defaults"]["chart"], "line");
    assert_eq!(json["chart_kinds"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn dataset_summary_covers_all_rows() {
    let json = body_json(get("/dataset/summary").await).await;
    assert_eq!(json["count"], 8);
    assert_eq!(json["min"], -100.0);
    assert_eq!(json["max"], 20.0);
}

// ---------------------------------------------------------------------------
// Summary tables
// ---------------------------------------------------------------------------

#[tokio::test]
async fn daily_summary_for_three_days() {
    let json = body_json(
        get("/summary?cell=Cell_A&metrics=RSRP&start=2023-01-01&end=2023-01-03&freq=D").await,
    )
    .await;

    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["title"], "Statistical Summary for RSRP in Cell_A");
    assert_eq!(tables[0]["stats"]["count"], 3);
    assert_eq!(tables[0]["stats"]["mean"], -97.67);
    assert_eq!(tables[0]["stats"]["50%"], -98.0);
}

#[tokio::test]
async fn unknown_cell_summary_is_absent_not_zero() {
    let response =
        get("/summary?cell=Cell_ZZZ&metrics=RSRP,SINR&start=2023-01-01&end=2023-01-03").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert!(tables.iter().all(|t| t["stats"].is_null()));
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn line_chart_has_resampled_points() {
    let json = body_json(
        get("/chart?cell=Cell_A&metrics=SINR&start=2023-01-01&end=2023-01-03&freq=daily&chart=line")
            .await,
    )
    .await;

    let trace = &json[0]["traces"][0];
    assert_eq!(trace["type"], "line");
    assert_eq!(trace["x"], serde_json::json!(["2023-01-01 00", "2023-01-03 00"]));
    assert_eq!(trace["y"], serde_json::json!([12.0, 20.0]));
}

#[tokio::test]
async fn inverted_range_yields_empty_series() {
    let json = body_json(
        get("/chart?cell=Cell_A&metrics=RSRP,SINR&start=2023-01-03&end=2023-01-01").await,
    )
    .await;

    let traces = json[0]["traces"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert!(traces.iter().all(|t| t["y"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn scatter_with_one_metric_is_placeholder() {
    let json = body_json(
        get("/chart?cell=Cell_A&metrics=RSRP&start=2023-01-01&end=2023-01-03&chart=tab-scatter")
            .await,
    )
    .await;

    assert_eq!(json[0]["title"], "Scatter Plot");
    assert!(json[0]["traces"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_per_cell_and_metric() {
    let json = body_json(
        get("/dashboard?cell=Cell_A,Cell_B&metrics=RSRP&start=2023-01-01&end=2023-01-03&chart=box")
            .await,
    )
    .await;

    assert_eq!(json["charts"].as_array().unwrap().len(), 2);
    assert_eq!(json["charts"][1]["title"], "Box Plot for Cell_B");
    assert_eq!(json["summaries"].as_array().unwrap().len(), 2);
    assert_eq!(json["summaries"][1]["stats"]["count"], 2);
}

#[tokio::test]
async fn incomplete_selection_is_empty_dashboard() {
    let response = get("/dashboard?cell=Cell_A&chart=heatmap").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["charts"].as_array().unwrap().len(), 1);
    assert_eq!(json["charts"][0]["kind"], "heatmap");
    assert!(json["charts"][0]["traces"].as_array().unwrap().is_empty());
    assert!(json["summaries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_frequency_is_bad_request() {
    let response =
        get("/dashboard?cell=Cell_A&metrics=RSRP&start=2023-01-01&end=2023-01-03&freq=M").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn brotli_when_accepted() {
    let response = build_test_app()
        .oneshot(
            Request::builder()
                .uri("/controls")
                .header(header::ACCEPT_ENCODING, "gzip, br")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
}

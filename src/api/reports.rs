use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::ApiResult;
use crate::infrastructure::AppState;
use crate::services::{render_report, report_file_name};

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Library statistics")
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> ApiResult {
    let ledger = state.ledger().read().await;
    Ok((StatusCode::OK, Json(json!(ledger.stats()))))
}

#[utoipa::path(
    get,
    path = "/api/reports/export",
    responses(
        (status = 200, description = "Plain-text library report", body = String, content_type = "text/plain")
    )
)]
pub async fn export_report(State(state): State<AppState>) -> impl IntoResponse {
    let ledger = state.ledger().read().await;
    let report = render_report(&ledger);
    let filename = report_file_name(ledger.today());

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    match format!("attachment; filename=\"{}\"", filename).parse::<HeaderValue>() {
        Ok(v) => {
            headers.insert(header::CONTENT_DISPOSITION, v);
        }
        Err(e) => tracing::error!("Invalid report file name {:?}: {}", filename, e),
    }

    (StatusCode::OK, headers, report)
}

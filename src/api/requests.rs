use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiResult, error_response};
use crate::infrastructure::AppState;
use crate::models::RequestDraft;

#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    /// "pending" lists only undecided requests
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/requests",
    params(("status" = Option<String>, Query, description = "pending lists only undecided requests")),
    responses(
        (status = 200, description = "Acquisition requests")
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<ListRequestsQuery>,
) -> ApiResult {
    let ledger = state.ledger().read().await;
    let requests = match query.status.as_deref() {
        Some("pending") => ledger.pending_requests(),
        _ => ledger.requests(),
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "total": requests.len(),
            "requests": requests
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/requests",
    responses(
        (status = 201, description = "Request submitted"),
        (status = 400, description = "Missing title or author"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Json(draft): Json<RequestDraft>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let request = ledger.submit_request(draft).map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book request submitted successfully",
            "request": request
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct DecisionDto {
    pub approve: bool,
}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/decision",
    params(("id" = i32, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request decided, or left as already decided"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn decide_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(decision): Json<DecisionDto>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let request = ledger
        .decide_request(id, decision.approve)
        .map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Request {}", request.status.to_string().to_lowercase()),
            "request": request
        })),
    ))
}

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::{ApiResult, error_response};
use crate::infrastructure::AppState;
use crate::models::LibraryInfo;

#[utoipa::path(
    get,
    path = "/api/library/info",
    responses(
        (status = 200, description = "Library settings")
    )
)]
pub async fn get_info(State(state): State<AppState>) -> ApiResult {
    let ledger = state.ledger().read().await;
    Ok((StatusCode::OK, Json(json!(ledger.library_info()))))
}

#[utoipa::path(
    put,
    path = "/api/library/info",
    responses(
        (status = 200, description = "Settings saved"),
        (status = 400, description = "Borrowing limit below 1")
    )
)]
pub async fn update_info(
    State(state): State<AppState>,
    Json(info): Json<LibraryInfo>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let info = ledger.update_library_info(info).map_err(error_response)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Settings saved",
            "library": info
        })),
    ))
}

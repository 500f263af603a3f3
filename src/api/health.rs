use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Desk is up, with its business date and lending policy")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let ledger = state.ledger().read().await;
    let policy = ledger.policy();

    Json(json!({
        "status": "ok",
        "service": "lending-desk",
        "version": env!("CARGO_PKG_VERSION"),
        "today": ledger.today(),
        "books": ledger.total_books(),
        "members": ledger.total_members(),
        "fines_enabled": ledger.fines_enabled(),
        "enforce_borrow_limit": policy.enforce_borrow_limit
    }))
}

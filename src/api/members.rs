use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiResult, error_response};
use crate::infrastructure::AppState;
use crate::models::{LoanDetails, MemberDraft};

#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Every member")
    )
)]
pub async fn list_members(State(state): State<AppState>) -> ApiResult {
    let ledger = state.ledger().read().await;
    let members = ledger.members();
    Ok((
        StatusCode::OK,
        Json(json!({
            "total": members.len(),
            "members": members
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/members",
    responses(
        (status = 201, description = "Member created"),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    Json(draft): Json<MemberDraft>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let member = ledger.add_member(draft).map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Member created successfully",
            "member": member
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member found"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let ledger = state.ledger().read().await;
    let member = ledger.member(id).map_err(error_response)?;
    Ok((StatusCode::OK, Json(json!({ "member": member }))))
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member replaced"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<MemberDraft>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let member = ledger.update_member(id, draft).map_err(error_response)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Member updated successfully",
            "member": member
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 409, description = "Member still holds books")
    )
)]
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    ledger.delete_member(id).map_err(error_response)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Member deleted successfully" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct MemberLoansQuery {
    pub active: Option<bool>,
}

// "My Books" view: the member's loans, optionally only the open ones
#[utoipa::path(
    get,
    path = "/api/members/{id}/loans",
    params(
        ("id" = i32, Path, description = "Member id"),
        ("active" = Option<bool>, Query, description = "Only loans not yet returned")
    ),
    responses(
        (status = 200, description = "Member's loans"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_loans(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MemberLoansQuery>,
) -> ApiResult {
    let ledger = state.ledger().read().await;
    ledger.member(id).map_err(error_response)?;

    let loans = if query.active == Some(true) {
        ledger.member_active_transactions(id)
    } else {
        ledger.member_transactions(id)
    };
    let loans: Vec<LoanDetails> = loans.into_iter().map(|t| ledger.details(t)).collect();

    Ok((
        StatusCode::OK,
        Json(json!({
            "total": loans.len(),
            "loans": loans
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}/requests",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member's acquisition requests"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_requests(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let ledger = state.ledger().read().await;
    ledger.member(id).map_err(error_response)?;

    let requests = ledger.member_book_requests(id);
    Ok((
        StatusCode::OK,
        Json(json!({
            "total": requests.len(),
            "requests": requests
        })),
    ))
}

// Figures shown on the student dashboard
#[utoipa::path(
    get,
    path = "/api/members/{id}/summary",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Borrowed count, remaining limit and fines"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_summary(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let ledger = state.ledger().read().await;
    let member = ledger.member(id).map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "member": member,
            "borrowed": ledger.member_borrowed_count(id),
            "remaining_limit": ledger.remaining_borrow_limit(id),
            "max_books": ledger.library_info().max_books_per_student,
            "outstanding_fines": ledger.member_total_fines(id),
        })),
    ))
}

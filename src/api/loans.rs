use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiResult, error_response};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::transaction::DEFAULT_LOAN_DAYS;
use crate::models::LoanDetails;

#[derive(Debug, Deserialize)]
pub struct ListLoansQuery {
    /// active, overdue, returned; anything else lists every loan
    pub status: Option<String>,
    pub member_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/loans",
    params(
        ("status" = Option<String>, Query, description = "active, overdue or returned"),
        ("member_id" = Option<i32>, Query, description = "Only this member's loans")
    ),
    responses(
        (status = 200, description = "Loans with status and fine")
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    Query(query): Query<ListLoansQuery>,
) -> ApiResult {
    let ledger = state.ledger().read().await;

    let mut loans = match query.status.as_deref() {
        Some("active") => ledger.active_transactions(),
        Some("overdue") => ledger.overdue_transactions(),
        Some("returned") => ledger
            .transactions()
            .into_iter()
            .filter(|t| t.is_returned())
            .collect(),
        _ => ledger.transactions(),
    };
    if let Some(member_id) = query.member_id {
        loans.retain(|t| t.member_id == member_id);
    }

    let loans: Vec<LoanDetails> = loans.into_iter().map(|t| ledger.details(t)).collect();
    Ok((
        StatusCode::OK,
        Json(json!({
            "total": loans.len(),
            "loans": loans
        })),
    ))
}

/// Issue request. With `due_date` the loan runs from `borrow_date` (today
/// when absent); otherwise it runs for `days` from today. `days` cannot be
/// combined with `due_date`.
#[derive(Debug, Deserialize)]
pub struct IssueLoanDto {
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub days: Option<u32>,
}

#[utoipa::path(
    post,
    path = "/api/loans",
    responses(
        (status = 201, description = "Loan issued"),
        (status = 400, description = "Due date not after borrow date, or conflicting loan length"),
        (status = 404, description = "Book or member not found"),
        (status = 409, description = "No copy available or borrowing limit reached")
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    Json(payload): Json<IssueLoanDto>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;

    let issued = match payload.due_date {
        Some(_) if payload.days.is_some() => Err(DomainError::validation(
            "Give either a due date or a number of days, not both",
        )),
        Some(due) => {
            let borrow = payload.borrow_date.unwrap_or_else(|| ledger.today());
            ledger.issue(payload.book_id, payload.member_id, borrow, due)
        }
        None if payload.borrow_date.is_some() => Err(DomainError::validation(
            "A borrow date needs a due date",
        )),
        None => ledger.issue_for_days(
            payload.book_id,
            payload.member_id,
            payload.days.unwrap_or(DEFAULT_LOAN_DAYS),
        ),
    };
    let loan = issued.map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book issued successfully",
            "loan": ledger.details(loan)
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/loans/{id}",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Loan found"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let ledger = state.ledger().read().await;
    let loan = ledger.transaction(id).map_err(error_response)?;
    Ok((StatusCode::OK, Json(json!({ "loan": ledger.details(loan) }))))
}

#[utoipa::path(
    put,
    path = "/api/loans/{id}/return",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Loan returned"),
        (status = 409, description = "Loan already returned")
    )
)]
pub async fn return_loan(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let loan = ledger.return_transaction(id).map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Book returned successfully",
            "loan": ledger.details(loan)
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/loans/{id}/fine",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Fine collected"),
        (status = 400, description = "No fine due or already paid"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn collect_fine(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let amount = ledger.collect_fine(id).map_err(error_response)?;
    let loan = ledger.transaction(id).map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Fine collected successfully",
            "amount": amount,
            "loan": ledger.details(loan)
        })),
    ))
}

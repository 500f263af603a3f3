pub mod books;
pub mod health;
pub mod library;
pub mod loans;
pub mod members;
pub mod reports;
pub mod requests;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value, json};

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// Maps a ledger failure onto the HTTP status the desk UI expects
pub fn error_response(e: DomainError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::BookUnavailable(_)
        | DomainError::AlreadyReturned(_)
        | DomainError::BorrowLimitReached { .. }
        | DomainError::InUse(_) => StatusCode::CONFLICT,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalogue
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/genres", get(books::list_genres))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Members
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route("/members/:id/loans", get(members::member_loans))
        .route("/members/:id/requests", get(members::member_requests))
        .route("/members/:id/summary", get(members::member_summary))
        // Loans
        .route("/loans", get(loans::list_loans).post(loans::create_loan))
        .route("/loans/:id", get(loans::get_loan))
        .route("/loans/:id/return", put(loans::return_loan))
        .route("/loans/:id/fine", put(loans::collect_fine))
        // Acquisition requests
        .route(
            "/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/requests/:id/decision", put(requests::decide_request))
        // Library settings
        .route(
            "/library/info",
            get(library::get_info).put(library::update_info),
        )
        // Reporting
        .route("/stats", get(reports::get_stats))
        .route("/reports/export", get(reports::export_report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_map_to_client_statuses() {
        let cases = [
            (DomainError::not_found("Book", 1), StatusCode::NOT_FOUND),
            (DomainError::validation("Title is required"), StatusCode::BAD_REQUEST),
            (DomainError::BookUnavailable(1), StatusCode::CONFLICT),
            (DomainError::AlreadyReturned(1), StatusCode::CONFLICT),
            (
                DomainError::BorrowLimitReached {
                    member_id: 1,
                    limit: 5,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::InUse("Book 1".to_string()), StatusCode::CONFLICT),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let (status, Json(body)) = error_response(error);
            assert_eq!(status, expected);
            assert!(status.is_client_error());
            assert_eq!(body["error"], message);
        }
    }
}

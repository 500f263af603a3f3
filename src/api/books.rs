use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{ApiResult, error_response};
use crate::infrastructure::AppState;
use crate::models::{Book, BookDraft, SearchField};

/// Book as shown in the catalogue tables
#[derive(Serialize)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub is_available: bool,
    pub is_ebook: bool,
    pub status: String,
    pub location: String,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            is_available: book.is_available(),
            is_ebook: book.is_ebook(),
            status: book.status_label(),
            location: book.location(),
            book,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    pub q: Option<String>,
    /// Title, Author, ISBN, Section, Genre; anything else searches all fields
    pub field: Option<String>,
    pub available: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "Catalogue search results")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> ApiResult {
    let ledger = state.ledger().read().await;

    let field = query
        .field
        .as_deref()
        .map(SearchField::parse)
        .unwrap_or_default();
    let mut books = ledger.search_in(query.q.as_deref().unwrap_or(""), field);
    if query.available == Some(true) {
        books.retain(Book::is_available);
    }

    let views: Vec<BookView> = books.into_iter().map(BookView::from).collect();
    Ok((
        StatusCode::OK,
        Json(json!({
            "total": views.len(),
            "books": views
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Missing title or author, or quantity below 1")
    )
)]
pub async fn create_book(State(state): State<AppState>, Json(draft): Json<BookDraft>) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let book = ledger.add_book(draft).map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book created successfully",
            "book": BookView::from(book)
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let ledger = state.ledger().read().await;
    let book = ledger.book(id).map_err(error_response)?;
    Ok((StatusCode::OK, Json(json!({ "book": BookView::from(book) }))))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book replaced"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<BookDraft>,
) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    let book = ledger.update_book(id, draft).map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Book updated successfully",
            "book": BookView::from(book)
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 409, description = "Copies are still on loan")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult {
    let mut ledger = state.ledger().write().await;
    ledger.delete_book(id).map_err(error_response)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Book deleted successfully" })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/genres",
    responses(
        (status = 200, description = "Sorted genres, untagged books listed as General")
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> ApiResult {
    let ledger = state.ledger().read().await;
    Ok((
        StatusCode::OK,
        Json(json!({ "genres": ledger.distinct_genres() })),
    ))
}

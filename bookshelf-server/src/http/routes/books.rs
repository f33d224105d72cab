//! Book endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::models::{Book, NewBook};
use crate::state::AppState;

/// GET /books - list all books
async fn list_books(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Book>>>, ApiError> {
    let books = state.books().list().await?;
    Ok(Json(Envelope::success(books)))
}

/// GET /books/{id}
async fn get_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let book = state.books().get(id).await?;
    Ok(Json(Envelope::success(book)))
}

/// POST /books - create a book for an existing author
async fn create_book(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewBook>,
) -> Result<(StatusCode, Json<Envelope<Book>>), ApiError> {
    let book = state.books().create(req).await?;
    tracing::info!(id = book.id, author_id = book.author_id, "book created");
    Ok((StatusCode::CREATED, Json(Envelope::success(book))))
}

/// PATCH /books/{id} - replace title, date and author
async fn update_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<NewBook>,
) -> Result<Json<Envelope<String>>, ApiError> {
    state.books().update(id, req).await?;
    Ok(Json(Envelope::success(format!(
        "Book with id {} has been updated successfully",
        id
    ))))
}

/// DELETE /books/{id}
async fn delete_book(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope<String>>, ApiError> {
    state.books().delete(id).await?;
    tracing::info!(id, "book deleted");
    Ok(Json(Envelope::success(format!(
        "Book with id {} has been deleted successfully",
        id
    ))))
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).patch(update_book).delete(delete_book),
        )
}

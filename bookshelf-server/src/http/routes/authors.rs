//! Author endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::models::{Author, NewAuthor};
use crate::state::AppState;

/// GET /authors - list all authors
async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Author>>>, ApiError> {
    let authors = state.authors().list().await?;
    Ok(Json(Envelope::success(authors)))
}

/// GET /authors/{id}
async fn get_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope<Author>>, ApiError> {
    let author = state.authors().get(id).await?;
    Ok(Json(Envelope::success(author)))
}

/// POST /authors - create an author
async fn create_author(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewAuthor>,
) -> Result<(StatusCode, Json<Envelope<Author>>), ApiError> {
    let author = state.authors().create(req).await?;
    tracing::info!(id = author.id, "author created");
    Ok((StatusCode::CREATED, Json(Envelope::success(author))))
}

/// PATCH /authors/{id} - replace first and last name
async fn update_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<NewAuthor>,
) -> Result<Json<Envelope<String>>, ApiError> {
    state.authors().update(id, req).await?;
    Ok(Json(Envelope::success(format!(
        "Author with id {} has been updated successfully",
        id
    ))))
}

/// DELETE /authors/{id}
async fn delete_author(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Envelope<String>>, ApiError> {
    state.authors().delete(id).await?;
    tracing::info!(id, "author deleted");
    Ok(Json(Envelope::success(format!(
        "Author with id {} has been deleted successfully",
        id
    ))))
}

/// Author routes; the collection answers with and without a trailing slash
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route("/authors/", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).patch(update_author).delete(delete_author),
        )
}

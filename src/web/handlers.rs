use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    core::{Book, BookId, BookPayload, BookSummary, messages},
    service::ListBooksQuery,
    state::AppState,
    web::{ApiResponse, Result},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: BookId,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

pub async fn healthcheck() -> Json<ApiResponse> {
    Json(ApiResponse::message("ok"))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedBook>>)> {
    let Json(payload) = payload?;
    let book_id = state.books.create_book(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            messages::BOOK_ADDED,
            CreatedBook { book_id },
        )),
    ))
}

pub async fn list_books(
    State(state): State<AppState>,
    pairs: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ApiResponse<BookList>>> {
    // Listing has no failure path: an undecodable query string means no filters.
    let query: ListBooksQuery = pairs
        .map(|Query(pairs)| pairs.into_iter().collect())
        .unwrap_or_default();
    let books = state.books.list_books(&query).await?;

    Ok(Json(ApiResponse::data(BookList { books })))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookDetail>>> {
    let book = state.books.get_book(&id).await?;

    Ok(Json(ApiResponse::data(BookDetail { book })))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(payload) = payload?;
    state.books.update_book(&id, payload).await?;

    Ok(Json(ApiResponse::message(messages::BOOK_UPDATED)))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    state.books.delete_book(&id).await?;

    Ok(Json(ApiResponse::message(messages::BOOK_DELETED)))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use bookstore_http::{AppError, PrettyJson};

use super::catalog::{Catalog, CatalogError};
use super::models::{Book, BookMap, Reviews};

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::not_found(err.to_string())
    }
}

/// Public catalog routes, relative to the mount path.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/isbn/{isbn}", get(book_by_isbn))
        .route("/author/{author}", get(books_by_author))
        .route("/title/{title}", get(book_by_title))
        .route("/review/{isbn}", get(book_reviews))
        .with_state(catalog)
}

async fn list_books(State(catalog): State<Arc<Catalog>>) -> PrettyJson<BookMap> {
    PrettyJson(catalog.all().clone())
}

async fn book_by_isbn(
    State(catalog): State<Arc<Catalog>>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = catalog.by_isbn(&isbn)?;
    Ok(Json(book.clone()))
}

async fn books_by_author(
    State(catalog): State<Arc<Catalog>>,
    Path(author): Path<String>,
) -> Result<PrettyJson<Vec<Book>>, AppError> {
    let books = catalog.by_author(&author)?;
    tracing::debug!(%author, matches = books.len(), "author lookup");
    Ok(PrettyJson(books.into_iter().cloned().collect()))
}

async fn book_by_title(
    State(catalog): State<Arc<Catalog>>,
    Path(title): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = catalog.by_title(&title)?;
    Ok(Json(book.clone()))
}

async fn book_reviews(
    State(catalog): State<Arc<Catalog>>,
    Path(isbn): Path<String>,
) -> Result<PrettyJson<Reviews>, AppError> {
    // Clients match on this exact message, trailing period included.
    let reviews = catalog
        .reviews(&isbn)
        .map_err(|_| AppError::not_found("ISBN not found."))?;
    Ok(PrettyJson(reviews.clone()))
}

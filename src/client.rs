//! HTTP client for the service's public read endpoints.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::modules::books::models::{Book, BookMap, Reviews};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Client for a running bookstore service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let parsed =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /`
    pub async fn all_books(&self) -> Result<BookMap, ClientError> {
        self.get(&[]).await
    }

    /// `GET /isbn/{isbn}`
    ///
    /// Single-book responses carry no ISBN, so `Book::isbn` is left empty
    /// here and in the author and title lookups.
    pub async fn book_by_isbn(&self, isbn: &str) -> Result<Book, ClientError> {
        self.get(&["isbn", isbn]).await
    }

    /// `GET /author/{author}`
    pub async fn books_by_author(&self, author: &str) -> Result<Vec<Book>, ClientError> {
        self.get(&["author", author]).await
    }

    /// `GET /title/{title}`
    pub async fn book_by_title(&self, title: &str) -> Result<Book, ClientError> {
        self.get(&["title", title]).await
    }

    /// `GET /review/{isbn}`
    pub async fn reviews(&self, isbn: &str) -> Result<Reviews, ClientError> {
        self.get(&["review", isbn]).await
    }

    /// Segments are percent-encoded, so "Chinua Achebe" is safe to pass.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base URL always has a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.json::<T>().await?;
            tracing::info!(%url, status = status.as_u16(), "catalog request succeeded");
            return Ok(body);
        }

        let message = match response.json::<ErrorMessage>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        tracing::warn!(%url, status = status.as_u16(), %message, "catalog request failed");

        Err(ClientError::Status { status, message })
    }
}

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use bookstore_http::AppError;

use super::models::{MessageResponse, RegisterRequest};
use super::store::{RegistrationError, UserStore};

const REGISTERED: &str = "User successfully registered. Please login.";

#[derive(Clone)]
pub struct UsersState {
    pub store: Arc<UserStore>,
    /// Report every registration failure as 404.
    pub legacy_status_codes: bool,
}

impl RegistrationError {
    /// Map to an HTTP error, honoring the configured status policy.
    pub fn into_app_error(self, legacy_status_codes: bool) -> AppError {
        let message = self.to_string();
        match (self, legacy_status_codes) {
            (_, true) => AppError::not_found(message),
            (RegistrationError::MissingField, false) => AppError::bad_request(message),
            (RegistrationError::DuplicateUser, false) => AppError::conflict(message),
        }
    }
}

pub fn router(state: UsersState) -> Router {
    Router::new()
        .route("/register", post(register))
        .with_state(state)
}

/// Only a JSON object body is read. Any other body, content type or
/// field shape counts as a request with no fields.
fn parse_request(headers: &HeaderMap, body: &[u8]) -> RegisterRequest {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().to_ascii_lowercase().starts_with("application/json"));
    if !is_json {
        return RegisterRequest::default();
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value).unwrap_or_default()
        }
        _ => RegisterRequest::default(),
    }
}

async fn register(
    State(state): State<UsersState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let request = parse_request(&headers, &body);
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    state
        .store
        .register(&username, &password)
        .map_err(|err| {
            tracing::info!(%username, reason = %err, "registration rejected");
            err.into_app_error(state.legacy_status_codes)
        })?;

    tracing::info!(%username, users = state.store.len(), "user registered");
    Ok(Json(MessageResponse::new(REGISTERED)))
}

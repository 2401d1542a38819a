//! Response helpers shared by module handlers.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON body indented with four spaces.
///
/// Used for listings that are meant to be read by people as much as by
/// programs.
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> PrettyJson<T> {
    fn render(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(256);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.0.serialize(&mut serializer)?;
        Ok(buf)
    }
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(buf) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                buf,
            )
                .into_response(),
            Err(err) => AppError::Internal(
                anyhow::Error::new(err).context("failed to serialize response body"),
            )
            .into_response(),
        }
    }
}

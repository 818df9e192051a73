//! Error types for the device registry server

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No device record found for {identifier} '{value}'")]
    DeviceNotFound { identifier: String, value: String },

    #[error("Technical error: {0}")]
    Technical(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Error kind label carried in the response body so callers can branch
    /// without parsing the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::DeviceNotFound { .. } => "not-found",
            Error::Database(_) | Error::Technical(_) | Error::Other(_) => "technical",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::DeviceNotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Database(_) | Error::Technical(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": message,
        }));

        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_identifier_and_value() {
        let err = Error::DeviceNotFound {
            identifier: "serial number".to_string(),
            value: "1007".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No device record found for serial number '1007'"
        );
        assert_eq!(err.kind(), "not-found");
    }

    #[test]
    fn database_errors_map_to_technical_kind() {
        let err = Error::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.kind(), "technical");
    }
}

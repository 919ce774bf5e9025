//! Application error taxonomy.
//!
//! Every failure a request can hit maps onto one [`AppError`] variant, and
//! every variant maps onto exactly one HTTP status. Errors are rendered at the
//! request boundary as a JSON body of the form `{"message": "..."}`.
//!
//! | Variant | Status |
//! |---------|--------|
//! | [`AppError::Validation`] | 400 |
//! | [`AppError::InvalidCredentials`] | 401 |
//! | [`AppError::Unauthenticated`] | 401 |
//! | [`AppError::Forbidden`] | 403 |
//! | [`AppError::NotFound`] | 404 |
//! | [`AppError::Internal`] | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Message returned for both "unknown username" and "wrong password".
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing or duplicate input. The client must fix and resend.
    #[error("{0}")]
    Validation(String),

    /// Login failed. Deliberately says nothing about which half was wrong.
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Missing, malformed, expired or stale bearer token.
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid session, insufficient role.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Unexpected storage or runtime failure. The cause is logged, never sent.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(format_validation_errors(&errors))
    }
}

/// Flattens validator output into a single comma separated message, preferring
/// the custom message attached to each rule.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::unauthenticated("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_body_carries_message() {
        let response = AppError::forbidden("Access denied. Admin only.").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Access denied. Admin only.");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response =
            AppError::internal(anyhow::anyhow!("connection refused on 10.0.0.3")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn test_validation_errors_prefer_custom_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "capacity",
            ValidationError::new("range").with_message("Capacity must be at least 1".into()),
        );
        errors.add("name", ValidationError::new("length"));

        let err = AppError::from(errors);
        assert_eq!(
            err.to_string(),
            "Capacity must be at least 1, name is invalid"
        );
    }
}

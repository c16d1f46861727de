/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / validation error / auth error を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::validation::{self, FieldRule};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("access denied")]
    Unauthorized,
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("route not found")]
    RouteNotFound,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Store errors for a write: constraint violations become validation
    /// errors through the entity's rule table, everything else is a 500.
    pub fn from_write(rules: &[FieldRule], e: RepoError) -> Self {
        match e {
            RepoError::Constraint(violation) => {
                match validation::store_violation(rules, &violation) {
                    Some(message) => Self::validation(message),
                    None => {
                        tracing::error!(?violation, "unmapped constraint violation");
                        Self::Internal
                    }
                }
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors }))
                    .into_response();
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Access Denied".to_string()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(resource) => (StatusCode::NOT_FOUND, format!("{resource} Not Found")),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "Route Not Found".to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "store operation failed");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::error::ConstraintViolation;
    use crate::validation::USER_RULES;

    #[test]
    fn unique_violation_on_write_is_a_validation_error() {
        let e = RepoError::Constraint(ConstraintViolation::Unique {
            column: "emailAddress".into(),
        });
        match AppError::from_write(USER_RULES, e) {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec!["Sorry, Email address is already in use."])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unmapped_violation_is_internal() {
        let e = RepoError::Constraint(ConstraintViolation::ForeignKey);
        assert!(matches!(
            AppError::from_write(USER_RULES, e),
            AppError::Internal
        ));
    }

    #[test]
    fn statuses() {
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("Course").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}

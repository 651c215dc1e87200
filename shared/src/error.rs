use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// フィールド名 → エラーメッセージ一覧
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl From<garde::Report> for FieldErrors {
    fn from(report: garde::Report) -> Self {
        let mut errors = Self::default();
        for (path, error) in report.iter() {
            errors.add(path.to_string(), error.message());
        }
        errors
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("The given data was invalid.")]
    ValidationFailed(FieldErrors),
    #[error(transparent)]
    MalformedRequest(#[from] JsonRejection),
    #[error(transparent)]
    InvalidPath(#[from] PathRejection),
    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("Attendee has already booked this event.")]
    DuplicateBooking,
    #[error("Event is fully booked.")]
    EventFull,
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    PasswordHashError(String),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("Invalid credentials.")]
    UnauthenticatedError,
    #[error("Unauthenticated.")]
    UnauthorizedError,
    #[error("This action is unauthorized.")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed(FieldErrors::single(field, message))
    }
}

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        Self::ValidationFailed(report.into())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationFailed(ref errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "message": self.to_string(), "errors": errors }),
            ),
            AppError::MalformedRequest(rejection) => (
                rejection.status(),
                json!({ "message": rejection.body_text() }),
            ),
            AppError::InvalidPath(rejection) => (
                rejection.status(),
                json!({ "message": rejection.body_text() }),
            ),
            AppError::InvalidQuery(rejection) => (
                rejection.status(),
                json!({ "message": rejection.body_text() }),
            ),
            AppError::UnprocessableEntity(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "message": self.to_string() }),
            ),
            AppError::EntityNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "message": self.to_string() }))
            }
            AppError::DuplicateBooking | AppError::EventFull => {
                (StatusCode::CONFLICT, json!({ "message": self.to_string() }))
            }
            AppError::UnauthenticatedError | AppError::UnauthorizedError => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": self.to_string() }),
            ),
            AppError::ForbiddenOperation => {
                (StatusCode::FORBIDDEN, json!({ "message": self.to_string() }))
            }
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::PasswordHashError(_)
            | AppError::ConvertToUuidError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

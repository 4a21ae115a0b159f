// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Errors
//!
//! [`ApiError`] is the error type of every handler. It renders as
//! `{"error", "error_code", "field"?}` and absorbs validation, auth and
//! storage failures. Internal details are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StoreError;
use crate::validation::ValidationError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub field: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "validation_error",
            message: e.to_string(),
            field: Some(e.field),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if let AuthError::InternalError(msg) = &e {
            tracing::error!(error = %msg, "Authentication failed internally");
            return Self::internal();
        }
        Self::new(e.status_code(), e.error_code(), e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(entity) => Self::not_found(format!("{entity} not found")),
            StoreError::PermissionDenied { resource, .. } => {
                Self::forbidden(format!("Only the author may modify {resource}"))
            }
            StoreError::AlreadyExists(entity) => {
                Self::new(StatusCode::CONFLICT, "conflict", format!("{entity} already exists"))
            }
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
            field: self.field,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_code() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.code, "not_found");
        assert_eq!(nf.message, "missing");

        let forbidden = ApiError::forbidden("nope");
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let internal = ApiError::internal();
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let nf: ApiError = StoreError::NotFound("Post 1".into()).into();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "Post 1 not found");

        let denied: ApiError = StoreError::PermissionDenied {
            user_id: 2,
            resource: "post 1".into(),
        }
        .into();
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
        assert_eq!(denied.code, "forbidden");

        let io: ApiError = StoreError::Io(std::io::Error::other("disk gone")).into();
        assert_eq!(io.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!io.message.contains("disk gone"));
    }

    #[test]
    fn auth_errors_keep_their_status() {
        let err: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "invalid_credentials");

        let err: ApiError = AuthError::DuplicateEmail.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn validation_error_body_names_field() {
        let err: ApiError = ValidationError::new("title", "must not be empty").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "validation_error");
        assert_eq!(body["field"], "title");
        assert_eq!(body["error"], "title: must not be empty");
    }

    #[tokio::test]
    async fn into_response_omits_empty_field() {
        let response = ApiError::not_found("Post 9 not found").into_response();
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"Post 9 not found","error_code":"not_found"}"#);
    }
}

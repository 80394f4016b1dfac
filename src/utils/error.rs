//! Unified error handling.
//!
//! [`AppError`] is the HTTP-facing error type; domain errors from
//! [`crate::orders`] convert into it before leaving a handler.
//!
//! # Error codes
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E3xxx  | Token errors | E3001 not logged in |
//! | E2xxx  | Permission errors | E2001 wrong role |
//! | E0xxx  | Business errors | E0003 not found |
//! | E9xxx  | System errors | E9002 database |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::orders::OrderError;

/// Error body returned to clients.
///
/// ```json
/// { "code": "E0003", "message": "Order not found: ..." }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Application error enum.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Authorization (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== System (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "E3001", "Please login first".into())
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003", self.to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E3002", self.to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".into(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".into(),
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::ProductNotFound(_) | OrderError::OrderNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            OrderError::InvalidLineItem(_) | OrderError::NothingToCheckout => {
                AppError::Validation(err.to_string())
            }
            OrderError::Unauthorized => AppError::Forbidden(err.to_string()),
            OrderError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            OrderError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderStatus;
    use uuid::Uuid;

    #[test]
    fn order_errors_map_to_expected_statuses() {
        let id = Uuid::new_v4();
        let cases: Vec<(AppError, StatusCode)> = vec![
            (
                OrderError::ProductNotFound(id).into(),
                StatusCode::NOT_FOUND,
            ),
            (OrderError::OrderNotFound(id).into(), StatusCode::NOT_FOUND),
            (
                OrderError::InvalidLineItem("cross-vendor".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (OrderError::Unauthorized.into(), StatusCode::FORBIDDEN),
            (
                OrderError::InvalidTransition {
                    action: "accept",
                    current: OrderStatus::Delivering,
                    required: "pending",
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                OrderError::NothingToCheckout.into(),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err:?}");
        }
    }

    #[test]
    fn transition_error_names_required_state() {
        let err = OrderError::InvalidTransition {
            action: "start delivery for",
            current: OrderStatus::Pending,
            required: "confirmed",
        };
        let app: AppError = err.into();
        assert!(app.to_string().contains("confirmed"));
        assert!(app.to_string().contains("pending"));
    }
}

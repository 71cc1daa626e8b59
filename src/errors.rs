//! # Error Handling
//!
//! Two layers:
//! - [`FilterError`]: a query parameter could not be bound onto a criteria.
//! - [`ApiError`]: what a handler returns. Maps to an HTTP status with a
//!   sanitized JSON body; internal details are logged, never sent.
//!
//! ```rust,ignore
//! async fn get_car(State(db): State<DatabaseConnection>, Path(id): Path<i64>) -> Result<Json<Car>, ApiError> {
//!     let car = CarService::find_one(&db, id)
//!         .await?
//!         .ok_or_else(|| ApiError::not_found("Car", Some(id.to_string())))?;
//!     Ok(Json(car))
//! }
//! ```
//!
//! Database errors are logged through `tracing`; install a subscriber to see them.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::params::FilterOperation;

/// A query parameter that could not be applied to a filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid value '{value}' for {field}.{operation}")]
    InvalidValue {
        field: String,
        operation: FilterOperation,
        value: String,
    },

    #[error("Value for {field} exceeds {max} characters")]
    ValueTooLong { field: String, max: usize },
}

/// API error with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        /// Resource type, e.g. "Car"
        resource: String,
        id: Option<String>,
    },

    /// 400 Bad Request - invalid input from the caller
    BadRequest { message: String },

    /// 500 Internal Server Error - database error (details logged, not exposed)
    Database {
        message: String,
        internal: DbErr,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// The database error is logged but NOT sent to the caller.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::BadRequest { message } | Self::Database { message, .. } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// `RecordNotFound` and `RecordNotUpdated` become 404, every other `DbErr` a 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            DbErr::RecordNotUpdated => Self::NotFound {
                resource: "Resource".to_string(),
                id: None,
            },
            _ => Self::database(err),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::bad_request(err.to_string())
    }
}

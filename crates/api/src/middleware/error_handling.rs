//! # Error Handling Middleware
//!
//! Maps [`BookingError`] values to HTTP status codes and the JSON error page
//! rendered for them. Form submissions never reach this path for
//! persistence failures; those become flash messages. What ends up here is
//! an unknown id (404) or an unexpected failure while reading (500).

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        OriginalUri,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use showbill_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use showbill_api::middleware::error_handling::AppError;
/// use showbill_core::errors::BookingError;
///
/// async fn handler(id: i64) -> Result<Json<()>, AppError> {
///     Err(AppError(BookingError::NotFound(format!("Venue with ID {id} not found"))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Storage failures surface as [`BookingError::Database`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// An id segment that is not an integer names no page.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(BookingError::NotFound(rejection.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}

/// Router fallback: the 404 page for paths no route matches.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError(BookingError::NotFound(format!("No page at {}", uri.path())))
}

//! Storefront error type.
//!
//! Handlers return `Result<T, AppError>`. Session failures are the only
//! server-side errors the page can hit; they are reported to Sentry and the
//! shopper sees a generic 500. Client mistakes map to 4xx with their message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use float_core::CatalogError;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store load or save failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A form referenced a product that is not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Malformed or out-of-range form input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Catalog(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
            return (status, "Internal server error").into_response();
        }

        tracing::debug!(error = %self, status = status.as_u16(), "Rejected request");
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a shopper action as a Sentry breadcrumb.
///
/// Breadcrumbs ride along with any later error report from the same scope.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, String)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb
            .data
            .insert((*key).to_string(), serde_json::Value::String(value.clone()));
    }

    sentry::add_breadcrumb(breadcrumb);
}

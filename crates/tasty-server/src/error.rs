//! HTTP error responses
//!
//! Every handler returns [`ApiResult`]; errors render as `{"detail": ...}`.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tasty_core::TastyError;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    error: TastyError,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl ApiError {
    /// Attach an extra response header. `name` must be lowercase.
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .push((HeaderName::from_static(name), HeaderValue::from_static(value)));
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            TastyError::NotFound(_) => StatusCode::NOT_FOUND,
            TastyError::Conflict(_) => StatusCode::BAD_REQUEST,
            TastyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TastyError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TastyError::Database(_) | TastyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TastyError> for ApiError {
    fn from(error: TastyError) -> Self {
        Self {
            error,
            headers: Vec::new(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        TastyError::from(e).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if self.error.is_internal() {
            error!("Request failed: {}", self.error);
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        for (name, value) in self.headers {
            response.headers_mut().insert(name, value);
        }
        response
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::DomainError;

pub const FETCH_FAILED: &str = "خطا در دریافت اطلاعات محصول از باسلام";
pub const GENERATE_FAILED: &str = "خطا در تولید نام‌های پیشنهادی";
pub const INVALID_BODY: &str = "درخواست نامعتبر است";

/// An error response: `{"error": "<message>"}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Validation errors become 400 with their own message. Everything else
    /// is logged and answered with 500 and the endpoint's generic `fallback`.
    pub fn from_domain(err: DomainError, fallback: &str) -> Self {
        match err.caller_message() {
            Some(message) => {
                debug!("Rejected request: {}", err);
                Self::bad_request(message)
            }
            None => {
                error!("Request failed: {}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: fallback.to_string(),
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

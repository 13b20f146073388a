use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::mail::MailError;

/// Shown to callers when a dispatch fails. No internal detail.
pub const DISPATCH_FAILED: &str = "تعذر إرسال رسالتك حالياً، يرجى المحاولة لاحقاً";

/// Shown to callers when the request body cannot be read.
pub const BAD_REQUEST: &str = "تعذر قراءة بيانات الطلب";

/// Application error type for unified error handling across the app.
#[derive(Debug)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - at least one message, in rule order
    Validation(Vec<String>),

    /// Extractor rejections (malformed body, oversized body, wrong content type)
    Rejected { status: StatusCode, detail: String },

    /// Mail dispatch errors (500 Internal Server Error)
    Dispatch(MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let message = errors.first().cloned().unwrap_or_default();
                let body = Json(json!({
                    "ok": false,
                    "message": message,
                    "errors": errors,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Rejected { status, detail } => {
                tracing::debug!(%status, %detail, "request rejected");
                let body = Json(json!({
                    "ok": false,
                    "message": BAD_REQUEST,
                }));
                (status, body).into_response()
            }
            AppError::Dispatch(err) => {
                tracing::error!(%err, "contact dispatch failed");
                let body = Json(json!({
                    "ok": false,
                    "message": DISPATCH_FAILED,
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

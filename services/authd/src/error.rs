//! AppError → HTTP 响应适配

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use warden_errors::AppError;

/// AppError 的 HTTP 包装
///
/// 响应体为 RFC 7807 Problem Details；5xx 的细节只进日志
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let problem = if status.is_server_error() {
            AppError::internal("Internal server error").to_problem_details()
        } else {
            self.0.to_problem_details()
        };

        (status, Json(problem)).into_response()
    }
}

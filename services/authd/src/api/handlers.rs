//! 请求处理器
//!
//! 只负责 HTTP 体与领域契约之间的转换，业务规则都在下层

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;
use warden_errors::AppError;

use crate::api::middleware::AuthUser;
use crate::api::routes::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    state.auth.register(&req.username, &req.password)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: format!("User {} registered successfully", req.username),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.auth.login(&req.username, &req.password)?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        expires_in: outcome.expires_in,
        token_type: "Bearer".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub username: String,
}

/// GET /auth/validate?token=<t>
///
/// 校验是自包含的，不查用户存储；失败原因只进日志
pub async fn validate_token(
    State(state): State<AppState>,
    Query(params): Query<ValidateParams>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let claims = state.tokens.validate(&params.token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        ApiError::from(AppError::from(e))
    })?;

    Ok(Json(ValidateResponse {
        username: claims.username,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub role: String,
}

/// GET /auth/profile（受保护）
///
/// 身份来自 auth_middleware 注入的 AuthUser 提取器
pub async fn profile(AuthUser(username): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        username,
        // 单一静态角色，框架外的鉴权不在本服务范围内
        role: "user".to_string(),
    })
}

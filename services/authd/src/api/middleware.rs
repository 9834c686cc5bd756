//! 认证中间件
//!
//! 校验请求里的 Bearer 令牌，把已认证身份注入请求扩展；
//! 校验失败直接 401 短路，被保护的处理器不会执行。

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn};
use warden_auth_core::TokenService;

/// 已认证的请求身份
///
/// 由 auth_middleware 注入；处理器在签名里声明本提取器，
/// 以显式参数而非环境式侧信道获取身份
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing identity in request extensions (auth_middleware may not have run)",
            ))
    }
}

/// 解析 `Authorization: Bearer <token>`
///
/// scheme 大小写不敏感，且必须正好两段、令牌段非空
fn extract_bearer(header: &str) -> Option<&str> {
    let parts: Vec<&str> = header.split(' ').collect();

    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") || parts[1].is_empty() {
        return None;
    }

    Some(parts[1])
}

/// Bearer 认证中间件
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing authorization header");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let Some(token) = extract_bearer(auth_header) else {
        warn!("Invalid authorization header format");
        return Err(StatusCode::UNAUTHORIZED);
    };

    debug!("Validating bearer token");

    match tokens.validate(token) {
        Ok(claims) => {
            info!(username = %claims.username, "Token validated");

            request.extensions_mut().insert(AuthUser(claims.username));
            Ok(next.run(request).await)
        }
        Err(e) => {
            // 具体失败原因只进日志，客户端一律收到裸 401
            warn!(error = %e, "Token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

//! 路由定义

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use warden_auth_core::TokenService;

use crate::api::handlers;
use crate::api::middleware::auth_middleware;
use crate::application::AuthService;

/// 共享应用状态
///
/// 进程级单例：用户存储经 AuthService 持有，TokenService 的密钥
/// 启动后只读
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tokens: TokenService,
}

/// 构建完整路由
pub fn app(tokens: TokenService) -> Router {
    let state = AppState {
        auth: Arc::new(AuthService::new(tokens.clone())),
        tokens: tokens.clone(),
    };

    // 受保护路由：auth_middleware 校验通过才会执行处理器
    let protected = Router::new()
        .route("/auth/profile", get(handlers::profile))
        .route_layer(middleware::from_fn_with_state(tokens, auth_middleware));

    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/validate", get(handlers::validate_token))
        .merge(protected)
        .with_state(state)
}

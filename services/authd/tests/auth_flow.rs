//! 端到端认证流程测试
//!
//! 针对真实路由跑完整场景：注册 → 登录 → 携带令牌访问 profile

use authd::app;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use warden_auth_core::TokenService;

fn test_app() -> Router {
    app(TokenService::new("integration-test-secret", 3600))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn register_login_profile_happy_path() {
    let app = test_app();

    // 注册 alice
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"username": "alice", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // 错误密码登录被拒
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "alice", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 正确密码登录，拿到 Bearer 令牌
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "alice", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let login = body_json(response).await;
    assert_eq!(login["token_type"], "Bearer");
    assert_eq!(login["expires_in"], 3600);
    let token = login["token"].as_str().unwrap().to_string();

    // 携带令牌访问受保护的 profile
    let response = app
        .clone()
        .oneshot(get_with_bearer("/auth/profile", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(response).await;
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["role"], "user");

    // 被篡改的令牌拿不到 profile
    let response = app
        .clone()
        .oneshot(get_with_bearer("/auth/profile", &format!("{}x", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 没有 Authorization 头同样被拒
    let response = app.clone().oneshot(get("/auth/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // validate 端点返回令牌里的用户名
    let response = app
        .clone()
        .oneshot(get(&format!("/auth/validate?token={}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "alice");
}

#[tokio::test]
async fn duplicate_registration_returns_conflict_problem() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"username": "bob", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"username": "bob", "password": "different456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let problem = body_json(response).await;
    assert_eq!(problem["status"], 409);
    assert_eq!(problem["title"], "Conflict");
}

#[tokio::test]
async fn registration_with_empty_fields_is_bad_request() {
    let app = test_app();

    for body in [
        json!({"username": "", "password": "secret123"}),
        json!({"username": "carol", "password": ""}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/auth/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn login_for_unknown_user_matches_bad_password_response() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"username": "dave", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // 未知用户与密码错误对外不可区分
    let unknown = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "ghost", "password": "secret123"}),
        ))
        .await
        .unwrap();
    let wrong = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "dave", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
}

#[tokio::test]
async fn validate_endpoint_rejects_garbage_with_generic_401() {
    let app = test_app();

    for uri in ["/auth/validate", "/auth/validate?token=garbage"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let problem = body_json(response).await;
        // 失败原因不外泄，统一文案
        assert_eq!(problem["detail"], "Unauthenticated: Invalid or expired token");
    }
}

#[tokio::test]
async fn expired_token_cannot_reach_profile() {
    // 两个服务共享密钥，但其一签发的令牌立即过期
    let secret = "integration-test-secret";
    let expired = TokenService::new(secret, -3600);
    let token = expired.issue("alice").unwrap();

    let app = app(TokenService::new(secret, 3600));

    let response = app
        .oneshot(get_with_bearer("/auth/profile", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

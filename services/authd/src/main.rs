//! authd 服务入口

use std::net::SocketAddr;

use authd::app;
use secrecy::ExposeSecret;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use warden_auth_core::TokenService;
use warden_config::AppConfig;
use warden_telemetry::init_for_env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 仅用于开发环境
    dotenvy::dotenv().ok();

    // 加载配置
    let config = AppConfig::load("config")?;

    // 初始化 tracing
    init_for_env(&config.telemetry.log_level, config.is_production());

    info!(app = %config.app_name, env = %config.app_env, "Starting authentication service");

    // 签名密钥来自注入配置，进程启动后只读
    let tokens = TokenService::new(config.jwt.secret.expose_secret(), config.jwt.expires_in);

    let router = app(tokens)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

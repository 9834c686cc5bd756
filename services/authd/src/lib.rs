//! authd - 认证服务
//!
//! 注册、登录、令牌校验与受保护的 profile 端点。
//! 用户凭证仅保存在进程内存中，重启即丢失（有意为之的限制）。

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use api::app;

//! HTTP API 层

mod handlers;
mod middleware;
mod routes;

pub use middleware::{AuthUser, auth_middleware};
pub use routes::{AppState, app};

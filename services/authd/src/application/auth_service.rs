//! 注册 / 认证 / 登录编排

use thiserror::Error;
use tracing::{info, warn};
use warden_auth_core::TokenService;
use warden_errors::{AppError, AppResult};

use crate::domain::services::PasswordService;
use crate::domain::user::UserRecord;
use crate::domain::value_objects::Username;
use crate::infrastructure::memory_store::UserStore;

/// 认证失败原因（服务内部使用）
///
/// 对外经 `From<AuthError> for AppError` 统一折叠成一种 401 文案，
/// 避免用户名枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,
    #[error("bad credentials")]
    BadCredentials,
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        AppError::unauthenticated("Invalid credentials")
    }
}

/// 登录结果
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_in: i64,
}

/// 认证服务
///
/// 持有用户存储与令牌服务，承接 API 层的注册、认证、登录契约
pub struct AuthService {
    store: UserStore,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(tokens: TokenService) -> Self {
        Self {
            store: UserStore::new(),
            tokens,
        }
    }

    /// 注册新用户
    ///
    /// 哈希在存储锁之外进行；重名由存储原子地拒绝
    pub fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let username = Username::new(username)?;
        let hash = PasswordService::hash_password(password)?;

        self.store.add(UserRecord::new(username.clone(), hash))?;

        info!(username = %username, "User registered");
        Ok(())
    }

    /// 校验用户名密码
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let Some(record) = self.store.get(username) else {
            warn!(username, "Authentication failed: unknown user");
            return Err(AuthError::UserNotFound);
        };

        if !PasswordService::verify_password(password, &record.password_hash) {
            warn!(username, "Authentication failed: bad password");
            return Err(AuthError::BadCredentials);
        }

        Ok(())
    }

    /// 登录：认证通过后签发令牌
    pub fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        self.authenticate(username, password)?;

        let token = self.tokens.issue(username)?;
        self.store.note_issued_token(username, &token);

        info!(username, "Login succeeded");
        Ok(LoginOutcome {
            token,
            expires_in: self.tokens.expires_in_secs(),
        })
    }

    /// 仅供调试检视（不对外路由）
    pub fn user_store(&self) -> &UserStore {
        &self.store
    }
}

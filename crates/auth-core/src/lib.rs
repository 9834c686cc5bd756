//! warden-auth-core - 认证核心库
//!
//! JWT Claims 与令牌签发/校验逻辑

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warden_errors::{AppError, AppResult};

/// JWT Claims
///
/// 显式声明全部字段；签名覆盖整个 claim 集，任一字段被篡改都会使令牌失效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// 用户名（自定义 claim）
    ///
    /// 反序列化缺省为空串，便于把"结构合法但缺少用户名"的令牌
    /// 归类为 MissingUsername 而不是解析失败
    #[serde(default)]
    pub username: String,
    /// Issued at（UNIX 秒）
    pub iat: i64,
    /// Expiration time（UNIX 秒）
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
        }
    }
}

/// 令牌校验失败原因
///
/// 各 kind 仅用于日志与诊断；对客户端一律折叠为统一的 401，
/// 避免对令牌有效性构成 oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature verification failed")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("username claim missing")]
    MissingUsername,
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthenticated("Invalid or expired token")
    }
}

/// Token 服务
///
/// 无状态：令牌自含，校验不查询用户存储
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        }
    }

    /// 签发访问令牌
    ///
    /// 用户名为空时拒绝签发
    pub fn issue(&self, username: &str) -> AppResult<String> {
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }

        let claims = Claims::new(username, self.expires_in_secs);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
    }

    /// 校验令牌
    ///
    /// 依次拒绝：结构不合法、签名不匹配、已过期、缺少用户名 claim
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0; // 不允许时间偏差

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        let claims = token_data.claims;

        if claims.username.is_empty() {
            return Err(TokenError::MissingUsername);
        }

        Ok(claims)
    }

    /// 访问令牌有效期（秒）
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in_secs
    }
}

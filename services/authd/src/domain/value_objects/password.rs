//! 密码值对象

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use warden_errors::{AppError, AppResult};

/// 哈希后的密码（PHC 字符串）
///
/// 每次哈希都带独立盐值，同一明文两次哈希产出不同结果，
/// 但都能通过对原明文的校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// 从明文密码创建哈希密码
    ///
    /// 哈希失败属于内部错误，绝不降级为明文存储
    pub fn from_plain(password: &str) -> AppResult<Self> {
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        if password.len() > 128 {
            return Err(AppError::validation("Password must be at most 128 characters"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

        Ok(Self(hash.to_string()))
    }

    /// 从已有的哈希值创建
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 校验密码
    ///
    /// 比较由 argon2 在常数时间内完成；存储的哈希格式损坏时
    /// 记录告警并返回 false，不抛错
    pub fn verify(&self, password: &str) -> bool {
        let parsed_hash = match PasswordHash::new(&self.0) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

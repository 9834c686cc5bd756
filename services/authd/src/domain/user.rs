//! 用户记录

use serde::Serialize;

use crate::domain::value_objects::{HashedPassword, Username};

/// 用户记录
///
/// username 是唯一且不可变的主键；password_hash 只能通过重新注册变更
/// （本服务不支持）；last_issued_token 仅作排查记录，不具权威性
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub username: Username,
    #[serde(skip_serializing)]
    pub password_hash: HashedPassword,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_issued_token: Option<String>,
}

impl UserRecord {
    pub fn new(username: Username, password_hash: HashedPassword) -> Self {
        Self {
            username,
            password_hash,
            last_issued_token: None,
        }
    }
}

//! 内存用户存储
//!
//! 进程内 HashMap，进程重启即丢失。存储对象自持同步原语，
//! 不暴露任何全局可变状态。

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use warden_errors::{AppError, AppResult};

use crate::domain::user::UserRecord;

/// 用户存储
///
/// 临界区内只做 map 操作，绝不持锁执行哈希等耗时计算
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入新用户
    ///
    /// 查重与写入在同一次写锁内完成：同名并发注册至多一个成功
    pub fn add(&self, record: UserRecord) -> AppResult<()> {
        let mut users = self.users.write().expect("user store lock poisoned");

        match users.entry(record.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "User {} already exists",
                record.username
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    /// 读取用户记录快照，无副作用
    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.users
            .read()
            .expect("user store lock poisoned")
            .get(username)
            .cloned()
    }

    /// 全量快照，仅供调试检视，不对外路由
    pub fn list(&self) -> Vec<UserRecord> {
        self.users
            .read()
            .expect("user store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// 记录最近一次签发的令牌（仅供排查，不具权威性）
    pub fn note_issued_token(&self, username: &str, token: &str) {
        if let Some(record) = self
            .users
            .write()
            .expect("user store lock poisoned")
            .get_mut(username)
        {
            record.last_issued_token = Some(token.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use super::*;
    use crate::domain::value_objects::{HashedPassword, Username};

    fn record(username: &str) -> UserRecord {
        UserRecord::new(
            Username::new(username).unwrap(),
            HashedPassword::from_hash("$argon2id$fake"),
        )
    }

    #[test]
    fn add_then_get_round_trips() {
        let store = UserStore::new();
        store.add(record("alice")).unwrap();

        let fetched = store.get("alice").unwrap();
        assert_eq!(fetched.username.as_str(), "alice");
        assert!(fetched.last_issued_token.is_none());

        assert!(store.get("nobody").is_none());
    }

    #[test]
    fn duplicate_username_conflicts() {
        let store = UserStore::new();
        store.add(record("alice")).unwrap();

        assert!(matches!(
            store.add(record("alice")),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn list_returns_snapshot() {
        let store = UserStore::new();
        store.add(record("alice")).unwrap();
        store.add(record("bob")).unwrap();

        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn note_issued_token_updates_record() {
        let store = UserStore::new();
        store.add(record("alice")).unwrap();

        store.note_issued_token("alice", "some.jwt.token");
        assert_eq!(
            store.get("alice").unwrap().last_issued_token.as_deref(),
            Some("some.jwt.token")
        );

        // 不存在的用户静默忽略
        store.note_issued_token("nobody", "t");
    }

    #[test]
    fn concurrent_registration_admits_exactly_one_winner() {
        let store = Arc::new(UserStore::new());
        let barrier = Arc::new(Barrier::new(100));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    store.add(record("bob")).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.list().len(), 1);
    }
}

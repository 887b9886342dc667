//! Write-through cache in front of session resolution.
//!
//! Entries live for the whole process: expiry is the session store's business,
//! and the cache is only an accelerator for lookups, never the authority.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::{SessionLookupError, SessionStore, SessionToken, User};

pub struct SessionCache {
    sessions: RwLock<HashMap<SessionToken, User>>,
    store: Arc<dyn SessionStore>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Resolve a session token, consulting the store only on a miss.
    ///
    /// Successful store lookups are cached; failures are returned unchanged and
    /// never cached.
    pub async fn get(&self, session_token: &SessionToken) -> Result<User, SessionLookupError> {
        let cached = self.sessions.read().await.get(session_token).cloned();
        if let Some(user) = cached {
            return Ok(user);
        }

        let user = self.store.resolve_session(session_token).await?;
        tracing::debug!("Session for user '{}' cached", user.name);
        self.set(session_token.clone(), user.clone()).await;

        Ok(user)
    }

    /// Unconditionally store `user` under `session_token`
    pub async fn set(&self, session_token: SessionToken, user: User) {
        self.sessions.write().await.insert(session_token, user);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{StoreError, repository::MockSessionStore},
        test_support::test_user,
    };

    #[tokio::test]
    async fn test_cold_get_hits_store_once_then_serves_from_cache() {
        // テスト項目: 初回はストアを 1 回だけ呼び、2 回目以降はキャッシュから返す
        // given (前提条件):
        let alice = test_user(1, "alice-session");
        let expected = alice.clone();
        let mut store = MockSessionStore::new();
        store
            .expect_resolve_session()
            .times(1)
            .returning(move |_| Ok(expected.clone()));
        let cache = SessionCache::new(Arc::new(store));

        // when (操作):
        let first = cache.get(&alice.session_token).await;
        let second = cache.get(&alice.session_token).await;

        // then (期待する結果):
        assert_eq!(first.unwrap(), alice);
        assert_eq!(second.unwrap(), alice);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_prepopulates_without_store_round_trip() {
        // テスト項目: set した値はストアを呼ばずに取得できる
        // given (前提条件):
        let alice = test_user(1, "alice-session");
        let mut store = MockSessionStore::new();
        store.expect_resolve_session().never();
        let cache = SessionCache::new(Arc::new(store));

        // when (操作):
        cache.set(alice.session_token.clone(), alice.clone()).await;
        let result = cache.get(&alice.session_token).await;

        // then (期待する結果):
        assert_eq!(result.unwrap(), alice);
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_entry() {
        // テスト項目: set は既存のエントリを丸ごと上書きする
        // given (前提条件):
        let mut store = MockSessionStore::new();
        store.expect_resolve_session().never();
        let cache = SessionCache::new(Arc::new(store));
        let original = test_user(1, "shared-session");
        let mut renamed = original.clone();
        renamed.name = "renamed".to_string();

        // when (操作):
        cache.set(original.session_token.clone(), original.clone()).await;
        cache.set(original.session_token.clone(), renamed.clone()).await;

        // then (期待する結果):
        assert_eq!(cache.get(&original.session_token).await.unwrap(), renamed);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_not_found_is_propagated_and_not_cached() {
        // テスト項目: NotFound はそのまま返され、キャッシュされない
        // given (前提条件):
        let token = SessionToken::new("missing".to_string()).unwrap();
        let mut store = MockSessionStore::new();
        store
            .expect_resolve_session()
            .times(2)
            .returning(|token| Err(SessionLookupError::NotFound(token.clone())));
        let cache = SessionCache::new(Arc::new(store));

        // when (操作):
        let first = cache.get(&token).await;
        let second = cache.get(&token).await;

        // then (期待する結果):
        assert_eq!(first, Err(SessionLookupError::NotFound(token.clone())));
        assert_eq!(second, Err(SessionLookupError::NotFound(token)));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_is_distinguished_from_not_found() {
        // テスト項目: ストア障害は Store エラーとして区別して返される
        // given (前提条件):
        let token = SessionToken::new("any".to_string()).unwrap();
        let mut store = MockSessionStore::new();
        store.expect_resolve_session().times(1).returning(|_| {
            Err(SessionLookupError::Store(StoreError::Unavailable(
                "connection refused".to_string(),
            )))
        });
        let cache = SessionCache::new(Arc::new(store));

        // when (操作):
        let result = cache.get(&token).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(SessionLookupError::Store(StoreError::Unavailable(_)))
        ));
        assert!(cache.is_empty().await);
    }
}

//! Registry of live connections, keyed by session token.
//!
//! The registry is the single source of truth for who is currently attached to
//! which room. A single reader/writer lock guards the map: lookups and broadcast
//! snapshots share the read side, add/remove take the write side.

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use irori_shared::time::Clock;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::domain::{Client, ClientConnection, RegistryError, RoomId, SessionToken, User};

pub struct ClientRegistry {
    clients: RwLock<HashMap<SessionToken, Arc<Client>>>,
    clock: Arc<dyn Clock>,
}

impl ClientRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Register a connection for `user` in `room_id`.
    ///
    /// The duplicate check and the insert happen under one write lock, so two
    /// concurrent registrations of the same token yield exactly one success.
    pub async fn add_client(
        &self,
        user: User,
        connection: Arc<dyn ClientConnection>,
        room_id: RoomId,
        cancellation: CancellationToken,
    ) -> Result<Arc<Client>, RegistryError> {
        let mut clients = self.clients.write().await;

        match clients.entry(user.session_token.clone()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateSession(entry.key().clone())),
            Entry::Vacant(entry) => {
                let client = Arc::new(Client::new(
                    user,
                    room_id,
                    connection,
                    cancellation,
                    self.clock.now(),
                ));
                entry.insert(client.clone());
                tracing::debug!(
                    "Client '{}' registered to room {}",
                    client.user.name,
                    room_id
                );
                Ok(client)
            }
        }
    }

    pub async fn get_client(
        &self,
        session_token: &SessionToken,
    ) -> Result<Arc<Client>, RegistryError> {
        let clients = self.clients.read().await;
        clients
            .get(session_token)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(session_token.clone()))
    }

    /// Deregister a session. Removing an unknown token is a no-op.
    pub async fn remove_client(&self, session_token: &SessionToken) -> Option<Arc<Client>> {
        let mut clients = self.clients.write().await;
        let removed = clients.remove(session_token);
        if let Some(client) = &removed {
            tracing::debug!(
                "Client '{}' unregistered from room {}",
                client.user.name,
                client.room_id
            );
        }
        removed
    }

    /// Snapshot of the open clients attached to `room_id`
    pub async fn clients_in_room(&self, room_id: RoomId) -> Vec<Arc<Client>> {
        let clients = self.clients.read().await;
        clients
            .values()
            .filter(|client| client.room_id == room_id && !client.is_closed())
            .cloned()
            .collect()
    }

    /// Every client registered in `room_id`, earliest arrival first
    pub async fn participants_in_room(&self, room_id: RoomId) -> Vec<Arc<Client>> {
        let clients = self.clients.read().await;
        let mut participants: Vec<Arc<Client>> = clients
            .values()
            .filter(|client| client.room_id == room_id)
            .cloned()
            .collect();
        participants.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.user.id.cmp(&b.user.id))
        });
        participants
    }

    pub async fn count_in_room(&self, room_id: RoomId) -> usize {
        let clients = self.clients.read().await;
        clients
            .values()
            .filter(|client| client.room_id == room_id)
            .count()
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingConnection, create_test_registry, test_user};
    use chrono::{DateTime, Utc};
    use rand::{Rng, seq::SliceRandom};
    use std::sync::atomic::{AtomicI64, Ordering};

    async fn register(
        registry: &ClientRegistry,
        user: User,
        room_id: i64,
    ) -> Result<Arc<Client>, RegistryError> {
        registry
            .add_client(
                user,
                RecordingConnection::new(),
                RoomId::new(room_id),
                CancellationToken::new(),
            )
            .await
    }

    #[tokio::test]
    async fn test_add_then_get_client() {
        // テスト項目: 登録したクライアントをセッショントークンで取得できる
        // given (前提条件):
        let registry = create_test_registry();
        let alice = test_user(1, "alice-session");

        // when (操作):
        register(&registry, alice.clone(), 1).await.unwrap();
        let client = registry.get_client(&alice.session_token).await.unwrap();

        // then (期待する結果):
        assert_eq!(client.room_id, RoomId::new(1));
        assert_eq!(client.user, alice);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_session_is_rejected() {
        // テスト項目: 同じセッションの二重登録は拒否され、既存のクライアントが残る
        // given (前提条件):
        let registry = create_test_registry();
        let alice = test_user(1, "alice-session");
        register(&registry, alice.clone(), 1).await.unwrap();

        // when (操作):
        let result = register(&registry, alice.clone(), 2).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateSession(alice.session_token.clone())
        );
        assert_eq!(registry.len().await, 1);
        let client = registry.get_client(&alice.session_token).await.unwrap();
        assert_eq!(client.room_id, RoomId::new(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_registration_has_single_winner() {
        // テスト項目: 同じトークンの同時登録は常に 1 件だけ成功する
        // given (前提条件):
        for _ in 0..50 {
            let registry = Arc::new(create_test_registry());
            let alice = test_user(1, "alice-session");

            // when (操作):
            let first = tokio::spawn({
                let registry = registry.clone();
                let alice = alice.clone();
                async move { register(&registry, alice, 1).await }
            });
            let second = tokio::spawn({
                let registry = registry.clone();
                let alice = alice.clone();
                async move { register(&registry, alice, 1).await }
            });
            let results = [first.await.unwrap(), second.await.unwrap()];

            // then (期待する結果):
            let successes = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(successes, 1);
            assert!(results.iter().any(|r| matches!(
                r,
                Err(RegistryError::DuplicateSession(_))
            )));
            assert_eq!(registry.len().await, 1);
        }
    }

    #[tokio::test]
    async fn test_remove_then_get_reports_not_found() {
        // テスト項目: 削除直後の取得は NotFound になる
        // given (前提条件):
        let registry = create_test_registry();
        let alice = test_user(1, "alice-session");
        register(&registry, alice.clone(), 1).await.unwrap();

        // when (操作):
        let removed = registry.remove_client(&alice.session_token).await;
        let result = registry.get_client(&alice.session_token).await;

        // then (期待する結果):
        assert!(removed.is_some());
        assert_eq!(
            result.unwrap_err(),
            RegistryError::NotFound(alice.session_token.clone())
        );
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_unknown_session_is_noop() {
        // テスト項目: 未登録のセッションの削除はエラーにならない (冪等性)
        // given (前提条件):
        let registry = create_test_registry();
        let alice = test_user(1, "alice-session");
        register(&registry, alice.clone(), 1).await.unwrap();
        let unknown = SessionToken::new("unknown".to_string()).unwrap();

        // when (操作):
        let first = registry.remove_client(&unknown).await;
        registry.remove_client(&alice.session_token).await;
        let second = registry.remove_client(&alice.session_token).await;

        // then (期待する結果):
        assert!(first.is_none());
        assert!(second.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_clients_in_room_filters_by_room_and_skips_closed() {
        // テスト項目: ルームごとのスナップショットには同じルームの開いている接続のみ含まれる
        // given (前提条件):
        let registry = create_test_registry();
        let alice = register(&registry, test_user(1, "alice"), 1).await.unwrap();
        register(&registry, test_user(2, "bob"), 1).await.unwrap();
        register(&registry, test_user(3, "carol"), 2).await.unwrap();

        // when (操作):
        alice.close();
        let room_one = registry.clients_in_room(RoomId::new(1)).await;
        let room_two = registry.clients_in_room(RoomId::new(2)).await;

        // then (期待する結果):
        assert_eq!(room_one.len(), 1);
        assert_eq!(room_one[0].user.name, "bob");
        assert_eq!(room_two.len(), 1);
        assert_eq!(registry.count_in_room(RoomId::new(1)).await, 2);
    }

    /// Clock that moves one second forward on every reading
    struct SteppingClock(AtomicI64);

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let secs = self.0.fetch_add(1, Ordering::SeqCst);
            DateTime::from_timestamp(secs, 0).unwrap()
        }
    }

    #[tokio::test]
    async fn test_participants_in_room_ordered_by_arrival() {
        // テスト項目: 参加者一覧は同じルームの登録済みクライアントを接続順に返す
        // given (前提条件):
        let registry = ClientRegistry::new(Arc::new(SteppingClock(AtomicI64::new(100))));
        register(&registry, test_user(3, "carol"), 1).await.unwrap();
        register(&registry, test_user(1, "alice"), 1).await.unwrap();
        register(&registry, test_user(9, "dave"), 2).await.unwrap();
        let bob = register(&registry, test_user(2, "bob"), 1).await.unwrap();
        bob.close();

        // when (操作):
        let participants = registry.participants_in_room(RoomId::new(1)).await;

        // then (期待する結果): 閉じた接続も登録中であれば含まれる
        let names: Vec<&str> = participants.iter().map(|c| c.user.name.as_str()).collect();
        assert_eq!(names, vec!["user-3", "user-1", "user-2"]);
        assert_eq!(
            participants[0].connected_at,
            DateTime::from_timestamp(100, 0).unwrap()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_remove_keeps_registry_consistent() {
        // テスト項目: ランダムな順序・タイミングで並行に登録・削除してもレジストリの状態が壊れない
        for round in 0..20 {
            // given (前提条件): 偶数番目は登録後に削除、奇数番目は登録のみ
            let registry = Arc::new(create_test_registry());
            let task_count: i64 = 64;
            let mut plan: Vec<(i64, usize, usize)> = {
                let mut rng = rand::rng();
                (0..task_count)
                    .map(|i| (i, rng.random_range(0..4), rng.random_range(0..4)))
                    .collect()
            };
            plan.shuffle(&mut rand::rng());

            // when (操作): タスクの起動順と各タスクの yield 回数をランダムにする
            let mut tasks = Vec::new();
            for (i, yields_before_add, yields_before_remove) in plan {
                let registry = registry.clone();
                tasks.push(tokio::spawn(async move {
                    let user = test_user(i, &format!("session-{i}"));
                    for _ in 0..yields_before_add {
                        tokio::task::yield_now().await;
                    }
                    register(&registry, user.clone(), i % 4).await.unwrap();
                    if i % 2 == 0 {
                        for _ in 0..yields_before_remove {
                            tokio::task::yield_now().await;
                        }
                        registry.remove_client(&user.session_token).await;
                    }
                }));
            }
            for task in tasks {
                task.await.unwrap();
            }

            // then (期待する結果): 奇数番目のトークンだけが残る
            assert_eq!(registry.len().await, (task_count / 2) as usize, "round {round}");
            for i in 0..task_count {
                let token = SessionToken::new(format!("session-{i}")).unwrap();
                let found = registry.get_client(&token).await.is_ok();
                assert_eq!(
                    found,
                    i % 2 == 1,
                    "unexpected membership for session-{i} in round {round}"
                );
            }
        }
    }
}

//! Dependency wiring shared by the binary and the end-to-end tests.

use std::sync::Arc;

use irori_shared::time::{Clock, SystemClock};
use tokio_util::sync::CancellationToken;

use crate::{
    config::ServerConfig,
    domain::MessageFactory,
    infrastructure::{
        ClientRegistry, SessionCache, message_pusher::RoomBroadcaster, repository::InMemoryStore,
    },
    ui::{Server, state::AppState},
    usecase::{
        AuthenticateUseCase, ConnectParticipantUseCase, CreateSessionUseCase,
        DisconnectParticipantUseCase, GetRoomDetailUseCase, GetRoomsUseCase, SendMessageUseCase,
    },
};

/// Build a ready-to-run server from `config`.
///
/// Dependencies are created in order:
/// 1. Store (in-memory, seeded with the configured rooms)
/// 2. Clock, ClientRegistry, MessagePusher, SessionCache
/// 3. UseCases
/// 4. AppState
/// 5. Server
pub async fn build_server(config: &ServerConfig) -> Server {
    // 1. Create Store
    let store = Arc::new(InMemoryStore::new());
    for name in &config.rooms {
        let room = store.create_room(name, "").await;
        tracing::debug!("Created room {} '{}'", room.id, room.name);
    }

    // 2. Create shared infrastructure
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registry = Arc::new(ClientRegistry::new(clock.clone()));
    let message_pusher = Arc::new(RoomBroadcaster::new(
        registry.clone(),
        config.write_timeout(),
    ));
    let session_cache = Arc::new(SessionCache::new(store.clone()));

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(registry.clone()));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        MessageFactory::new(clock),
        store.clone(),
        message_pusher,
    ));
    let authenticate_usecase = Arc::new(AuthenticateUseCase::new(session_cache.clone()));
    let create_session_usecase = Arc::new(CreateSessionUseCase::new(
        store.clone(),
        session_cache,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(store.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(
        store.clone(),
        store,
        registry.clone(),
    ));

    // 4. Create AppState
    let app_state = AppState {
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        authenticate_usecase,
        create_session_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        registry,
        shutdown: CancellationToken::new(),
        outbound_buffer: usize::from(config.outbound_buffer),
    };

    // 5. Create the server
    Server::new(app_state, config.shutdown_timeout())
}

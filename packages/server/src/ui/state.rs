//! Shared application state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    infrastructure::ClientRegistry,
    usecase::{
        AuthenticateUseCase, ConnectParticipantUseCase, CreateSessionUseCase,
        DisconnectParticipantUseCase, GetRoomDetailUseCase, GetRoomsUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    pub create_session_usecase: Arc<CreateSessionUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Live connections, watched while draining on shutdown
    pub registry: Arc<ClientRegistry>,
    /// Root of every connection's cancellation scope
    pub shutdown: CancellationToken,
    /// Frames queued per connection
    pub outbound_buffer: usize,
}

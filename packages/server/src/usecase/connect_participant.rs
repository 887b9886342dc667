//! UseCase: attach a connection to a room.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    domain::{Client, ClientConnection, RoomId, User},
    infrastructure::ClientRegistry,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<ClientRegistry>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Register `connection` for `user` in `room_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Client>)` - the registered client
    /// * `Err(ConnectError::DuplicateSession)` - the session already has a live
    ///   connection; the existing one is left untouched
    pub async fn execute(
        &self,
        user: User,
        room_id: RoomId,
        connection: Arc<dyn ClientConnection>,
        cancellation: CancellationToken,
    ) -> Result<Arc<Client>, ConnectError> {
        let client = self
            .registry
            .add_client(user, connection, room_id, cancellation)
            .await?;

        tracing::info!(
            "User '{}' joined room {} ({} online)",
            client.user.name,
            room_id,
            self.registry.count_in_room(room_id).await
        );

        Ok(client)
    }
}

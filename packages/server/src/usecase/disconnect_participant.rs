//! UseCase: detach a connection from its room.

use std::sync::Arc;

use crate::{domain::SessionToken, infrastructure::ClientRegistry};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<ClientRegistry>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Deregister the session and close its connection.
    ///
    /// Idempotent: returns `false` when nothing was registered for the token.
    pub async fn execute(&self, session_token: &SessionToken) -> bool {
        match self.registry.remove_client(session_token).await {
            Some(client) => {
                client.close();
                tracing::info!(
                    "User '{}' left room {} ({} online)",
                    client.user.name,
                    client.room_id,
                    self.registry.count_in_room(client.room_id).await
                );
                true
            }
            None => false,
        }
    }
}

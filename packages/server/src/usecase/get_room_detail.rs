//! UseCase: room info, stored history and live participant count.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    domain::{Message, MessageStore, Room, RoomId, RoomStore, UserId},
    infrastructure::ClientRegistry,
};

use super::error::GetRoomDetailError;

/// Room info together with its stored history
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub room: Room,
    /// Oldest first
    pub messages: Vec<Message>,
    /// Connections currently attached, earliest arrival first
    pub participants: Vec<Participant>,
}

/// One user attached to the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: UserId,
    pub name: String,
    pub connected_at: DateTime<Utc>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    room_store: Arc<dyn RoomStore>,
    message_store: Arc<dyn MessageStore>,
    registry: Arc<ClientRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        room_store: Arc<dyn RoomStore>,
        message_store: Arc<dyn MessageStore>,
        registry: Arc<ClientRegistry>,
    ) -> Self {
        Self {
            room_store,
            message_store,
            registry,
        }
    }

    pub async fn execute(&self, room_id: RoomId) -> Result<RoomDetail, GetRoomDetailError> {
        let room = self
            .room_store
            .get_room(room_id)
            .await?
            .ok_or(GetRoomDetailError::RoomNotFound(room_id))?;
        let messages = self.message_store.room_messages(room_id).await?;
        let participants = self
            .registry
            .participants_in_room(room_id)
            .await
            .into_iter()
            .map(|client| Participant {
                user_id: client.user.id,
                name: client.user.name.clone(),
                connected_at: client.connected_at,
            })
            .collect();

        Ok(RoomDetail {
            room,
            messages,
            participants,
        })
    }
}

//! Conversion logic between domain entities and DTOs.

use irori_shared::time::to_rfc3339;

use crate::{
    domain::{Message, Room, User},
    infrastructure::dto::http::{
        MessageDto, ParticipantDto, RoomDetailDto, RoomSummaryDto, SessionDto,
    },
    usecase::{Participant, RoomDetail},
};

impl From<Room> for RoomSummaryDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.value(),
            name: room.name,
            description: room.description,
        }
    }
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            user_id: message.user_id().value(),
            text: message.text().to_string(),
            sent_at: to_rfc3339(&message.timestamp()),
        }
    }
}

impl From<User> for SessionDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.value(),
            name: user.name,
            session_token: user.session_token.into_string(),
        }
    }
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            user_id: participant.user_id.value(),
            name: participant.name,
            connected_at: to_rfc3339(&participant.connected_at),
        }
    }
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(detail: RoomDetail) -> Self {
        Self {
            id: detail.room.id.value(),
            name: detail.room.name,
            description: detail.room.description,
            online: detail.participants.len(),
            participants: detail
                .participants
                .into_iter()
                .map(ParticipantDto::from)
                .collect(),
            messages: detail.messages.iter().map(MessageDto::from).collect(),
        }
    }
}

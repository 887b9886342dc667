//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/sessions`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

/// A freshly created session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionDto {
    pub user_id: i64,
    pub name: String,
    pub session_token: String,
}

/// Query string of `GET /api/rooms`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomsQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomSummaryDto {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageDto {
    pub user_id: i64,
    pub text: String,
    /// RFC 3339, UTC
    pub sent_at: String,
}

/// Response body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomDetailDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Connections currently attached to the room
    pub online: usize,
    pub participants: Vec<ParticipantDto>,
    pub messages: Vec<MessageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParticipantDto {
    pub user_id: i64,
    pub name: String,
    /// RFC 3339, UTC
    pub connected_at: String,
}

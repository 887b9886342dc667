//! Domain entities.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::{
    connection::ClientConnection,
    error::ConnectionError,
    value_object::{RoomId, SessionToken, UserId},
};

/// Resolved identity of an authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub session_token: SessionToken,
}

impl User {
    pub fn new(id: UserId, name: String, session_token: SessionToken) -> Self {
        Self {
            id,
            name,
            session_token,
        }
    }
}

/// One validated chat message.
///
/// Only [`MessageFactory`](super::MessageFactory) builds messages, so a value of
/// this type always carries non-empty normalized text and parsed identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    user_id: UserId,
    room_id: RoomId,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(super) fn new(
        text: String,
        user_id: UserId,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            text,
            user_id,
            room_id,
            timestamp,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A chat room as known to the room store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
}

impl Room {
    pub fn new(id: RoomId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Whether this room matches a free-text search term.
    ///
    /// A blank term matches every room. Otherwise the room matches when any word
    /// of its name starts with any word of the term, ignoring case.
    pub fn matches_search(&self, term: &str) -> bool {
        let terms: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return true;
        }

        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .any(|word| terms.iter().any(|t| word.starts_with(t.as_str())))
    }
}

/// One live connection attached to a room.
///
/// The client owns the write side of its connection and the cancellation scope
/// that bounds every write made on its behalf.
pub struct Client {
    pub user: User,
    pub room_id: RoomId,
    pub connected_at: DateTime<Utc>,
    connection: Arc<dyn ClientConnection>,
    cancellation: CancellationToken,
}

impl Client {
    pub fn new(
        user: User,
        room_id: RoomId,
        connection: Arc<dyn ClientConnection>,
        cancellation: CancellationToken,
        connected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user,
            room_id,
            connected_at,
            connection,
            cancellation,
        }
    }

    pub fn session_token(&self) -> &SessionToken {
        &self.user.session_token
    }

    /// Write one text frame, aborting if the connection scope ends first
    pub async fn send_text(&self, text: &str) -> Result<(), ConnectionError> {
        if self.cancellation.is_cancelled() {
            return Err(ConnectionError::Cancelled);
        }
        self.connection.write_text(&self.cancellation, text).await
    }

    /// End the connection scope and close the underlying connection
    pub fn close(&self) {
        self.cancellation.cancel();
        self.connection.close();
    }

    pub fn is_closed(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("user", &self.user)
            .field("room_id", &self.room_id)
            .field("connected_at", &self.connected_at)
            .field("closed", &self.is_closed())
            .finish()
    }
}

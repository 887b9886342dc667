//! Store traits for the durable-store collaborator.
//!
//! The domain defines what it needs; `infrastructure::repository` provides the
//! implementations.

use async_trait::async_trait;

use super::{
    entity::{Message, Room, User},
    error::{SessionLookupError, StoreError},
    value_object::{RoomId, SessionToken},
};

/// Message persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Durably store a message before it is broadcast
    async fn persist_message(&self, message: &Message) -> Result<(), StoreError>;

    /// Stored history of a room, oldest first
    async fn room_messages(&self, room_id: RoomId) -> Result<Vec<Message>, StoreError>;
}

/// Session persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a session token to the user that owns it
    async fn resolve_session(&self, token: &SessionToken) -> Result<User, SessionLookupError>;

    /// Create a user with a fresh session
    async fn create_session(&self, name: &str) -> Result<User, StoreError>;
}

/// Room catalogue
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;

    async fn search_rooms(&self, term: &str) -> Result<Vec<Room>, StoreError>;

    async fn get_room(&self, room_id: RoomId) -> Result<Option<Room>, StoreError>;
}

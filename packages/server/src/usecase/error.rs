//! UseCase error types.

use thiserror::Error;

use crate::domain::{
    DeliveryError, RegistryError, RoomId, SessionToken, StoreError, ValidationError,
};

/// Errors while attaching a connection to a room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("session '{0}' is already attached")]
    DuplicateSession(SessionToken),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for ConnectError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateSession(token) => Self::DuplicateSession(token),
            other => Self::Registry(other),
        }
    }
}

/// Errors while handling one inbound chat frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("invalid message: {0}")]
    Validation(#[from] ValidationError),

    /// The message was not stored and therefore not broadcast
    #[error("failed to persist message: {0}")]
    Persist(#[source] StoreError),

    /// The message was stored but at least one recipient missed it
    #[error("failed to deliver message: {0}")]
    Delivery(#[source] DeliveryError),
}

/// Errors while creating a guest session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateSessionError {
    #[error("user name must not be empty")]
    EmptyName,

    #[error("user name '{0}' is already taken")]
    NameTaken(String),

    #[error(transparent)]
    Store(StoreError),
}

/// Errors while reading a room's detail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

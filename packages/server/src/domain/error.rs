//! Domain error types.

use std::{fmt, num::ParseIntError};

use thiserror::Error;

use super::value_object::SessionToken;

/// Errors raised while building value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("session token must not be empty")]
    EmptySessionToken,
}

/// Identifier fields of an inbound chat frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    RoomId,
    UserId,
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomId => f.write_str("room_id"),
            Self::UserId => f.write_str("user_id"),
        }
    }
}

/// Caller input that cannot become a `Message`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("failed to parse {field}: {source}")]
    MalformedIdentifier {
        field: IdentifierField,
        #[source]
        source: ParseIntError,
    },
}

/// Client registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicated session '{0}'")]
    DuplicateSession(SessionToken),

    #[error("no client registered for session '{0}'")]
    NotFound(SessionToken),
}

/// Failure writing a frame to one connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection is closed")]
    Closed,

    #[error("write cancelled because the connection scope ended")]
    Cancelled,

    #[error("write timed out")]
    TimedOut,

    #[error("transport error: {0}")]
    Transport(String),
}

/// First failure observed while fanning a message out to a room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("failed to deliver to session '{session_token}': {source}")]
    Connection {
        session_token: SessionToken,
        #[source]
        source: ConnectionError,
    },

    #[error("delivery task failed: {0}")]
    TaskFailed(String),
}

/// Durable store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("conflicting record: {0}")]
    Conflict(String),

    #[error("store rejected the write: {0}")]
    Rejected(String),
}

/// Session resolution failures, keeping "not logged in" apart from "storage down"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionLookupError {
    #[error("session '{0}' not found")]
    NotFound(SessionToken),

    #[error(transparent)]
    Store(#[from] StoreError),
}

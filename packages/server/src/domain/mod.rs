//! Domain layer for the chat server.
//!
//! Entities, value objects and the collaborator traits the rest of the
//! server depends on. Nothing here knows about axum or WebSockets.

pub mod connection;
pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use connection::ClientConnection;
pub use entity::{Client, Message, Room, User};
pub use error::{
    ConnectionError, DeliveryError, IdentifierField, RegistryError, SessionLookupError,
    StoreError, ValidationError, ValueObjectError,
};
pub use factory::MessageFactory;
pub use pusher::MessagePusher;
pub use repository::{MessageStore, RoomStore, SessionStore};
pub use value_object::{RoomId, SessionToken, UserId};

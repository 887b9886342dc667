//! Message fan-out abstraction.

use async_trait::async_trait;

use super::{entity::Message, error::DeliveryError};

/// Delivers a validated message to every connection attached to its room.
///
/// Use cases depend on this trait; `infrastructure::message_pusher` provides the
/// registry-backed implementation.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Fan `message` out to its room and report the first failure, if any.
    ///
    /// Every delivery attempt has finished by the time this returns.
    async fn deliver(&self, message: &Message) -> Result<(), DeliveryError>;
}

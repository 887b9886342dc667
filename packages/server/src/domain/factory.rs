//! Validation and normalization of raw chat input.

use std::sync::Arc;

use irori_shared::time::Clock;

use super::{
    entity::Message,
    error::{IdentifierField, ValidationError},
    value_object::{RoomId, UserId},
};

/// Builds [`Message`] values from raw caller input
pub struct MessageFactory {
    clock: Arc<dyn Clock>,
}

impl MessageFactory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Validate and normalize raw input into a message stamped with the current time.
    ///
    /// Newlines become spaces and surrounding whitespace is trimmed. Text that is
    /// empty after normalization is rejected, as are identifiers that are not
    /// integers (the room id is checked before the user id).
    pub fn construct(
        &self,
        raw_text: &str,
        raw_room_id: &str,
        raw_user_id: &str,
    ) -> Result<Message, ValidationError> {
        let text = normalize_text(raw_text);
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let room_id = parse_identifier(raw_room_id, IdentifierField::RoomId)?;
        let user_id = parse_identifier(raw_user_id, IdentifierField::UserId)?;

        Ok(Message::new(
            text,
            UserId::new(user_id),
            RoomId::new(room_id),
            self.clock.now(),
        ))
    }
}

fn normalize_text(raw_text: &str) -> String {
    raw_text.replace('\n', " ").trim().to_string()
}

fn parse_identifier(raw: &str, field: IdentifierField) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .map_err(|source| ValidationError::MalformedIdentifier { field, source })
}

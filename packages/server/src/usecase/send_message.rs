//! UseCase: メッセージ送信処理
//!
//! Validates one inbound frame, persists it, then fans it out to the room.
//! Store-then-broadcast runs on the sender's task, so a sender's messages reach
//! the store in order and a message that failed to persist is never broadcast.

use std::sync::Arc;

use crate::domain::{Message, MessageFactory, MessagePusher, MessageStore};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    factory: MessageFactory,
    message_store: Arc<dyn MessageStore>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    pub fn new(
        factory: MessageFactory,
        message_store: Arc<dyn MessageStore>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            factory,
            message_store,
            message_pusher,
        }
    }

    /// Validate, persist and broadcast one message.
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - stored and delivered to every recipient
    /// * `Err(SendMessageError::Validation)` / `Err(SendMessageError::Persist)` -
    ///   nothing was broadcast
    /// * `Err(SendMessageError::Delivery)` - stored, but some recipient missed it
    pub async fn execute(
        &self,
        raw_text: &str,
        raw_room_id: &str,
        raw_user_id: &str,
    ) -> Result<Message, SendMessageError> {
        // 1. Validate and normalize
        let message = self.factory.construct(raw_text, raw_room_id, raw_user_id)?;

        // 2. Persist
        self.message_store
            .persist_message(&message)
            .await
            .map_err(SendMessageError::Persist)?;

        // 3. Fan out to the room
        self.message_pusher
            .deliver(&message)
            .await
            .map_err(SendMessageError::Delivery)?;

        Ok(message)
    }
}

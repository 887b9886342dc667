//! Room-scoped fan-out.
//!
//! `deliver` snapshots the room's membership, spawns one task per recipient on a
//! `JoinSet` and joins every task before looking at the results. Nothing reports
//! through a channel, so no task can be left blocked on a reader that went away,
//! and the caller waits no longer than the slowest recipient (each write is
//! capped by `write_timeout`).

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::{
    domain::{Client, ConnectionError, DeliveryError, Message, MessagePusher},
    infrastructure::ClientRegistry,
};

pub struct RoomBroadcaster {
    registry: Arc<ClientRegistry>,
    write_timeout: Duration,
}

impl RoomBroadcaster {
    pub fn new(registry: Arc<ClientRegistry>, write_timeout: Duration) -> Self {
        Self {
            registry,
            write_timeout,
        }
    }
}

#[async_trait]
impl MessagePusher for RoomBroadcaster {
    async fn deliver(&self, message: &Message) -> Result<(), DeliveryError> {
        let recipients = self.registry.clients_in_room(message.room_id()).await;
        if recipients.is_empty() {
            tracing::debug!("No recipients in room {}", message.room_id());
            return Ok(());
        }

        let text: Arc<str> = Arc::from(message.text());
        let mut attempts = JoinSet::new();
        for client in recipients {
            let text = text.clone();
            let write_timeout = self.write_timeout;
            attempts.spawn(async move { deliver_to(client, &text, write_timeout).await });
        }

        let mut first_error = None;
        while let Some(joined) = attempts.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(DeliveryError::TaskFailed(e.to_string())));
            if let Err(e) = outcome {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    tracing::debug!(
                        "Additional delivery failure in room {}: {}",
                        message.room_id(),
                        e
                    );
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Write one message to one recipient.
///
/// A recipient whose write fails is closed so its own task winds down; the
/// failure itself goes back to the broadcasting caller.
async fn deliver_to(
    client: Arc<Client>,
    text: &str,
    write_timeout: Duration,
) -> Result<(), DeliveryError> {
    let result = match tokio::time::timeout(write_timeout, client.send_text(text)).await {
        Ok(result) => result,
        Err(_) => Err(ConnectionError::TimedOut),
    };

    match result {
        Ok(()) => {
            tracing::debug!(
                "send message: {} to user: {} (id {})",
                text,
                client.user.name,
                client.user.id
            );
            Ok(())
        }
        Err(source) => {
            tracing::warn!(
                "Failed to push message to user '{}' in room {}: {}",
                client.user.name,
                client.room_id,
                source
            );
            client.close();
            Err(DeliveryError::Connection {
                session_token: client.session_token().clone(),
                source,
            })
        }
    }
}

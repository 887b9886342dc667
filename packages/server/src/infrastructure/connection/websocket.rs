//! WebSocket implementation of `ClientConnection`.
//!
//! The socket's write half is owned by a single pusher task (`pusher_loop`).
//! `WebSocketConnection` hands frames to that task through a bounded queue, so
//! a frame counts as written once the queue accepts it. Both the queue send and
//! the pusher task stop as soon as the connection scope is cancelled.

use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{sink::SinkExt, stream::SplitSink};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::domain::{ClientConnection, ConnectionError};

/// Upper bound for flushing the close frame to a peer that may already be gone
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

pub struct WebSocketConnection {
    outbound: mpsc::Sender<String>,
    lifetime: CancellationToken,
}

impl WebSocketConnection {
    /// `outbound` feeds the pusher task; cancelling `lifetime` closes the socket.
    pub fn new(outbound: mpsc::Sender<String>, lifetime: CancellationToken) -> Self {
        Self { outbound, lifetime }
    }
}

#[async_trait]
impl ClientConnection for WebSocketConnection {
    async fn write_text(
        &self,
        scope: &CancellationToken,
        text: &str,
    ) -> Result<(), ConnectionError> {
        tokio::select! {
            biased;
            _ = scope.cancelled() => Err(ConnectionError::Cancelled),
            sent = self.outbound.send(text.to_string()) => {
                sent.map_err(|_| ConnectionError::Closed)
            }
        }
    }

    fn close(&self) {
        self.lifetime.cancel();
    }
}

/// Spawns the task that owns the WebSocket write half.
///
/// Frames queued by [`WebSocketConnection`] are written in order until the queue
/// closes, a write fails, or `scope` is cancelled. The socket is then closed.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
pub fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    scope: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                _ = scope.cancelled() => break,
                frame = rx.recv() => match frame {
                    Some(frame) => frame,
                    None => break,
                },
            };

            let sent = tokio::select! {
                _ = scope.cancelled() => break,
                sent = sender.send(Message::Text(frame.into())) => sent,
            };
            if let Err(e) = sent {
                tracing::debug!("WebSocket write failed: {}", e);
                break;
            }
        }

        // Stop accepting frames and wake up the read loop
        scope.cancel();
        rx.close();
        if tokio::time::timeout(CLOSE_TIMEOUT, sender.close()).await.is_err() {
            tracing::debug!("Timed out closing WebSocket");
        }
    })
}

//! Write side of a client connection, as seen by the broadcast engine.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::ConnectionError;

/// Handle capable of writing text frames to one connected client.
///
/// Implemented by the transport layer (see
/// `infrastructure::connection::WebSocketConnection`).
#[async_trait]
pub trait ClientConnection: Send + Sync {
    /// Open a write scope bound to `scope`, write `text` as a single text frame
    /// and close the scope again.
    ///
    /// Must return promptly with [`ConnectionError::Cancelled`] once `scope` is
    /// cancelled instead of waiting on a dead peer.
    async fn write_text(&self, scope: &CancellationToken, text: &str)
    -> Result<(), ConnectionError>;

    /// Close the connection. Calling it more than once is harmless.
    fn close(&self);
}

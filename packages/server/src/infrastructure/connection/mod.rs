//! Transport implementations of the `ClientConnection` trait.
//!
//! - `websocket`: axum WebSocket, written through a per-connection outbound queue

pub mod websocket;

pub use websocket::{WebSocketConnection, pusher_loop};

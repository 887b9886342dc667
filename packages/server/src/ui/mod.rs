//! UI layer: axum server, HTTP and WebSocket handlers.

pub mod auth;
mod handler;
mod server;
pub mod signal;
pub mod state;

pub use server::{Server, ServerError};

//! Infrastructure layer: concrete implementations of the domain traits plus the
//! in-process state shared by every connection.

pub mod connection;
pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod session_cache;

pub use registry::ClientRegistry;
pub use session_cache::SessionCache;

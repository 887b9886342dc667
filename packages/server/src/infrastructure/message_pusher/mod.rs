//! Implementations of the `MessagePusher` trait.
//!
//! - `broadcaster`: concurrent fan-out to the live connections in a room

pub mod broadcaster;

pub use broadcaster::RoomBroadcaster;

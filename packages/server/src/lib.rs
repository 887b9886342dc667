//! Room-scoped WebSocket chat server library.
//!
//! Authenticated users exchange short text messages inside named rooms. Each
//! message is persisted and fanned out to every connection attached to the
//! same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
pub mod config;

#[cfg(test)]
mod test_support;

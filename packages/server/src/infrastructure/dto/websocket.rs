//! WebSocket frame DTOs.

use serde::Deserialize;

/// Inbound chat frame.
///
/// Identifiers arrive string-encoded and are parsed by `MessageFactory`. Every
/// field is required: a frame missing one is a decode error, never filled in
/// from an earlier frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundFrame {
    pub message: String,
    pub user_id: String,
    pub room_id: String,
}

impl InboundFrame {
    /// Decode one text frame into a fresh value
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

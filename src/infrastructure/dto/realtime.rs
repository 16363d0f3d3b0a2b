//! WebSocket frame payload shapes.
//!
//! Frames carry a `type` discriminator. Decoding is a closed tagged-variant
//! match: a frame whose discriminator is unknown fails to decode and is
//! dropped by the reader with a warning, never partially interpreted.

use serde::{Deserialize, Serialize};

use super::http::MessageDto;

/// Frames the server pushes over a room channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    /// A new message in the bound room
    ChatMessage { message: MessageDto },
}

/// Frames the client sends over a room channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// Send one message to the bound room
    SendMessage { content: String, chat_room: String },
}

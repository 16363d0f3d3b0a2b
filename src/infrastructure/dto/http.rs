//! REST API payload shapes.

use serde::{Deserialize, Serialize};

/// One participant of a room as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One chat message as returned by the backend.
///
/// `created_at` is an RFC 3339 timestamp string; it is validated during
/// conversion to the domain entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub sender: String,
    pub content: String,
    pub created_at: String,
    pub chat_room: String,
}

/// Room-list entry: participants plus the last-message preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub last_message: Option<MessageDto>,
}

/// Room detail: participants plus the full message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
}

/// Request body for starting a chat by counterpart email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequestDto {
    pub second_participant: String,
}

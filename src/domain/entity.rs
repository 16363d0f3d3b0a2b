//! Domain entities: participants, messages and one-to-one chat rooms.

use super::error::DomainError;
use super::value_object::{MessageBody, RoomId, Timestamp, UserId};

/// A user taking part in a room, as shown in the room list and thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl Participant {
    pub fn new(id: UserId, display_name: String, avatar: Option<String>) -> Self {
        Self {
            id,
            display_name,
            avatar,
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: UserId,
    pub body: MessageBody,
    pub sent_at: Timestamp,
    pub room_id: RoomId,
}

impl Message {
    pub fn new(sender: UserId, body: MessageBody, sent_at: Timestamp, room_id: RoomId) -> Self {
        Self {
            sender,
            body,
            sent_at,
            room_id,
        }
    }

    /// Whether this message was sent by the given user
    pub fn is_from(&self, user: &UserId) -> bool {
        &self.sender == user
    }
}

/// A one-to-one chat room.
///
/// The message sequence is append-only and its insertion order is the
/// chronological order: history arrives first from the REST fetch, live
/// messages are appended in arrival order afterwards. No reordering or
/// deduplication happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: RoomId,
    participants: Vec<Participant>,
    messages: Vec<Message>,
}

impl ChatRoom {
    /// Create a room. Fails unless exactly two participants are given.
    pub fn new(
        id: RoomId,
        participants: Vec<Participant>,
        messages: Vec<Message>,
    ) -> Result<Self, DomainError> {
        if participants.len() != 2 {
            return Err(DomainError::InvalidParticipantCount(participants.len()));
        }
        Ok(Self {
            id,
            participants,
            messages,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The participant who is not `me`. Falls back to the first participant
    /// if `me` is not a member (the directory never shows such rooms, but the
    /// render path must not panic on one).
    pub fn counterpart(&self, me: &UserId) -> &Participant {
        self.participants
            .iter()
            .find(|p| &p.id != me)
            .unwrap_or(&self.participants[0])
    }

    /// The last message of the room, used as the room-list preview
    pub fn preview(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a message to the end of the sequence (arrival order)
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}

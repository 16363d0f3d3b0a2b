//! Domain-level error types.

use thiserror::Error;

/// Validation errors raised by domain value objects and entities
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Room identifier must not be empty
    #[error("Room ID must not be empty")]
    EmptyRoomId,

    /// User identifier must not be empty
    #[error("User ID must not be empty")]
    EmptyUserId,

    /// Message body must contain at least one non-whitespace character
    #[error("Message body must not be empty")]
    EmptyMessageBody,

    /// Rooms are one-to-one conversations with exactly two participants
    #[error("Room must have exactly two participants, got {0}")]
    InvalidParticipantCount(usize),
}

//! Value objects used across the chat domain.
//!
//! All identifiers are opaque strings minted by the backend; the value
//! objects only enforce the invariants the client relies on.

use super::error::DomainError;

/// Identifier of a chat room
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId. Fails if the identifier is empty.
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Identifier of a user (profile reference)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId. Fails if the identifier is empty.
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Text content of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a new MessageBody. Fails if the content is empty or
    /// whitespace-only.
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyMessageBody);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_non_empty_value() {
        // given:
        let value = "room-42".to_string();

        // when:
        let result = RoomId::new(value);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "room-42");
    }

    #[test]
    fn test_room_id_rejects_empty_value() {
        // given:
        let value = "  ".to_string();

        // when:
        let result = RoomId::new(value);

        // then:
        assert_eq!(result, Err(DomainError::EmptyRoomId));
    }

    #[test]
    fn test_user_id_rejects_empty_value() {
        // given:
        let value = String::new();

        // when:
        let result = UserId::new(value);

        // then:
        assert_eq!(result, Err(DomainError::EmptyUserId));
    }

    #[test]
    fn test_message_body_rejects_whitespace_only_value() {
        // given:
        let value = " \t\n ".to_string();

        // when:
        let result = MessageBody::new(value);

        // then:
        assert_eq!(result, Err(DomainError::EmptyMessageBody));
    }

    #[test]
    fn test_message_body_preserves_inner_whitespace() {
        // given:
        let value = "see you at the airport  ".to_string();

        // when:
        let body = MessageBody::new(value).unwrap();

        // then:
        assert_eq!(body.as_str(), "see you at the airport  ");
    }

    #[test]
    fn test_timestamp_round_trips_value() {
        // given:
        let millis = 1672565400000;

        // when:
        let timestamp = Timestamp::new(millis);

        // then:
        assert_eq!(timestamp.value(), millis);
    }
}

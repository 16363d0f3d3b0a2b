//! Conversion logic between DTOs and domain entities.
//!
//! Conversions are fallible: identifiers, bodies, participant counts and
//! timestamps are all validated here, at the boundary, so the rest of the
//! client only ever sees well-formed domain values.

use chrono::DateTime;
use thiserror::Error;

use crate::domain::{
    ChatRoom, DomainError, Message, MessageBody, OutboundMessage, Participant, RoomId, Timestamp,
    UserId,
};
use crate::infrastructure::dto::http as dto;
use crate::infrastructure::dto::realtime::OutboundFrame;

/// Errors raised while converting wire payloads into domain entities
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn parse_rfc3339_millis(value: &str) -> Result<Timestamp, ConversionError> {
    let dt = DateTime::parse_from_rfc3339(value)
        .map_err(|_| ConversionError::InvalidTimestamp(value.to_string()))?;
    Ok(Timestamp::new(dt.timestamp_millis()))
}

// ========================================
// DTO -> Domain Entity
// ========================================

impl TryFrom<dto::ParticipantDto> for Participant {
    type Error = ConversionError;

    fn try_from(dto: dto::ParticipantDto) -> Result<Self, Self::Error> {
        Ok(Participant::new(UserId::new(dto.id)?, dto.name, dto.avatar))
    }
}

impl TryFrom<dto::MessageDto> for Message {
    type Error = ConversionError;

    fn try_from(dto: dto::MessageDto) -> Result<Self, Self::Error> {
        Ok(Message::new(
            UserId::new(dto.sender)?,
            MessageBody::new(dto.content)?,
            parse_rfc3339_millis(&dto.created_at)?,
            RoomId::new(dto.chat_room)?,
        ))
    }
}

impl TryFrom<dto::RoomSummaryDto> for ChatRoom {
    type Error = ConversionError;

    fn try_from(dto: dto::RoomSummaryDto) -> Result<Self, Self::Error> {
        let participants = dto
            .participants
            .into_iter()
            .map(Participant::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        // A summary carries at most the preview message
        let messages = dto
            .last_message
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChatRoom::new(RoomId::new(dto.id)?, participants, messages)?)
    }
}

impl TryFrom<dto::RoomDetailDto> for ChatRoom {
    type Error = ConversionError;

    fn try_from(dto: dto::RoomDetailDto) -> Result<Self, Self::Error> {
        let participants = dto
            .participants
            .into_iter()
            .map(Participant::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let messages = dto
            .messages
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChatRoom::new(RoomId::new(dto.id)?, participants, messages)?)
    }
}

// ========================================
// Domain Entity -> DTO
// ========================================

impl From<OutboundMessage> for OutboundFrame {
    fn from(outbound: OutboundMessage) -> Self {
        OutboundFrame::SendMessage {
            content: outbound.content.into_string(),
            chat_room: outbound.room_id.into_string(),
        }
    }
}

//! Chat domain: entities, value objects and the interfaces the client
//! requires from its collaborators.

pub mod api;
pub mod channel;
pub mod entity;
pub mod error;
pub mod value_object;

pub use api::{ApiError, DirectoryApi};
pub use channel::{
    ChannelConnector, ChannelError, ChannelEvent, ChannelStatus, ChannelTransport, OutboundMessage,
};
pub use entity::{ChatRoom, Message, Participant};
pub use error::DomainError;
pub use value_object::{MessageBody, RoomId, Timestamp, UserId};

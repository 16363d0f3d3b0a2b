//! Realtime channel interface required by the chat domain.
//!
//! One live channel exists per active room. The domain layer owns the
//! connector/transport traits; the infrastructure layer provides the
//! WebSocket implementation, tests provide in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::entity::Message;
use super::value_object::{MessageBody, RoomId};

/// Lifecycle states of a channel bound to one active room.
///
/// Closed is terminal per room instance; re-opening a room creates a new
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Closed,
    Connecting,
    Open,
}

/// Events a live channel feeds into the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A `chat_message` frame arrived for the bound room
    MessageReceived(Message),
    /// The peer closed the connection or the stream errored out
    Closed,
}

/// An outgoing message payload for the bound room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub room_id: RoomId,
    pub content: MessageBody,
}

/// Errors raised by the realtime collaborator
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The connection could not be established
    #[error("Failed to connect channel: {0}")]
    Connect(String),

    /// A send was attempted while the channel was not Open
    #[error("Channel is not open")]
    NotOpen,

    /// The underlying transport rejected an outbound frame
    #[error("Failed to send frame: {0}")]
    Send(String),

    /// The close handshake failed
    #[error("Failed to close channel: {0}")]
    Close(String),
}

/// Handle to one live channel: send and close. Status is inspected before
/// closing so an already-closed handle is never closed twice.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    /// Current readiness of the channel
    fn status(&self) -> ChannelStatus;

    /// Transmit one message payload over the Open channel
    async fn send(&self, outbound: OutboundMessage) -> Result<(), ChannelError>;

    /// Issue a close request for the channel
    async fn close(&self) -> Result<(), ChannelError>;
}

/// Opens a channel for a room, yielding the transport handle and the stream
/// of inbound events
#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn connect(
        &self,
        room_id: &RoomId,
    ) -> Result<
        (
            Arc<dyn ChannelTransport>,
            mpsc::UnboundedReceiver<ChannelEvent>,
        ),
        ChannelError,
    >;
}

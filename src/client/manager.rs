//! Realtime channel manager.
//!
//! Owns at most one live channel at any instant, bound to the active room.
//! Switching rooms force-closes the previous channel before the new one is
//! opened; teardown only issues a close request while the channel is still
//! Open.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{
    ChannelConnector, ChannelError, ChannelEvent, ChannelStatus, ChannelTransport, MessageBody,
    OutboundMessage, RoomId,
};

struct BoundChannel {
    room_id: RoomId,
    transport: Arc<dyn ChannelTransport>,
}

/// Exclusive owner of the active room's channel handle
pub struct ChannelManager {
    connector: Arc<dyn ChannelConnector>,
    active: Option<BoundChannel>,
}

impl ChannelManager {
    pub fn new(connector: Arc<dyn ChannelConnector>) -> Self {
        Self {
            connector,
            active: None,
        }
    }

    /// The room the live channel is bound to, if any
    pub fn bound_room(&self) -> Option<&RoomId> {
        self.active.as_ref().map(|bound| &bound.room_id)
    }

    /// Readiness of the bound channel; Closed when no channel is bound
    pub fn status(&self) -> ChannelStatus {
        self.active
            .as_ref()
            .map(|bound| bound.transport.status())
            .unwrap_or(ChannelStatus::Closed)
    }

    /// Bind the manager to a new room: tear down the previous channel, then
    /// open one for `room_id`. Returns the stream of inbound events.
    pub async fn switch_to(
        &mut self,
        room_id: RoomId,
    ) -> Result<mpsc::UnboundedReceiver<ChannelEvent>, ChannelError> {
        self.teardown().await;

        let (transport, events) = self.connector.connect(&room_id).await?;
        self.active = Some(BoundChannel { room_id, transport });
        Ok(events)
    }

    /// Close the bound channel, if any. Idempotent; a channel that is no
    /// longer Open is dropped without a close request.
    pub async fn teardown(&mut self) {
        if let Some(bound) = self.active.take() {
            if bound.transport.status() == ChannelStatus::Open {
                if let Err(e) = bound.transport.close().await {
                    tracing::warn!(
                        "Failed to close channel for room '{}': {}",
                        bound.room_id.as_str(),
                        e
                    );
                }
            }
            tracing::debug!("Channel for room '{}' torn down", bound.room_id.as_str());
        }
    }

    /// Transmit one message payload over the Open channel
    pub async fn send(&self, content: MessageBody) -> Result<(), ChannelError> {
        match &self.active {
            Some(bound) if bound.transport.status() == ChannelStatus::Open => {
                bound
                    .transport
                    .send(OutboundMessage {
                        room_id: bound.room_id.clone(),
                        content,
                    })
                    .await
            }
            _ => Err(ChannelError::NotOpen),
        }
    }
}

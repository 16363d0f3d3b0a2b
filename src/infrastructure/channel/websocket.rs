//! WebSocket implementation of the realtime channel.
//!
//! One connection per active room, addressed by room identifier with the
//! authentication token as a connection parameter. The writer half lives in
//! the transport handle; the reader half runs in a spawned task that decodes
//! tagged frames and forwards domain events over an unbounded channel. The
//! reader never touches application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::config::ClientConfig;
use crate::domain::{
    ChannelConnector, ChannelError, ChannelEvent, ChannelStatus, ChannelTransport, Message,
    OutboundMessage, RoomId,
};
use crate::infrastructure::dto::realtime::{InboundFrame, OutboundFrame};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

const STATUS_CLOSED: u8 = 0;
const STATUS_CONNECTING: u8 = 1;
const STATUS_OPEN: u8 = 2;

fn status_from_u8(value: u8) -> ChannelStatus {
    match value {
        STATUS_OPEN => ChannelStatus::Open,
        STATUS_CONNECTING => ChannelStatus::Connecting,
        _ => ChannelStatus::Closed,
    }
}

/// Opens WebSocket channels for rooms
pub struct WsChannelConnector {
    ws_base: String,
    token: String,
}

impl WsChannelConnector {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            ws_base: config.ws_base.clone(),
            token: config.token.clone(),
        }
    }

    fn room_url(&self, room_id: &RoomId) -> String {
        format!(
            "{}/ws/chat/{}/?token={}",
            self.ws_base,
            room_id.as_str(),
            self.token
        )
    }
}

#[async_trait]
impl ChannelConnector for WsChannelConnector {
    async fn connect(
        &self,
        room_id: &RoomId,
    ) -> Result<
        (
            Arc<dyn ChannelTransport>,
            mpsc::UnboundedReceiver<ChannelEvent>,
        ),
        ChannelError,
    > {
        let url = self.room_url(room_id);
        let status = Arc::new(AtomicU8::new(STATUS_CONNECTING));

        let (ws_stream, _response) = connect_async(&url).await.map_err(|e| {
            status.store(STATUS_CLOSED, Ordering::SeqCst);
            ChannelError::Connect(e.to_string())
        })?;
        status.store(STATUS_OPEN, Ordering::SeqCst);
        tracing::info!("Channel open for room '{}'", room_id.as_str());

        let (writer, reader) = ws_stream.split();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        tokio::spawn(read_loop(
            reader,
            events_tx,
            status.clone(),
            room_id.as_str().to_string(),
        ));

        let transport = Arc::new(WsChannelTransport {
            writer: Mutex::new(writer),
            status,
        });

        Ok((transport, events_rx))
    }
}

/// Handle to one live WebSocket channel
pub struct WsChannelTransport {
    writer: Mutex<WsSink>,
    status: Arc<AtomicU8>,
}

#[async_trait]
impl ChannelTransport for WsChannelTransport {
    fn status(&self) -> ChannelStatus {
        status_from_u8(self.status.load(Ordering::SeqCst))
    }

    async fn send(&self, outbound: OutboundMessage) -> Result<(), ChannelError> {
        if self.status() != ChannelStatus::Open {
            return Err(ChannelError::NotOpen);
        }

        let frame: OutboundFrame = outbound.into();
        let json = serde_json::to_string(&frame).map_err(|e| ChannelError::Send(e.to_string()))?;

        let mut writer = self.writer.lock().await;
        writer.send(WsMessage::Text(json.into())).await.map_err(|e| {
            self.status.store(STATUS_CLOSED, Ordering::SeqCst);
            ChannelError::Send(e.to_string())
        })
    }

    async fn close(&self) -> Result<(), ChannelError> {
        // Only issue a close request while the channel is still open
        if self.status() != ChannelStatus::Open {
            return Ok(());
        }
        self.status.store(STATUS_CLOSED, Ordering::SeqCst);

        let mut writer = self.writer.lock().await;
        writer
            .send(WsMessage::Close(None))
            .await
            .map_err(|e| ChannelError::Close(e.to_string()))
    }
}

/// Forward decoded inbound events until the stream ends.
///
/// Unknown frame kinds and malformed payloads are logged and dropped.
async fn read_loop(
    mut reader: WsSource,
    events_tx: mpsc::UnboundedSender<ChannelEvent>,
    status: Arc<AtomicU8>,
    room_id: String,
) {
    while let Some(frame) = reader.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => match serde_json::from_str::<InboundFrame>(&text) {
                Ok(InboundFrame::ChatMessage { message }) => match Message::try_from(message) {
                    Ok(message) => {
                        if events_tx
                            .send(ChannelEvent::MessageReceived(message))
                            .is_err()
                        {
                            // Session dropped its receiver, nobody is listening
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Dropping malformed chat_message payload: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Dropping unrecognized frame: {}", e);
                }
            },
            Ok(WsMessage::Close(_)) => {
                tracing::info!("Server closed channel for room '{}'", room_id);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Channel read error for room '{}': {}", room_id, e);
                break;
            }
        }
    }

    let was_open = status.swap(STATUS_CLOSED, Ordering::SeqCst) == STATUS_OPEN;
    if was_open {
        // Peer-initiated close; tell the session so it can surface a notice
        let _ = events_tx.send(ChannelEvent::Closed);
    }
}

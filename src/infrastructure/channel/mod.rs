//! Realtime channel implementations.
//!
//! `websocket` is the production implementation of the domain's
//! `ChannelConnector`/`ChannelTransport` seams. Tests use in-memory fakes.

pub mod websocket;

pub use websocket::WsChannelConnector;

//! Infrastructure layer: concrete implementations of the domain's
//! collaborator interfaces plus the wire-format DTOs.

pub mod channel;
pub mod dto;
pub mod rest;

pub use channel::WsChannelConnector;
pub use rest::HttpDirectoryApi;

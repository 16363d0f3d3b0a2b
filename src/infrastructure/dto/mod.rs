//! Data Transfer Objects (DTOs) for the chat client.
//!
//! DTOs are organized by protocol:
//! - `http`: REST API payloads
//! - `realtime`: WebSocket frame payloads
//!
//! Payloads are decoded explicitly at the boundary and converted into domain
//! entities through fallible conversions; nothing downstream trusts wire
//! shapes implicitly.

pub mod conversion;
pub mod http;
pub mod realtime;

//! Realtime chat client library.
//!
//! This library implements a terminal chat client: a REST-loaded room
//! directory, per-room WebSocket channels with at most one live channel at a
//! time, and a reducer-style state container driving the rendering.

// layers
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod state;
pub mod usecase;

// shared library
pub mod common;

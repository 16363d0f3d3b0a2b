//! Shared utilities: configuration, logging, time.

pub mod config;
pub mod logger;
pub mod time;

//! Client layer: page orchestration, channel management, composer state and
//! terminal presentation.

pub mod composer;
pub mod formatter;
pub mod manager;
pub mod page;
pub mod runner;
pub mod session;
pub mod ui;

pub use composer::Composer;
pub use formatter::{MessageFormatter, Notice, ViewMode};
pub use manager::ChannelManager;
pub use page::{ChatPage, PageOutput};
pub use runner::run_client;

//! Client execution: wire the real collaborators and hand off to the
//! interactive session.

use std::sync::Arc;

use crate::client::formatter::ViewMode;
use crate::client::page::ChatPage;
use crate::client::session::run_client_session;
use crate::common::config::ClientConfig;
use crate::common::time::SystemClock;
use crate::domain::UserId;
use crate::infrastructure::{HttpDirectoryApi, WsChannelConnector};

/// Run the chat client against the configured backend
pub async fn run_client(
    config: ClientConfig,
    user_id: String,
    mode: ViewMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let me = UserId::new(user_id.clone())?;

    let api = Arc::new(HttpDirectoryApi::new(&config));
    let connector = Arc::new(WsChannelConnector::new(&config));
    let clock = Arc::new(SystemClock);

    tracing::info!(
        "Starting chat client for '{}' against {}",
        me.as_str(),
        config.api_base
    );

    let page = ChatPage::new(me, api, connector, clock, mode);
    run_client_session(page, &user_id).await
}

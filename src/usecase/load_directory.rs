//! UseCase: load the caller's room directory.

use std::sync::Arc;

use crate::domain::{ApiError, ChatRoom, DirectoryApi};

/// Fetches the room list from the REST collaborator.
///
/// Idempotent: re-running it simply yields a fresh list that replaces the
/// stored one wholesale (e.g., after starting a new room).
pub struct LoadDirectoryUseCase {
    api: Arc<dyn DirectoryApi>,
}

impl LoadDirectoryUseCase {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<Vec<ChatRoom>, ApiError> {
        let rooms = self.api.list_rooms().await?;
        tracing::debug!("Loaded directory with {} room(s)", rooms.len());
        Ok(rooms)
    }
}

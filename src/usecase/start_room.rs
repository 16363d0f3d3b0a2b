//! UseCase: start a chat with a counterpart identified by email.

use std::sync::Arc;

use crate::domain::{ApiError, ChatRoom, DirectoryApi};

/// Creates a room via the REST collaborator.
///
/// The caller refetches the directory afterwards; the returned room is only
/// used for the confirmation notice.
pub struct StartRoomUseCase {
    api: Arc<dyn DirectoryApi>,
}

impl StartRoomUseCase {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self, counterpart_email: &str) -> Result<ChatRoom, ApiError> {
        let room = self.api.create_room(counterpart_email).await?;
        tracing::info!("Created room '{}'", room.id.as_str());
        Ok(room)
    }
}

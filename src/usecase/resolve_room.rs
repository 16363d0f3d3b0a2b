//! UseCase: resolve the active room for a selection.
//!
//! The result is tagged with the selection generation it was requested
//! under; the reducer drops results belonging to superseded selections.

use std::sync::Arc;

use crate::domain::{ApiError, ChatRoom, DirectoryApi, RoomId};

/// Fetches one room's full detail (participants + message history)
pub struct ResolveRoomUseCase {
    api: Arc<dyn DirectoryApi>,
}

impl ResolveRoomUseCase {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    /// Fetch the room detail for the given selection generation.
    ///
    /// On success the room is returned together with the generation so the
    /// caller can hand both to the state container unchanged.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        generation: u64,
    ) -> Result<(u64, ChatRoom), ApiError> {
        let room = self.api.room_detail(room_id).await?;
        tracing::debug!(
            "Resolved room '{}' with {} message(s)",
            room.id.as_str(),
            room.messages().len()
        );
        Ok((generation, room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api::MockDirectoryApi;
    use crate::domain::{Participant, UserId};

    fn room(id: &str) -> ChatRoom {
        ChatRoom::new(
            RoomId::new(id.to_string()).unwrap(),
            vec![
                Participant::new(
                    UserId::new("u1".to_string()).unwrap(),
                    "Alice".to_string(),
                    None,
                ),
                Participant::new(
                    UserId::new("u2".to_string()).unwrap(),
                    "Bob".to_string(),
                    None,
                ),
            ],
            vec![],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_tags_result_with_generation() {
        // given:
        let mut api = MockDirectoryApi::new();
        api.expect_room_detail()
            .times(1)
            .returning(|id| Ok(room(id.as_str())));
        let usecase = ResolveRoomUseCase::new(Arc::new(api));
        let room_id = RoomId::new("r1".to_string()).unwrap();

        // when:
        let result = usecase.execute(&room_id, 7).await;

        // then:
        let (generation, resolved) = result.unwrap();
        assert_eq!(generation, 7);
        assert_eq!(resolved.id.as_str(), "r1");
    }

    #[tokio::test]
    async fn test_execute_propagates_fetch_failure() {
        // given:
        let mut api = MockDirectoryApi::new();
        api.expect_room_detail()
            .times(1)
            .returning(|_| Err(ApiError::Transport("connection refused".to_string())));
        let usecase = ResolveRoomUseCase::new(Arc::new(api));
        let room_id = RoomId::new("r1".to_string()).unwrap();

        // when:
        let result = usecase.execute(&room_id, 1).await;

        // then:
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}

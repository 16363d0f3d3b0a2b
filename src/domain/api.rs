//! REST backend interface required by the chat domain.
//!
//! The domain layer owns this trait; the infrastructure layer provides the
//! HTTP implementation (dependency inversion). Tests substitute a mock.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::ChatRoom;
use super::value_object::RoomId;

/// Errors returned by the REST collaborator
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (network, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code
    #[error("Backend returned status {0}")]
    Status(u16),

    /// The response body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Room directory operations exposed by the REST backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch the caller's room list, each room carrying its last-message
    /// preview
    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError>;

    /// Fetch one room's full detail: participants and message history
    async fn room_detail(&self, room_id: &RoomId) -> Result<ChatRoom, ApiError>;

    /// Create a room with the counterpart identified by email
    async fn create_room(&self, counterpart_email: &str) -> Result<ChatRoom, ApiError>;
}

//! HTTP implementation of the room directory API.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::common::config::ClientConfig;
use crate::domain::{ApiError, ChatRoom, DirectoryApi, RoomId};
use crate::infrastructure::dto::http::{CreateRoomRequestDto, RoomDetailDto, RoomSummaryDto};

/// REST client for the chat backend.
///
/// The authentication token travels in the `Authorization` header on every
/// request.
pub struct HttpDirectoryApi {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl HttpDirectoryApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            token: config.token.clone(),
        }
    }

    fn rooms_url(&self) -> String {
        format!("{}/chats/", self.api_base)
    }

    fn room_url(&self, room_id: &RoomId) -> String {
        format!("{}/chats/{}/", self.api_base, room_id.as_str())
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    fn check_status(status: StatusCode) -> Result<(), ApiError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
        let response = self
            .http
            .get(self.rooms_url())
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response.status())?;

        let summaries: Vec<RoomSummaryDto> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        summaries
            .into_iter()
            .map(|dto| ChatRoom::try_from(dto).map_err(|e| ApiError::Decode(e.to_string())))
            .collect()
    }

    async fn room_detail(&self, room_id: &RoomId) -> Result<ChatRoom, ApiError> {
        let response = self
            .http
            .get(self.room_url(room_id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response.status())?;

        let detail: RoomDetailDto = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        ChatRoom::try_from(detail).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_room(&self, counterpart_email: &str) -> Result<ChatRoom, ApiError> {
        let body = CreateRoomRequestDto {
            second_participant: counterpart_email.to_string(),
        };

        let response = self
            .http
            .post(self.rooms_url())
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response.status())?;

        let detail: RoomDetailDto = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        ChatRoom::try_from(detail).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api() -> HttpDirectoryApi {
        let config = ClientConfig::new(
            "http://localhost:8000/api/".to_string(),
            "ws://localhost:8000".to_string(),
            "secret".to_string(),
        );
        HttpDirectoryApi::new(&config)
    }

    #[test]
    fn test_rooms_url() {
        // given:
        let api = test_api();

        // when:
        let url = api.rooms_url();

        // then:
        assert_eq!(url, "http://localhost:8000/api/chats/");
    }

    #[test]
    fn test_room_url() {
        // given:
        let api = test_api();
        let room_id = RoomId::new("room-42".to_string()).unwrap();

        // when:
        let url = api.room_url(&room_id);

        // then:
        assert_eq!(url, "http://localhost:8000/api/chats/room-42/");
    }

    #[test]
    fn test_auth_header_carries_token() {
        // given:
        let api = test_api();

        // when:
        let header = api.auth_header();

        // then:
        assert_eq!(header, "Token secret");
    }

    #[test]
    fn test_check_status_accepts_success() {
        // given:

        // when:
        let result = HttpDirectoryApi::check_status(StatusCode::OK);

        // then:
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_status_rejects_server_error() {
        // given:

        // when:
        let result = HttpDirectoryApi::check_status(StatusCode::INTERNAL_SERVER_ERROR);

        // then:
        assert!(matches!(result, Err(ApiError::Status(500))));
    }
}

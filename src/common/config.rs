//! Client configuration assembled from command-line arguments.

/// Configuration for the chat client.
///
/// `api_base` and `ws_base` are stored without a trailing slash so URL
/// building can always join with a single `/`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend (e.g., "http://127.0.0.1:8000/api")
    pub api_base: String,
    /// Base URL of the realtime backend (e.g., "ws://127.0.0.1:8000")
    pub ws_base: String,
    /// Authentication token, sent as a header on REST calls and as a
    /// connection parameter on the realtime channel
    pub token: String,
}

impl ClientConfig {
    pub fn new(api_base: String, ws_base: String, token: String) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            ws_base: ws_base.trim_end_matches('/').to_string(),
            token,
        }
    }
}

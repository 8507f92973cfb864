//! API request and response types

use serde::{Deserialize, Serialize};

/// An inbound chat message, as relayed by the transport
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub user_id: i64,
    #[serde(default)]
    pub display_name: String,
    pub text: String,
}

/// The bot's answer to one message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Full reply text; empty when the bot stays silent
    pub reply: String,
    /// `reply` split into lines, for transports that send them separately
    pub lines: Vec<String>,
}

impl MessageResponse {
    pub fn new(reply: String) -> Self {
        let lines = reply.lines().map(String::from).collect();
        Self { reply, lines }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

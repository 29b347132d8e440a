//! Chat domain models.
//!
//! Wire types shared by the `/chat` endpoint and the response normalizer.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role label that marks a message as user-authored.
pub const USER_ROLE: &str = "user";

/// A single chat message as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Free-form role label. Only `"user"` is treated specially.
    pub role: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    /// Whether this message was authored by the user.
    pub fn is_user(&self) -> bool {
        self.role == USER_ROLE
    }
}

/// Body of `POST /chat`. Message order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Normalized reply returned to the client.
///
/// Both fields are always present on the wire: `assistantText` is a string
/// (possibly empty) and `actions` is a list (possibly empty). Actions are
/// opaque and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub assistant_text: String,
    pub actions: Vec<Value>,
}

impl AssistantResponse {
    /// A reply with text and no actions.
    pub fn text(assistant_text: impl Into<String>) -> Self {
        Self {
            assistant_text: assistant_text.into(),
            actions: Vec::new(),
        }
    }
}

//! Response normalization.
//!
//! The upstream generator is asked to answer with a JSON object of the form
//! `{ "assistantText": "...", "actions": [] }`, but nothing guarantees it
//! does. [`normalize`] turns whatever text came back into an
//! [`AssistantResponse`] and never fails.
//!
//! Classification and conversion are separate steps:
//!
//! 1. [`UpstreamReply::classify`] trims the text and applies the
//!    leading-brace heuristic: text not starting with `{` is prose, text that
//!    does is parsed as a JSON object, and a failed parse is kept as
//!    malformed.
//! 2. `From<UpstreamReply> for AssistantResponse` fills in defaults for each
//!    case.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::AssistantResponse;

/// Reply text used when the upstream produced nothing at all.
pub const FALLBACK_TEXT: &str = "Sorry, I couldn't understand.";

/// Fields of the object the upstream is instructed to produce. Either may
/// be missing; values are inspected only during conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredReply {
    pub assistant_text: Option<Value>,
    pub actions: Option<Value>,
}

impl From<Map<String, Value>> for StructuredReply {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            assistant_text: object.remove("assistantText"),
            actions: object.remove("actions"),
        }
    }
}

/// Classified upstream output.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// Trimmed text that does not start with `{`. May be empty.
    Prose(String),
    /// Text that parsed as a JSON object.
    Structured(StructuredReply),
    /// Trimmed text that starts with `{` but is not a valid JSON object.
    Malformed(String),
}

impl UpstreamReply {
    /// Classifies raw upstream text.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.starts_with('{') {
            return UpstreamReply::Prose(trimmed.to_string());
        }
        // Parsed as a map so duplicate keys resolve to the last value.
        match serde_json::from_str::<Map<String, Value>>(trimmed) {
            Ok(object) => UpstreamReply::Structured(object.into()),
            Err(e) => {
                debug!(error = %e, "upstream reply looked like JSON but failed to parse");
                UpstreamReply::Malformed(trimmed.to_string())
            }
        }
    }
}

impl From<UpstreamReply> for AssistantResponse {
    fn from(reply: UpstreamReply) -> Self {
        match reply {
            UpstreamReply::Prose(text) if text.is_empty() => AssistantResponse::text(FALLBACK_TEXT),
            UpstreamReply::Prose(text) | UpstreamReply::Malformed(text) => {
                AssistantResponse::text(text)
            }
            UpstreamReply::Structured(reply) => AssistantResponse {
                assistant_text: text_field(reply.assistant_text),
                actions: actions_field(reply.actions),
            },
        }
    }
}

/// `null` and absent become empty; non-string values keep their JSON text.
fn text_field(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

/// Only a JSON array survives; anything else is an empty list.
fn actions_field(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(actions)) => actions,
        _ => Vec::new(),
    }
}

/// Normalizes raw upstream text into the client-facing response.
pub fn normalize(raw: &str) -> AssistantResponse {
    UpstreamReply::classify(raw).into()
}

//! Prompt synthesis for the upstream generator.

use crate::models::ChatMessage;

/// Instructions prepended to every upstream prompt.
pub const SYSTEM_PROMPT: &str = "You are Gideon, an AI assistant and organizer.\n\
You help with calendar events and reminders.\n\
Reply concisely.\n\
\n\
Return JSON ONLY in this format:\n\
{ \"assistantText\": \"...\", \"actions\": [] }\n\
Do not include markdown or extra text.\n";

/// Separator between the instructions and the user's text.
const USER_SECTION: &str = "\nUser:\n";

/// Joins the texts of user-authored messages, in order, one per line.
///
/// The result is trimmed. Messages with any other role are ignored.
pub fn user_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.is_user())
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Builds the full prompt sent upstream.
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    format!("{SYSTEM_PROMPT}{USER_SECTION}{}", user_text(messages))
}

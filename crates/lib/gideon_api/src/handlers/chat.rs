//! Chat request handler — relays the conversation to Gemini.

use axum::Json;
use axum::extract::State;
use gideon_core::models::{AssistantResponse, ChatRequest};
use gideon_core::{normalize, prompt};
use tracing::{info, warn};

use crate::AppState;
use crate::config::UpstreamFailurePolicy;
use crate::error::AppResult;

/// Reply when no API key is configured.
pub const MISSING_KEY_TEXT: &str = "Server missing GEMINI_API_KEY.";

/// Reply when the upstream call fails and the fallback policy is active.
pub const UPSTREAM_UNAVAILABLE_TEXT: &str = "Sorry, the assistant is unavailable right now.";

/// `POST /chat` — builds a prompt from the user's messages, asks Gemini, and
/// returns the normalized reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<AssistantResponse>> {
    let Some(client) = state.gemini.as_ref() else {
        warn!("chat requested but no Gemini API key is configured");
        return Ok(Json(AssistantResponse::text(MISSING_KEY_TEXT)));
    };

    let prompt = prompt::build_prompt(&req.messages);

    let raw = match client.generate_text(&prompt).await {
        Ok(raw) => raw,
        Err(e) => match state.config.upstream_failure {
            UpstreamFailurePolicy::Propagate => {
                warn!(error = %e, "upstream call failed");
                return Err(e.into());
            }
            UpstreamFailurePolicy::Fallback => {
                warn!(error = %e, "upstream call failed, answering with fallback");
                return Ok(Json(AssistantResponse::text(UPSTREAM_UNAVAILABLE_TEXT)));
            }
        },
    };

    let resp = normalize::normalize(&raw);
    info!(
        messages = req.messages.len(),
        actions = resp.actions.len(),
        "chat reply ready"
    );
    Ok(Json(resp))
}

//! # gideon_api
//!
//! HTTP API library for Gideon.

pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::{get, post};
use gideon_core::gemini::{GeminiClient, GeminiError};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

/// Route paths.
pub mod routes {
    pub const POST_CHAT: &str = "/chat";
    pub const GET_HEALTH: &str = "/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Upstream client, present only when an API key is configured.
    pub gemini: Option<GeminiClient>,
}

impl AppState {
    /// Builds state from config, constructing the upstream client once.
    pub fn new(config: ApiConfig) -> Result<Self, GeminiError> {
        let gemini = config.gemini.clone().map(GeminiClient::new).transpose()?;
        Ok(Self { config, gemini })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .layer(cors)
        .with_state(state)
}

//! API server configuration.

use gideon_core::gemini::GeminiConfig;

/// What `/chat` does when the upstream call itself fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpstreamFailurePolicy {
    /// Surface the failure as `502 Bad Gateway` with an error body.
    #[default]
    Propagate,
    /// Answer `200` with a fixed assistant message.
    Fallback,
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// Upstream settings. `None` when no API key is configured.
    pub gemini: Option<GeminiConfig>,
    pub upstream_failure: UpstreamFailurePolicy,
}

//! Gideon chat relay server binary.
//!
//! Serves `POST /chat` and `GET /health`. Configuration comes from CLI flags
//! with environment fallbacks; a `.env` file in the working directory is
//! loaded first.

use std::time::Duration;

use clap::Parser;
use gideon_api::config::{ApiConfig, UpstreamFailurePolicy};
use gideon_core::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "gideon_server", about = "Gideon chat relay server", version)]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Gemini API key. Without it `/chat` answers with a configuration notice.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    gemini_model: String,

    /// Gemini API base URL.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,

    /// Answer with a fixed message instead of 502 when the upstream call fails.
    #[arg(long, env = "UPSTREAM_FALLBACK", default_value_t = false)]
    upstream_fallback: bool,
}

impl Args {
    fn into_config(self) -> ApiConfig {
        let gemini =
            GeminiConfig::from_api_key(self.gemini_api_key.as_deref()).map(|mut cfg| {
                cfg.model = self.gemini_model;
                cfg.base_url = self.gemini_base_url;
                cfg.timeout = Duration::from_secs(self.timeout_secs);
                cfg
            });

        ApiConfig {
            bind_addr: format!("{}:{}", self.host, self.port),
            gemini,
            upstream_failure: if self.upstream_fallback {
                UpstreamFailurePolicy::Fallback
            } else {
                UpstreamFailurePolicy::Propagate
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new("info,gideon_api=debug,gideon_core=debug")
    })?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Args::parse().into_config();

    match &config.gemini {
        Some(gemini) => info!(
            model = %gemini.model,
            base_url = %gemini.base_url,
            timeout_secs = gemini.timeout.as_secs(),
            "Gemini upstream configured"
        ),
        None => warn!("GEMINI_API_KEY is not set; /chat will answer with a configuration notice"),
    }
    info!(policy = ?config.upstream_failure, "upstream failure policy");

    let bind_addr = config.bind_addr.clone();
    let state = gideon_api::AppState::new(config)?;
    let app = gideon_api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_key() {
        let args = Args::try_parse_from(["gideon_server", "--gemini-api-key", ""]).unwrap();
        let config = args.into_config();
        assert!(config.gemini.is_none());
        assert_eq!(config.upstream_failure, UpstreamFailurePolicy::Propagate);
    }

    #[test]
    fn flags_populate_gemini_config() {
        let args = Args::try_parse_from([
            "gideon_server",
            "--port",
            "9100",
            "--gemini-api-key",
            "abc",
            "--gemini-model",
            "gemini-2.0-flash",
            "--timeout-secs",
            "5",
            "--upstream-fallback",
        ])
        .unwrap();
        let config = args.into_config();
        assert!(config.bind_addr.ends_with(":9100"));
        assert_eq!(config.upstream_failure, UpstreamFailurePolicy::Fallback);
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "abc");
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.timeout, Duration::from_secs(5));
    }
}

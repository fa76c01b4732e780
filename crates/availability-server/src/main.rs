//! `availapi` - HTTP service for common meeting slot resolution.
//!
//! Configuration comes from the environment (a `.env` file is honoured):
//! `AVAILAPI_ADDR`, `CALENDARIFIC_API_KEY`, `CALENDARIFIC_BASE_URL`,
//! `HOLIDAY_TIMEOUT_SECS`, `HOLIDAY_CACHE_TTL_SECS`. Log verbosity follows `RUST_LOG`.

use anyhow::{Context, Result};
use availability_engine::SlotResolver;
use availability_server::{create_router, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env()?;
    if config.engine.api_key.is_empty() {
        warn!("CALENDARIFIC_API_KEY is not set; holiday lookups will be rejected upstream");
    }

    let resolver = SlotResolver::from_config(&config.engine)
        .context("Failed to build the holiday directory client")?;
    let app = create_router(resolver);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!(addr = %config.addr, "availapi listening");
    axum::serve(listener, app).await?;

    Ok(())
}

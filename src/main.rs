use anyhow::Context;
use tracing::{Level, info, warn};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};
use valuation_client::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine: the environment may already be populated.
    let dotenv = dotenvy::dotenv();

    let filter = telemetry::env_filter_with_level("warn", Level::INFO)
        .context("invalid RUST_LOG filter")?;

    tracing_subscriber::registry()
        .with(telemetry::layer().with_filter(filter))
        .try_init()
        .context("setting default subscriber failed")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    api::start().await.context("api server failed")?;

    Ok(())
}

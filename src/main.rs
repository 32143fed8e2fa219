use std::error::Error;

use completion_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from a .env file, if one is present.
    dotenvy::dotenv().ok();

    // Global INFO logging, DEBUG for the completion client. Events from the
    // completion crate are rendered by its own layer (with timings), so the
    // global layer excludes them to avoid double output.
    let filter = telemetry::env_filter_with_level("info", Level::DEBUG);
    let global_fmt = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(global_fmt)
        .with(telemetry::layer())
        .init();

    api::start().await?;

    Ok(())
}

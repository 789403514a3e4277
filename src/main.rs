//! bestsellers - weekly bestseller list pipeline.
//!
//! Fetches list-overview snapshots from the books API, models them into a
//! star schema in SQLite and exports analytical reports.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "bestseller_pipeline=info,bestsellers=info"
    } else {
        "bestseller_pipeline=warn,bestsellers=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run().await
}

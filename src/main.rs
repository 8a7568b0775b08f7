mod config;
mod error;
mod format;
mod models;
mod run;
mod storage;
mod store;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let storage_path = config.storage_path()?;
    let storage = storage::LocalStorage::open(&storage_path)
        .with_context(|| format!("Failed to open {}", storage_path.display()))?;

    run::as_cli(&args, &config, &storage)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BILLED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("BILLED_LOG_JSON").is_ok_and(|v| !v.is_empty() && v != "0");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

mod api;
mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{ApiClient, HttpTransport};
use crate::config::AdminConfig;

fn main() -> anyhow::Result<()> {
    // Logging needs the configured filter, so a bad config is reported once tracing is up.
    let (config, config_error) = match AdminConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AdminConfig::default(), Some(err)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(err) = config_error {
        warn!(error = %err, "invalid configuration, falling back to defaults");
    }
    info!(
        api = %config.api_base_url,
        workers = config.worker_threads,
        "starting freddie admin"
    );

    let transport = HttpTransport::new(&config.api_base_url, config.request_timeout())
        .context("failed to initialise HTTP client")?;
    app::run(config, ApiClient::new(transport))
        .map_err(|err| anyhow::anyhow!("UI terminated with an error: {err}"))
}

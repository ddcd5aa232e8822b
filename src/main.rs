use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use depbrief::api::AppState;
use depbrief::config::DepbriefConfig;
use depbrief::dataset::Dataset;
use depbrief::prefs::PrefStore;
use depbrief::watch::WatchPoller;
use depbrief::weather::HttpMetarSource;
use depbrief::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DepbriefConfig::load().context("configuration failed to load")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    info!("depbrief {} starting", depbrief::VERSION);

    // Every table must load before anything serves; a missing table is
    // fatal here rather than a degraded session later.
    let dataset = Arc::new(
        Dataset::load(&config.data.dir)
            .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?,
    );

    let prefs = Arc::new(
        PrefStore::open(expand_home(&config.prefs.location))
            .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?,
    );

    let source = Arc::new(HttpMetarSource::new(&config.weather)?);
    let poller = Arc::new(WatchPoller::new(source, config.weather.fetch_concurrency));

    let watchlist = prefs.weather_watchlist().await;
    info!("polling {} watchlist stations", watchlist.len());
    tokio::spawn(Arc::clone(&poller).run(
        watchlist,
        Duration::from_secs(config.weather.poll_interval_seconds),
    ));

    let state = Arc::new(AppState {
        dataset,
        poller,
        prefs,
    });
    web::run(state, config.server.port).await;

    Ok(())
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

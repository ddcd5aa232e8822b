//! METAR text feed access
//!
//! The feed is a plain-text endpoint keyed by station identifier. A
//! response may hold several lines; the line whose first token equals the
//! requested station wins, falling back to the first line, falling back to
//! a synthesized placeholder.

use crate::config::WeatherConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use tracing::{debug, instrument};

/// Placeholder for a station with no report on the feed
pub const NO_REPORT: &str = "(no report)";

/// Abstraction over the report feed, so pollers can run against scripted
/// sources in tests.
#[async_trait]
pub trait MetarSource: Send + Sync {
    /// Fetch the raw response text for one station.
    async fn fetch_raw(&self, station: &str) -> Result<String>;
}

/// Pick the report line for a station out of a feed response.
#[must_use]
pub fn select_station_line(response: &str, station: &str) -> String {
    let station = station.trim().to_uppercase();
    let lines: Vec<&str> = response
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    lines
        .iter()
        .find(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|token| token.eq_ignore_ascii_case(&station))
        })
        .or_else(|| lines.first())
        .map_or_else(|| NO_REPORT.to_string(), ToString::to_string)
}

/// HTTP implementation of [`MetarSource`] with timeout and retry middleware.
pub struct HttpMetarSource {
    client: ClientWithMiddleware,
    base_url: String,
}

impl HttpMetarSource {
    /// Build the feed client from the weather configuration.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("depbrief/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl MetarSource for HttpMetarSource {
    #[instrument(skip(self))]
    async fn fetch_raw(&self, station: &str) -> Result<String> {
        let url = format!(
            "{}?id={}",
            self.base_url,
            urlencoding::encode(station.trim())
        );
        debug!("Fetching METAR from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("METAR request for {station} failed"))?;
        let response = response
            .error_for_status()
            .with_context(|| format!("METAR feed rejected request for {station}"))?;

        response
            .text()
            .await
            .with_context(|| format!("METAR response for {station} was not text"))
    }
}

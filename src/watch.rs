//! Watchlist weather polling
//!
//! A batch poll fans the watchlist out over a fixed pool of workers that
//! pull indices from a shared cursor and write into pre-sized slots, so the
//! published board is always in watchlist order no matter which fetches
//! finish first. One station failing degrades to an inline placeholder for
//! that slot only.
//!
//! Batches are generation-tagged: a batch publishes only while no newer
//! batch has published, so a slow straggler from a previous interval can
//! never overwrite fresher data.

use crate::weather::{FlightCategory, MetarSource, NO_REPORT, flight_category, select_station_line};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder shown for a station whose fetch failed
pub const UNAVAILABLE: &str = "(unavailable)";

/// One watchlist station's latest state.
#[derive(Debug, Clone, Serialize)]
pub struct StationReport {
    /// Station identifier
    pub station: String,
    /// Report line, or a placeholder when missing/unavailable
    pub raw: String,
    /// Flight category derived from the report
    pub category: FlightCategory,
    /// Fetch error for this station, when the slot degraded
    pub error: Option<String>,
    /// When this slot was produced
    pub fetched_at: DateTime<Utc>,
}

/// The published weather board: watchlist-ordered station reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherBoard {
    pub reports: Vec<StationReport>,
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Periodic watchlist poller over a [`MetarSource`].
pub struct WatchPoller {
    source: Arc<dyn MetarSource>,
    concurrency: usize,
    board: Mutex<WeatherBoard>,
    next_generation: AtomicU64,
}

impl WatchPoller {
    #[must_use]
    pub fn new(source: Arc<dyn MetarSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
            board: Mutex::new(WeatherBoard::default()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the currently published board.
    #[must_use]
    pub fn board(&self) -> WeatherBoard {
        self.board
            .lock()
            .map(|board| board.clone())
            .unwrap_or_default()
    }

    /// Reserve the generation number for a batch about to start.
    fn begin_batch(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish a completed batch. Returns false (and drops the batch) when
    /// a newer generation has already published.
    fn publish(&self, generation: u64, reports: Vec<StationReport>) -> bool {
        let Ok(mut board) = self.board.lock() else {
            warn!("weather board lock poisoned; dropping batch {generation}");
            return false;
        };
        if board.generation >= generation {
            debug!(
                "dropping stale weather batch {generation} (board at {})",
                board.generation
            );
            return false;
        }
        *board = WeatherBoard {
            reports,
            generation,
            updated_at: Some(Utc::now()),
        };
        true
    }

    /// Fetch every watchlist station once through the worker pool.
    /// The returned vector is in watchlist order.
    pub async fn fetch_batch(&self, stations: &[String]) -> Vec<StationReport> {
        let stations: Arc<Vec<String>> = Arc::new(stations.to_vec());
        let cursor = Arc::new(AtomicUsize::new(0));
        let slots: Arc<Vec<Mutex<Option<StationReport>>>> =
            Arc::new(stations.iter().map(|_| Mutex::new(None)).collect());

        let workers: Vec<_> = (0..self.concurrency.min(stations.len()))
            .map(|_| {
                let source = Arc::clone(&self.source);
                let stations = Arc::clone(&stations);
                let cursor = Arc::clone(&cursor);
                let slots = Arc::clone(&slots);
                tokio::spawn(async move {
                    loop {
                        let i = cursor.fetch_add(1, Ordering::SeqCst);
                        let Some(station) = stations.get(i) else {
                            break;
                        };
                        let report = fetch_station(source.as_ref(), station).await;
                        if let Ok(mut slot) = slots[i].lock() {
                            *slot = Some(report);
                        }
                    }
                })
            })
            .collect();

        join_all(workers).await;

        stations
            .iter()
            .zip(slots.iter())
            .map(|(station, slot)| {
                slot.lock()
                    .ok()
                    .and_then(|mut s| s.take())
                    .unwrap_or_else(|| unavailable(station, "worker did not fill slot"))
            })
            .collect()
    }

    /// Run one generation-tagged batch; returns whether it published.
    pub async fn poll_once(&self, stations: &[String]) -> bool {
        let generation = self.begin_batch();
        debug!("weather batch {generation}: polling {} stations", stations.len());
        let reports = self.fetch_batch(stations).await;
        self.publish(generation, reports)
    }

    /// Poll forever at a fixed interval. Each batch runs as its own task,
    /// so a slow batch never delays the next tick; the generation gate
    /// handles the overlap.
    pub async fn run(self: Arc<Self>, stations: Vec<String>, every: Duration) {
        let stations = Arc::new(stations);
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let poller = Arc::clone(&self);
            let stations = Arc::clone(&stations);
            tokio::spawn(async move {
                poller.poll_once(&stations).await;
            });
        }
    }
}

async fn fetch_station(source: &dyn MetarSource, station: &str) -> StationReport {
    match source.fetch_raw(station).await {
        Ok(text) => {
            let raw = select_station_line(&text, station);
            let category = if raw == NO_REPORT {
                FlightCategory::Undetermined
            } else {
                flight_category(&raw)
            };
            StationReport {
                station: station.to_uppercase(),
                raw,
                category,
                error: None,
                fetched_at: Utc::now(),
            }
        }
        Err(e) => {
            warn!("METAR fetch for {station} failed: {e:#}");
            unavailable(station, &format!("{e:#}"))
        }
    }
}

fn unavailable(station: &str, error: &str) -> StationReport {
    StationReport {
        station: station.to_uppercase(),
        raw: UNAVAILABLE.to_string(),
        category: FlightCategory::Undetermined,
        error: Some(error.to_string()),
        fetched_at: Utc::now(),
    }
}

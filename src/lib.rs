//! `DepBrief` - LaGuardia departure briefing service
//!
//! This library provides the core functionality for departure-procedure
//! resolution, reference-data lookup, and METAR-driven runway
//! configuration suggestions.

pub mod api;
pub mod config;
pub mod dataset;
pub mod departure;
pub mod error;
pub mod geo;
pub mod index;
pub mod models;
pub mod prefs;
pub mod routes;
pub mod tsv;
pub mod watch;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DepbriefConfig;
pub use dataset::{Dataset, Resolution};
pub use departure::{Selections, climb_instruction, pick_departure_rule};
pub use error::DepbriefError;
pub use index::{ReferenceIndex, SearchHit};
pub use models::{AirportRecord, DepartureRule, NavaidRecord, RouteRow};
pub use watch::{StationReport, WatchPoller, WeatherBoard};
pub use weather::{FlightCategory, MetarSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DepbriefError>;

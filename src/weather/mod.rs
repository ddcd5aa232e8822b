//! METAR parsing and weather-driven configuration inference
//!
//! This module provides the weather side of the briefing:
//! - Component parsing of raw METAR lines (visibility, ceiling, wind)
//! - Flight-category classification from fixed ceiling/visibility bands
//! - Wind-driven runway-configuration suggestion per airport

pub mod metar;
pub mod runway;
pub mod source;

pub use metar::{FlightCategory, Wind, flight_category, parse_ceiling_ft, parse_visibility_sm, parse_wind};
pub use runway::{jfk_runway_config, lga_runway_config};
pub use source::{HttpMetarSource, MetarSource, NO_REPORT, select_station_line};

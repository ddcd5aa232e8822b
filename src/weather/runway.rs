//! Wind-driven runway-configuration suggestion
//!
//! Each airport's published flow preferences are encoded as an ordered
//! mapping table: wind-direction sector (wrap-aware), speed band, and at
//! LGA an instrument-conditions flag, to a configuration label.
//! The first matching row wins; calm or variable wind short-circuits to
//! the airport's default configuration. The tables are the contract:
//! every boundary is pinned by a test.

use crate::weather::metar::Wind;

/// At or below this sustained speed the wind is treated as calm.
pub const CALM_WIND_MAX_KT: f64 = 4.0;

/// Default configuration for calm/variable wind at LGA
pub const LGA_CALM_CONFIG: &str = "DEP 13 | ARR 22";

/// Default configuration for calm/variable wind at JFK
pub const JFK_CALM_CONFIG: &str = "DEP 31L | ARR 31R";

/// One row of a configuration table.
struct SectorRule {
    /// Sector start in degrees, inclusive
    from_deg: u16,
    /// Sector end in degrees, inclusive; wraps through north when < from
    to_deg: u16,
    /// Speed band in knots, inclusive
    min_kt: u16,
    max_kt: u16,
    /// When set, the row applies only under that instrument-conditions flag
    instrument: Option<bool>,
    /// Suggested configuration label
    config: &'static str,
}

const LGA_TABLE: &[SectorRule] = &[
    // Northeast flow
    SectorRule { from_deg: 350, to_deg: 79, min_kt: 0, max_kt: 99, instrument: Some(true), config: "DEP 4 | ARR ILS 4" },
    SectorRule { from_deg: 350, to_deg: 79, min_kt: 0, max_kt: 99, instrument: Some(false), config: "DEP 4 | ARR 4" },
    // Southeast flow
    SectorRule { from_deg: 80, to_deg: 169, min_kt: 0, max_kt: 99, instrument: Some(true), config: "DEP 13 | ARR RNAV 13" },
    SectorRule { from_deg: 80, to_deg: 169, min_kt: 0, max_kt: 99, instrument: Some(false), config: "DEP 13 | ARR 13" },
    // Southwest flow: the crosswind on 13 forces 22 departures once the
    // wind picks up
    SectorRule { from_deg: 170, to_deg: 259, min_kt: 15, max_kt: 99, instrument: None, config: "DEP 22 | ARR 22" },
    SectorRule { from_deg: 170, to_deg: 259, min_kt: 0, max_kt: 14, instrument: Some(true), config: "DEP 13 | ARR ILS 22" },
    SectorRule { from_deg: 170, to_deg: 259, min_kt: 0, max_kt: 14, instrument: Some(false), config: "DEP 13 | ARR 22" },
    // Northwest flow
    SectorRule { from_deg: 260, to_deg: 349, min_kt: 0, max_kt: 99, instrument: Some(true), config: "DEP 31 | ARR LOC 31" },
    SectorRule { from_deg: 260, to_deg: 349, min_kt: 0, max_kt: 99, instrument: Some(false), config: "DEP 31 | ARR 31" },
];

const JFK_TABLE: &[SectorRule] = &[
    // Northeast flow, single-runway ops in strong wind
    SectorRule { from_deg: 15, to_deg: 104, min_kt: 25, max_kt: 99, instrument: None, config: "DEP 4L | ARR 4L" },
    SectorRule { from_deg: 15, to_deg: 104, min_kt: 0, max_kt: 24, instrument: None, config: "DEP 4L | ARR 4R" },
    // Southeast flow
    SectorRule { from_deg: 105, to_deg: 194, min_kt: 0, max_kt: 99, instrument: None, config: "DEP 13R | ARR 13L" },
    // Southwest flow
    SectorRule { from_deg: 195, to_deg: 284, min_kt: 0, max_kt: 99, instrument: None, config: "DEP 22R | ARR 22L" },
    // Northwest flow, single-runway ops in strong wind
    SectorRule { from_deg: 285, to_deg: 14, min_kt: 25, max_kt: 99, instrument: None, config: "DEP 31L | ARR 31L" },
    SectorRule { from_deg: 285, to_deg: 14, min_kt: 0, max_kt: 24, instrument: None, config: "DEP 31L | ARR 31R" },
];

/// Wrap-aware inclusive sector containment.
fn in_sector(direction_deg: u16, from_deg: u16, to_deg: u16) -> bool {
    let d = direction_deg % 360;
    if from_deg <= to_deg {
        d >= from_deg && d <= to_deg
    } else {
        d >= from_deg || d <= to_deg
    }
}

fn lookup(
    table: &[SectorRule],
    wind: &Wind,
    instrument: Option<bool>,
    calm_config: &'static str,
) -> &'static str {
    if !(wind.speed_kt > CALM_WIND_MAX_KT) {
        return calm_config;
    }
    let Some(direction) = wind.direction_deg() else {
        // VRB or unparseable direction
        return calm_config;
    };
    let speed = wind.speed_kt.round() as u16;

    table
        .iter()
        .find(|rule| {
            in_sector(direction, rule.from_deg, rule.to_deg)
                && speed >= rule.min_kt
                && speed <= rule.max_kt
                && rule.instrument.is_none_or(|imc| Some(imc) == instrument)
        })
        .map_or(calm_config, |rule| rule.config)
}

/// Suggested LGA configuration for the given wind and instrument flag.
#[must_use]
pub fn lga_runway_config(wind: &Wind, instrument_conditions: bool) -> &'static str {
    lookup(LGA_TABLE, wind, Some(instrument_conditions), LGA_CALM_CONFIG)
}

/// Suggested JFK configuration for the given wind.
#[must_use]
pub fn jfk_runway_config(wind: &Wind) -> &'static str {
    lookup(JFK_TABLE, wind, None, JFK_CALM_CONFIG)
}

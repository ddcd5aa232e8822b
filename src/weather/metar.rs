//! METAR component parsing and flight-category classification
//!
//! Parsers are per-field and never abort the surrounding computation:
//! a malformed component degrades to NaN (visibility, wind speed), an
//! empty direction, or an unlimited ceiling.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Visibility group: optional whole part, then a whole number or fraction,
/// immediately before "SM" (e.g. "10SM", "1/2SM", "2 1/2SM").
static VISIBILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:(\d+)\s+)?(\d+)(?:/(\d+))?SM").expect("visibility pattern"));

/// Ceiling-forming cloud layers: BKN/OVC/VV plus height in hundreds of feet.
static CLOUD_LAYER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:BKN|OVC|VV)(\d{3})").expect("cloud layer pattern"));

/// Wind group: 3-digit direction or VRB, 2-3 digit speed, optional gust.
static WIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?KT").expect("wind pattern"));

/// Parsed wind components of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    /// Direction as reported: "040", "VRB", or empty when absent
    pub direction: String,
    /// Sustained speed in knots; NaN when the wind group is absent
    pub speed_kt: f64,
    /// Gust speed in knots, when reported
    pub gust_kt: Option<f64>,
}

impl Wind {
    /// Wind with no parseable group
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            direction: String::new(),
            speed_kt: f64::NAN,
            gust_kt: None,
        }
    }

    /// Direction in degrees, when reported as a heading (not VRB/absent).
    #[must_use]
    pub fn direction_deg(&self) -> Option<u16> {
        self.direction.parse::<u16>().ok().map(|d| d % 360)
    }
}

/// Coarse ceiling/visibility classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightCategory {
    #[serde(rename = "LIFR")]
    Lifr,
    #[serde(rename = "IFR")]
    Ifr,
    #[serde(rename = "MVFR")]
    Mvfr,
    #[serde(rename = "VFR")]
    Vfr,
    /// Blank or missing report
    #[serde(rename = "—")]
    Undetermined,
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightCategory::Lifr => write!(f, "LIFR"),
            FlightCategory::Ifr => write!(f, "IFR"),
            FlightCategory::Mvfr => write!(f, "MVFR"),
            FlightCategory::Vfr => write!(f, "VFR"),
            FlightCategory::Undetermined => write!(f, "—"),
        }
    }
}

impl FlightCategory {
    /// True for IFR and LIFR: the instrument-conditions flag the LGA
    /// runway-configuration tree keys on.
    #[must_use]
    pub fn is_instrument(&self) -> bool {
        matches!(self, FlightCategory::Lifr | FlightCategory::Ifr)
    }
}

/// Prevailing visibility in statute miles; NaN when absent or malformed.
#[must_use]
pub fn parse_visibility_sm(report: &str) -> f64 {
    let Some(caps) = VISIBILITY.captures(report) else {
        return f64::NAN;
    };

    let whole: f64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    let numerator: f64 = match caps.get(2).and_then(|m| m.as_str().parse().ok()) {
        Some(n) => n,
        None => return f64::NAN,
    };

    match caps.get(3) {
        Some(denominator) => match denominator.as_str().parse::<f64>() {
            Ok(d) if d > 0.0 => whole + numerator / d,
            _ => f64::NAN,
        },
        None => whole + numerator,
    }
}

/// Ceiling in feet: the lowest BKN/OVC/VV layer. Positive infinity when no
/// ceiling-forming layer is reported.
#[must_use]
pub fn parse_ceiling_ft(report: &str) -> f64 {
    CLOUD_LAYER
        .captures_iter(report)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .map(|hundreds| hundreds * 100.0)
        .fold(f64::INFINITY, f64::min)
}

/// Wind components; [`Wind::unknown`] when the group is absent.
#[must_use]
pub fn parse_wind(report: &str) -> Wind {
    let Some(caps) = WIND.captures(report) else {
        return Wind::unknown();
    };

    Wind {
        direction: caps[1].to_string(),
        speed_kt: caps[2].parse().unwrap_or(f64::NAN),
        gust_kt: caps.get(3).and_then(|m| m.as_str().parse().ok()),
    }
}

/// Flight category from fixed ceiling/visibility bands. Upper bounds are
/// exclusive: ceiling exactly 500 ft is IFR, visibility exactly 3 SM is
/// MVFR. A blank report is undetermined, not an error.
#[must_use]
pub fn flight_category(report: &str) -> FlightCategory {
    if report.trim().is_empty() {
        return FlightCategory::Undetermined;
    }

    let ceiling = parse_ceiling_ft(report);
    let visibility = parse_visibility_sm(report);

    if ceiling < 500.0 || visibility < 1.0 {
        FlightCategory::Lifr
    } else if ceiling < 1000.0 || visibility < 3.0 {
        FlightCategory::Ifr
    } else if ceiling < 3000.0 || visibility < 5.0 {
        FlightCategory::Mvfr
    } else {
        FlightCategory::Vfr
    }
}

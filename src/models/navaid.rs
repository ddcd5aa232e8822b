//! Navaid row model and display methods

use crate::geo;
use crate::tsv::Record;
use serde::{Deserialize, Serialize};

/// A radio navigation aid from the navaid snapshot table.
///
/// Identifiers are not unique (distinct navaids worldwide share them), so
/// lookups always return a distance-ordered group.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NavaidRecord {
    /// Station identifier (e.g. "LGA")
    pub ident: String,
    /// Full station name
    pub name: String,
    /// Category string (VOR, NDB, ...)
    pub kind: String,
    /// Raw frequency field; kHz integer or an MHz-scale integer
    pub frequency: String,
    /// Latitude in decimal degrees, if present and numeric
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, if present and numeric
    pub longitude: Option<f64>,
    /// Great-circle distance from KLGA in NM; infinite when position unknown
    pub distance_nm: f64,
}

impl NavaidRecord {
    /// Build a navaid from a snapshot record. Returns `None` when the
    /// identifier is empty after trimming.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let ident = record.field("IDENT").trim().to_uppercase();
        if ident.is_empty() {
            return None;
        }

        let latitude = record.field("LAT").parse::<f64>().ok();
        let longitude = record.field("LON").parse::<f64>().ok();
        let distance_nm = match (latitude, longitude) {
            (Some(lat), Some(lon)) => geo::distance_from_klga_nm(lat, lon),
            _ => f64::INFINITY,
        };

        Some(Self {
            ident,
            name: record.field("NAME").to_string(),
            kind: record.field("TYPE").to_string(),
            frequency: record.field("FREQ").to_string(),
            latitude,
            longitude,
            distance_nm,
        })
    }

    /// True when the record carried a usable position.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.distance_nm.is_finite()
    }

    /// Frequency for display: MHz-scale integers become "NNN.NN MHz",
    /// other integers "NNN kHz", non-numeric values pass through verbatim.
    #[must_use]
    pub fn format_frequency(&self) -> String {
        let raw = self.frequency.trim();
        if raw.is_empty() {
            return "(unknown)".to_string();
        }
        match raw.parse::<i64>() {
            Ok(value) if value >= 100_000 => format!("{:.2} MHz", value as f64 / 1000.0),
            Ok(value) => format!("{value} kHz"),
            Err(_) => raw.to_string(),
        }
    }

    /// Distance for display; records without a position show "(unknown)".
    #[must_use]
    pub fn format_distance(&self) -> String {
        if self.has_position() {
            format!("{:.1} NM", self.distance_nm)
        } else {
            "(unknown)".to_string()
        }
    }

    /// Uppercase key the unified search scans: ident + name + type.
    #[must_use]
    pub fn search_key(&self) -> String {
        format!("{} {} {}", self.ident, self.name, self.kind).to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsv::SnapshotTable;

    fn parse_one(line: &str) -> Option<NavaidRecord> {
        let text = format!("IDENT\tNAME\tTYPE\tFREQ\tLAT\tLON\n{line}\n");
        let table = SnapshotTable::parse("navaids", &text).unwrap();
        let record = table.records().next().unwrap();
        NavaidRecord::from_record(&record)
    }

    #[test]
    fn test_mhz_scale_frequency() {
        let navaid = parse_one("LGA\tLa Guardia\tVOR\t113100\t40.78\t-73.87").unwrap();
        assert_eq!(navaid.format_frequency(), "113.10 MHz");
    }

    #[test]
    fn test_khz_frequency() {
        let navaid = parse_one("BR\tBridgeport\tNDB\t370\t41.16\t-73.12").unwrap();
        assert_eq!(navaid.format_frequency(), "370 kHz");
    }

    #[test]
    fn test_non_numeric_frequency_verbatim() {
        let navaid = parse_one("XYZ\tSomewhere\tVOR\tU/S\t40.0\t-73.0").unwrap();
        assert_eq!(navaid.format_frequency(), "U/S");
    }

    #[test]
    fn test_empty_frequency_unknown() {
        let navaid = parse_one("XYZ\tSomewhere\tVOR\t\t40.0\t-73.0").unwrap();
        assert_eq!(navaid.format_frequency(), "(unknown)");
    }

    #[test]
    fn test_missing_position_sorts_infinite() {
        let navaid = parse_one("ABC\tNo Fix\tNDB\t201\t\t").unwrap();
        assert!(!navaid.has_position());
        assert!(navaid.distance_nm.is_infinite());
        assert_eq!(navaid.format_distance(), "(unknown)");
    }

    #[test]
    fn test_malformed_latitude_treated_as_missing() {
        let navaid = parse_one("ABC\tBad Fix\tNDB\t201\tnorth\t-73.0").unwrap();
        assert!(!navaid.has_position());
    }

    #[test]
    fn test_empty_ident_skipped() {
        assert!(parse_one("\tNameless\tVOR\t113100\t40.0\t-73.0").is_none());
    }

    #[test]
    fn test_search_key_uppercased() {
        let navaid = parse_one("lga\tLa Guardia\tvor\t113100\t40.78\t-73.87").unwrap();
        assert_eq!(navaid.search_key(), "LGA LA GUARDIA VOR");
    }
}

//! Airport row model

use crate::tsv::Record;
use serde::{Deserialize, Serialize};

/// Fixed literal appended to every airport search key so generic category
/// queries ("airport", "apt", "heliport") surface all airports.
const CATEGORY_WORDS: &str = "AIRPORT APT HELIPORT";

/// An airport from the airport snapshot table. No positional data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AirportRecord {
    /// Airport identifier (e.g. "KLGA"); treated as a unique key
    pub ident: String,
    /// Airport name
    pub name: String,
}

impl AirportRecord {
    /// Build an airport from a snapshot record. Returns `None` when the
    /// identifier is empty after trimming.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let ident = record.field("IDENT").trim().to_uppercase();
        if ident.is_empty() {
            return None;
        }
        Some(Self {
            ident,
            name: record.field("NAME").to_string(),
        })
    }

    /// Uppercase key the unified search scans: ident + name + category words.
    #[must_use]
    pub fn search_key(&self) -> String {
        format!("{} {} {CATEGORY_WORDS}", self.ident, self.name.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsv::SnapshotTable;

    #[test]
    fn test_from_record() {
        let table = SnapshotTable::parse("airports", "IDENT\tNAME\nklga\tLa Guardia\n").unwrap();
        let record = table.records().next().unwrap();
        let airport = AirportRecord::from_record(&record).unwrap();
        assert_eq!(airport.ident, "KLGA");
        assert_eq!(airport.name, "La Guardia");
    }

    #[test]
    fn test_search_key_carries_category_words() {
        let airport = AirportRecord {
            ident: "KJFK".to_string(),
            name: "Kennedy Intl".to_string(),
        };
        let key = airport.search_key();
        assert!(key.contains("KJFK"));
        assert!(key.contains("KENNEDY INTL"));
        assert!(key.contains("HELIPORT"));
    }

    #[test]
    fn test_empty_ident_skipped() {
        let table = SnapshotTable::parse("airports", "IDENT\tNAME\n\tNameless\n").unwrap();
        let record = table.records().next().unwrap();
        assert!(AirportRecord::from_record(&record).is_none());
    }
}

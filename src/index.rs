//! Reference index over the navaid and airport snapshots
//!
//! Built once at load time and published immutably; every query side gets
//! the index by reference rather than through ambient globals.

use crate::models::{AirportRecord, NavaidRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Unified search never returns more hits than this.
pub const SEARCH_RESULT_CAP: usize = 50;

/// One hit from the unified reference search.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchHit {
    Navaid(NavaidRecord),
    Airport(AirportRecord),
}

#[derive(Debug)]
struct SearchEntry<T> {
    key: String,
    record: T,
}

/// Identifier-keyed, distance- and name-sorted lookups plus the flattened
/// search indices over both reference tables.
#[derive(Debug)]
pub struct ReferenceIndex {
    navaids_by_ident: HashMap<String, Vec<NavaidRecord>>,
    navaid_search: Vec<SearchEntry<NavaidRecord>>,
    airports_by_ident: HashMap<String, AirportRecord>,
    airport_search: Vec<SearchEntry<AirportRecord>>,
}

impl ReferenceIndex {
    /// Build the index from parsed rows. Row order of the inputs does not
    /// affect the result: all orderings are re-derived here.
    #[must_use]
    pub fn build(navaids: Vec<NavaidRecord>, airports: Vec<AirportRecord>) -> Self {
        let mut navaids_by_ident: HashMap<String, Vec<NavaidRecord>> = HashMap::new();
        for navaid in &navaids {
            navaids_by_ident
                .entry(navaid.ident.clone())
                .or_default()
                .push(navaid.clone());
        }
        // Within each identifier group: nearest first, name breaks ties,
        // unknown positions (infinite distance) last.
        for group in navaids_by_ident.values_mut() {
            group.sort_by(|a, b| {
                a.distance_nm
                    .total_cmp(&b.distance_nm)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }

        let mut navaid_search: Vec<SearchEntry<NavaidRecord>> = navaids
            .into_iter()
            .map(|record| SearchEntry {
                key: record.search_key(),
                record,
            })
            .collect();
        navaid_search.sort_by(|a, b| {
            a.record
                .distance_nm
                .total_cmp(&b.record.distance_nm)
                .then_with(|| a.record.ident.cmp(&b.record.ident))
        });

        let mut airports_by_ident: HashMap<String, AirportRecord> = HashMap::new();
        for airport in airports {
            // First occurrence wins on duplicate identifiers.
            airports_by_ident
                .entry(airport.ident.clone())
                .or_insert(airport);
        }

        let mut airport_search: Vec<SearchEntry<AirportRecord>> = airports_by_ident
            .values()
            .cloned()
            .map(|record| SearchEntry {
                key: record.search_key(),
                record,
            })
            .collect();
        airport_search.sort_by(|a, b| a.record.ident.cmp(&b.record.ident));

        Self {
            navaids_by_ident,
            navaid_search,
            airports_by_ident,
            airport_search,
        }
    }

    /// All navaids sharing an identifier, nearest first. Empty when unknown.
    #[must_use]
    pub fn navaids(&self, ident: &str) -> &[NavaidRecord] {
        self.navaids_by_ident
            .get(&ident.trim().to_uppercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Airport by identifier, if known.
    #[must_use]
    pub fn airport(&self, ident: &str) -> Option<&AirportRecord> {
        self.airports_by_ident.get(&ident.trim().to_uppercase())
    }

    /// True when the token names a known navaid identifier.
    #[must_use]
    pub fn is_navaid(&self, token: &str) -> bool {
        !self.navaids(token).is_empty()
    }

    /// Substring search over the unified key space. Navaid hits come first
    /// (nearest-first), then airports (alphabetical), capped at
    /// [`SEARCH_RESULT_CAP`] total.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for entry in &self.navaid_search {
            if hits.len() >= SEARCH_RESULT_CAP {
                return hits;
            }
            if entry.key.contains(&needle) {
                hits.push(SearchHit::Navaid(entry.record.clone()));
            }
        }
        for entry in &self.airport_search {
            if hits.len() >= SEARCH_RESULT_CAP {
                return hits;
            }
            if entry.key.contains(&needle) {
                hits.push(SearchHit::Airport(entry.record.clone()));
            }
        }
        hits
    }

    /// Number of distinct navaid identifiers
    #[must_use]
    pub fn navaid_ident_count(&self) -> usize {
        self.navaids_by_ident.len()
    }

    /// Number of known airports
    #[must_use]
    pub fn airport_count(&self) -> usize {
        self.airports_by_ident.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navaid(ident: &str, name: &str, kind: &str, distance_nm: f64) -> NavaidRecord {
        NavaidRecord {
            ident: ident.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            frequency: "113100".to_string(),
            latitude: distance_nm.is_finite().then_some(40.0),
            longitude: distance_nm.is_finite().then_some(-73.0),
            distance_nm,
        }
    }

    fn airport(ident: &str, name: &str) -> AirportRecord {
        AirportRecord {
            ident: ident.to_string(),
            name: name.to_string(),
        }
    }

    fn sample_index() -> ReferenceIndex {
        ReferenceIndex::build(
            vec![
                navaid("BDR", "Bridgeport Far", "VOR", 48.0),
                navaid("BDR", "Bridgeport Near", "VOR", 12.0),
                navaid("BDR", "Bridgeport Lost", "VOR", f64::INFINITY),
                navaid("LGA", "La Guardia", "VOR", 0.5),
            ],
            vec![
                airport("KJFK", "Kennedy Intl"),
                airport("KBOS", "Logan Intl"),
                airport("KJFK", "Duplicate Kennedy"),
            ],
        )
    }

    #[test]
    fn test_ident_groups_sorted_by_distance() {
        let index = sample_index();
        let group = index.navaids("BDR");
        let names: Vec<&str> = group.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bridgeport Near", "Bridgeport Far", "Bridgeport Lost"]
        );
        assert!(group.last().unwrap().distance_nm.is_infinite());
    }

    #[test]
    fn test_equal_distance_breaks_ties_by_name() {
        let index = ReferenceIndex::build(
            vec![
                navaid("AAA", "Zulu", "VOR", 10.0),
                navaid("AAA", "Alpha", "VOR", 10.0),
            ],
            vec![],
        );
        let names: Vec<&str> = index.navaids("AAA").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn test_airport_first_occurrence_wins() {
        let index = sample_index();
        assert_eq!(index.airport("KJFK").unwrap().name, "Kennedy Intl");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(index.navaids("bdr").len(), 3);
        assert!(index.airport("kbos").is_some());
    }

    #[test]
    fn test_unknown_ident_is_empty_not_error() {
        let index = sample_index();
        assert!(index.navaids("ZZZ").is_empty());
        assert!(index.airport("ZZZZ").is_none());
    }

    #[test]
    fn test_search_navaids_before_airports() {
        let index = sample_index();
        let hits = index.search("BDR");
        assert_eq!(hits.len(), 3);
        assert!(matches!(hits[0], SearchHit::Navaid(ref n) if n.name == "Bridgeport Near"));
    }

    #[test]
    fn test_category_word_search_surfaces_airports() {
        let index = sample_index();
        let hits = index.search("heliport");
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], SearchHit::Airport(ref a) if a.ident == "KBOS"));
        assert!(matches!(hits[1], SearchHit::Airport(ref a) if a.ident == "KJFK"));
    }

    #[test]
    fn test_search_cap() {
        let navaids = (0..80)
            .map(|i| navaid("FIX", &format!("Fix {i:02}"), "VOR", f64::from(i)))
            .collect();
        let index = ReferenceIndex::build(navaids, vec![]);
        assert_eq!(index.search("FIX").len(), SEARCH_RESULT_CAP);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = sample_index();
        assert!(index.search("  ").is_empty());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = sample_index();
        let b = sample_index();
        assert_eq!(a.navaids("BDR"), b.navaids("BDR"));
        let keys_a: Vec<String> = a.navaid_search.iter().map(|e| e.key.clone()).collect();
        let keys_b: Vec<String> = b.navaid_search.iter().map(|e| e.key.clone()).collect();
        assert_eq!(keys_a, keys_b);
    }
}

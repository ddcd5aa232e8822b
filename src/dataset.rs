//! Load-then-serve dataset lifecycle
//!
//! All seven snapshot tables load once at startup; the typed rows and the
//! reference index are then published immutably behind an `Arc` and handed
//! to the query-side components. A table that fails to load is fatal: no
//! feature operates without its backing table.

use crate::departure::{Selections, climb_instruction, derive_inputs, pick_departure_rule};
use crate::departure::rules::RuleInputs;
use crate::error::DepbriefError;
use crate::index::ReferenceIndex;
use crate::models::{
    AirportRecord, DepartureRule, GateRow, JfkConfigRow, LgaConfigRow, NavaidRecord, RouteRow,
};
use crate::tsv::{SnapshotTable, TableWarning};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Immutable session state: every reference table plus the built index.
#[derive(Debug)]
pub struct Dataset {
    pub lga_configs: Vec<LgaConfigRow>,
    pub jfk_configs: Vec<JfkConfigRow>,
    pub gates: Vec<GateRow>,
    pub rules: Vec<DepartureRule>,
    pub routes: Vec<RouteRow>,
    pub index: ReferenceIndex,
    /// Parse warnings surfaced at load time, kept for diagnostics
    pub warnings: Vec<TableWarning>,
}

/// Outcome of one derivation-plus-matching pass.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Canonical input vector derived from the selections
    pub inputs: RuleInputs,
    /// Winning rule, when one matched
    pub rule: Option<DepartureRule>,
    /// Climb instruction classified from the winning rule's procedure
    pub climb_instruction: Option<String>,
}

impl Dataset {
    /// Load every table from a data directory.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, DepbriefError> {
        let dir = dir.as_ref();
        let table = |name: &str, file: &str| SnapshotTable::from_file(name, dir.join(file));

        let dataset = Self::from_tables(
            &table("navaids", "navaids.tsv")?,
            &table("airports", "airports.tsv")?,
            &table("lga_configs", "lga_configs.tsv")?,
            &table("jfk_configs", "jfk_configs.tsv")?,
            &table("gates", "gates.tsv")?,
            &table("rules", "rules.tsv")?,
            &table("routes", "routes.tsv")?,
        );

        info!(
            "loaded dataset: {} navaid idents, {} airports, {} rules, {} routes",
            dataset.index.navaid_ident_count(),
            dataset.index.airport_count(),
            dataset.rules.len(),
            dataset.routes.len()
        );
        for warning in &dataset.warnings {
            warn!(
                "table {} line {}: {}",
                warning.table, warning.line, warning.message
            );
        }

        Ok(dataset)
    }

    /// Build the dataset from already-parsed tables.
    #[must_use]
    pub fn from_tables(
        navaids: &SnapshotTable,
        airports: &SnapshotTable,
        lga_configs: &SnapshotTable,
        jfk_configs: &SnapshotTable,
        gates: &SnapshotTable,
        rules: &SnapshotTable,
        routes: &SnapshotTable,
    ) -> Self {
        let navaid_rows: Vec<NavaidRecord> = navaids
            .records()
            .filter_map(|r| NavaidRecord::from_record(&r))
            .collect();
        let airport_rows: Vec<AirportRecord> = airports
            .records()
            .filter_map(|r| AirportRecord::from_record(&r))
            .collect();

        let mut warnings = Vec::new();
        for source in [navaids, airports, lga_configs, jfk_configs, gates, rules, routes] {
            warnings.extend_from_slice(source.warnings());
        }

        Self {
            lga_configs: lga_configs.records().map(|r| LgaConfigRow::from_record(&r)).collect(),
            jfk_configs: jfk_configs.records().map(|r| JfkConfigRow::from_record(&r)).collect(),
            gates: gates.records().map(|r| GateRow::from_record(&r)).collect(),
            rules: rules.records().map(|r| DepartureRule::from_record(&r)).collect(),
            routes: routes.records().map(|r| RouteRow::from_record(&r)).collect(),
            index: ReferenceIndex::build(navaid_rows, airport_rows),
            warnings,
        }
    }

    /// Derive the canonical input vector from the selections, match the
    /// rule table, and classify the climb instruction.
    #[must_use]
    pub fn resolve(&self, selections: &Selections) -> Resolution {
        let inputs = derive_inputs(&self.lga_configs, &self.jfk_configs, &self.gates, selections);
        let rule = pick_departure_rule(&self.rules, &inputs).cloned();
        let climb_instruction = rule
            .as_ref()
            .map(|r| climb_instruction(&r.output).to_string());
        Resolution {
            inputs,
            rule,
            climb_instruction,
        }
    }
}

//! Derivation of canonical rule inputs from controller selections
//!
//! Each lookup is a linear scan of one table for the first row whose key
//! matches the selection. A miss yields empty strings, never an error:
//! downstream matching treats an empty input as "satisfies only wildcard
//! requirements".

use crate::models::{GateRow, JfkConfigRow, LgaConfigRow};
use crate::departure::rules::RuleInputs;
use serde::{Deserialize, Serialize};

/// Raw controller selections before derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selections {
    /// LGA ATIS configuration label
    pub lga_config: String,
    /// JFK ATIS configuration label
    pub jfk_config: String,
    /// Filed exit fix
    pub exit_fix: String,
    /// Aircraft type filter
    pub acft_type: String,
}

/// Compass direction for an exit fix, or empty when the gate is unknown.
#[must_use]
pub fn gate_direction(gates: &[GateRow], exit_fix: &str) -> String {
    gates
        .iter()
        .find(|g| g.fix.eq_ignore_ascii_case(exit_fix.trim()))
        .map(|g| g.direction.clone())
        .unwrap_or_default()
}

/// Departure runway and landing class for an LGA configuration label.
#[must_use]
pub fn lga_derived(configs: &[LgaConfigRow], label: &str) -> (String, String) {
    configs
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(label.trim()))
        .map(|c| (c.dep_runway.clone(), c.landing_class.clone()))
        .unwrap_or_default()
}

/// JFK and LGA airspace values for a JFK configuration label.
#[must_use]
pub fn jfk_airspace(configs: &[JfkConfigRow], label: &str) -> (String, String) {
    configs
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(label.trim()))
        .map(|c| (c.jfk_airspace.clone(), c.lga_airspace.clone()))
        .unwrap_or_default()
}

/// Join the four auxiliary tables into the canonical input vector the rule
/// engine matches against.
#[must_use]
pub fn derive_inputs(
    lga_configs: &[LgaConfigRow],
    jfk_configs: &[JfkConfigRow],
    gates: &[GateRow],
    selections: &Selections,
) -> RuleInputs {
    let exit_fix = selections.exit_fix.trim().to_uppercase();
    let (dep_runway, lga_ldg_class) = lga_derived(lga_configs, &selections.lga_config);
    let (jfk_air, lga_air) = jfk_airspace(jfk_configs, &selections.jfk_config);

    RuleInputs {
        dep_runway,
        lga_ldg_class,
        lga_airspace: lga_air,
        jfk_airspace: jfk_air,
        exit_gate_dir: gate_direction(gates, &exit_fix),
        exit_fix,
        acft_type: selections.acft_type.trim().to_uppercase(),
    }
}

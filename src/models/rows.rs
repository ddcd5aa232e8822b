//! Configuration, gate, rule, and route rows from the snapshot tables

use crate::tsv::Record;
use serde::{Deserialize, Serialize};

/// One LGA ATIS configuration: label → departure runway + landing class.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LgaConfigRow {
    /// Configuration label as published on the ATIS
    pub label: String,
    /// Departure runway for this configuration
    pub dep_runway: String,
    /// Landing class for this configuration
    pub landing_class: String,
}

impl LgaConfigRow {
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            label: record.field("CONFIG").to_string(),
            dep_runway: record.field("DEP_RWY").to_string(),
            landing_class: record.field("LDG_CLASS").to_string(),
        }
    }
}

/// One JFK ATIS configuration: label → JFK airspace + LGA airspace.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JfkConfigRow {
    /// Configuration label as published on the ATIS
    pub label: String,
    /// Active JFK airspace designation
    pub jfk_airspace: String,
    /// LGA airspace designation implied by the JFK configuration
    pub lga_airspace: String,
}

impl JfkConfigRow {
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            label: record.field("CONFIG").to_string(),
            jfk_airspace: record.field("JFK_AIRSPACE").to_string(),
            lga_airspace: record.field("LGA_AIRSPACE").to_string(),
        }
    }
}

/// One departure gate: exit fix → compass direction label.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GateRow {
    /// Exit fix / gate name
    pub fix: String,
    /// Compass direction label (N, E, S, W, ...)
    pub direction: String,
}

impl GateRow {
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            fix: record.field("FIX").to_string(),
            direction: record.field("DIR").to_string(),
        }
    }
}

/// One row of the departure-rule table.
///
/// Match fields hold `*` or empty for wildcard. The two airspace fields use
/// multi-token subset matching; the rest match exactly (case-insensitive).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DepartureRule {
    /// Required departure runway
    pub dep_runway: String,
    /// Required LGA airspace tokens
    pub lga_airspace_req: String,
    /// Required JFK airspace tokens
    pub jfk_airspace_req: String,
    /// Required exit-gate direction
    pub exit_gate_dir: String,
    /// Required exit fix
    pub exit_fix_req: String,
    /// Required aircraft type
    pub acft_type: String,
    /// Required LGA landing class
    pub lga_ldg_class_req: String,
    /// Procedure string assigned when this rule wins
    pub output: String,
    /// Free-text notes for the controller
    pub notes: String,
    /// Preference rank; lower wins. Unparseable priorities sort last.
    pub priority: u32,
}

impl DepartureRule {
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            dep_runway: record.field("DEP_RWY").to_string(),
            lga_airspace_req: record.field("LGA_AIRSPACE").to_string(),
            jfk_airspace_req: record.field("JFK_AIRSPACE").to_string(),
            exit_gate_dir: record.field("GATE_DIR").to_string(),
            exit_fix_req: record.field("EXIT_FIX").to_string(),
            acft_type: record.field("ACFT_TYPE").to_string(),
            lga_ldg_class_req: record.field("LDG_CLASS").to_string(),
            output: record.field("OUTPUT").to_string(),
            notes: record.field("NOTES").to_string(),
            priority: record.field("PRIORITY").parse().unwrap_or(u32::MAX),
        }
    }
}

/// One row of the preferred-route table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RouteRow {
    /// Origin airport identifier
    pub origin: String,
    /// Destination airport identifier
    pub destination: String,
    /// Space-separated waypoint/navaid/airway tokens
    pub route: String,
    /// Aircraft-class filter text
    pub acft_class: String,
    /// Navigation-equipment filter text
    pub nav_eqpt: String,
    /// Altitude restriction text
    pub altitude: String,
}

impl RouteRow {
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            origin: record.field("ORIG").to_string(),
            destination: record.field("DEST").to_string(),
            route: record.field("ROUTE").to_string(),
            acft_class: record.field("ACFT_CLASS").to_string(),
            nav_eqpt: record.field("NAV_EQPT").to_string(),
            altitude: record.field("ALTITUDE").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsv::SnapshotTable;

    #[test]
    fn test_departure_rule_from_record() {
        let text = "DEP_RWY\tLGA_AIRSPACE\tJFK_AIRSPACE\tGATE_DIR\tEXIT_FIX\tACFT_TYPE\tLDG_CLASS\tOUTPUT\tNOTES\tPRIORITY\n\
                    4\tN\t*\tN\t*\t*\t*\tLGA7 MASPETH\tcall before release\t1\n";
        let table = SnapshotTable::parse("rules", text).unwrap();
        let rule = DepartureRule::from_record(&table.records().next().unwrap());
        assert_eq!(rule.dep_runway, "4");
        assert_eq!(rule.output, "LGA7 MASPETH");
        assert_eq!(rule.priority, 1);
    }

    #[test]
    fn test_unparseable_priority_sorts_last() {
        let text = "DEP_RWY\tOUTPUT\tPRIORITY\n13\tTNNIS4\tn/a\n";
        let table = SnapshotTable::parse("rules", text).unwrap();
        let rule = DepartureRule::from_record(&table.records().next().unwrap());
        assert_eq!(rule.priority, u32::MAX);
    }

    #[test]
    fn test_gate_row_from_record() {
        let table = SnapshotTable::parse("gates", "FIX\tDIR\nWHITE\tN\n").unwrap();
        let gate = GateRow::from_record(&table.records().next().unwrap());
        assert_eq!(gate.fix, "WHITE");
        assert_eq!(gate.direction, "N");
    }

    #[test]
    fn test_route_row_from_record() {
        let text = "ORIG\tDEST\tROUTE\tACFT_CLASS\tNAV_EQPT\tALTITUDE\n\
                    KLGA\tKBOS\tMERIT ROBUC3\tJET\tRNAV\tFL230\n";
        let table = SnapshotTable::parse("routes", text).unwrap();
        let route = RouteRow::from_record(&table.records().next().unwrap());
        assert_eq!(route.origin, "KLGA");
        assert_eq!(route.destination, "KBOS");
        assert_eq!(route.route, "MERIT ROBUC3");
    }
}

//! Climb-instruction classification for assigned procedures
//!
//! The procedure string of the winning rule decides the climb clearance.
//! Procedures with published top altitudes (the RNAV departures and the
//! LGA7 climb transitions) get "climb via SID"; everything else gets the
//! standard initial altitude. This is a closed, hand-authored list.

use regex::Regex;
use std::sync::LazyLock;

/// Clearance for procedures whose published climb applies
pub const CLIMB_VIA_SID: &str = "CLIMB VIA SID";

/// Standard initial-altitude clearance
pub const CLIMB_MAINTAIN_5000: &str = "CLIMB AND MAINTAIN 5,000";

/// LGA7 climb transitions cleared via the SID
const CLIMB_TRANSITIONS: [&str; 2] = ["LGA7.MASPETH", "LGA7.WHITESTONE"];

/// RNAV departures, with or without a track suffix (TNNIS4, TNNIS#, ...)
static RNAV_DEPARTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(GLDMN|HOPEA|NTHNS|TNNIS|JUTES)[0-9#]?").expect("RNAV departure pattern")
});

/// Collapse whitespace runs to single dots and uppercase, so table entries
/// written as "LGA7 MASPETH" and "LGA7.MASPETH" classify identically.
fn normalize(procedure: &str) -> String {
    procedure
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .to_uppercase()
}

/// Climb instruction for the matched rule's procedure string.
#[must_use]
pub fn climb_instruction(procedure: &str) -> &'static str {
    let normalized = normalize(procedure);
    if CLIMB_TRANSITIONS.iter().any(|t| normalized.contains(t))
        || RNAV_DEPARTURE.is_match(&normalized)
    {
        CLIMB_VIA_SID
    } else {
        CLIMB_MAINTAIN_5000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("LGA7 MASPETH")]
    #[case("LGA7.MASPETH")]
    #[case("lga7  whitestone")]
    #[case("TNNIS4")]
    #[case("TNNIS#")]
    #[case("GLDMN5")]
    #[case("HOPEA")]
    #[case("NTHNS2")]
    #[case("JUTES")]
    fn test_climb_via_sid(#[case] procedure: &str) {
        assert_eq!(climb_instruction(procedure), CLIMB_VIA_SID);
    }

    #[rstest]
    #[case("LGA7")]
    #[case("LGA7 FLUSHING")]
    #[case("")]
    #[case("RADAR VECTORS")]
    fn test_default_initial_altitude(#[case] procedure: &str) {
        assert_eq!(climb_instruction(procedure), CLIMB_MAINTAIN_5000);
    }

    #[test]
    fn test_normalization_collapses_runs() {
        assert_eq!(normalize("LGA7   MASPETH  CLIMB"), "LGA7.MASPETH.CLIMB");
    }
}

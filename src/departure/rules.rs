//! Rule matching over the prioritized departure-rule table
//!
//! A rule matches when all seven of its fields accept the input vector.
//! Five fields match exactly (with `*`/empty as wildcard); the two airspace
//! fields require every one of their tokens to appear in the active
//! airspace designation. Among matching rules the lowest priority number
//! wins, with original table order breaking priority ties.

use crate::models::DepartureRule;
use serde::{Deserialize, Serialize};

/// Canonical input vector for rule matching, produced by
/// [`crate::departure::derive_inputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInputs {
    /// Active departure runway
    pub dep_runway: String,
    /// Active LGA landing class
    pub lga_ldg_class: String,
    /// Active LGA airspace designation
    pub lga_airspace: String,
    /// Active JFK airspace designation
    pub jfk_airspace: String,
    /// Exit-gate compass direction
    pub exit_gate_dir: String,
    /// Filed exit fix
    pub exit_fix: String,
    /// Aircraft type
    pub acft_type: String,
}

/// Exact-field predicate. `*` and empty rule values match anything; an
/// empty input is satisfied only by a wildcard.
#[must_use]
pub fn match_field(rule_value: &str, input: &str) -> bool {
    let rule_value = rule_value.trim();
    if rule_value.is_empty() || rule_value == "*" {
        return true;
    }
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    rule_value.eq_ignore_ascii_case(input)
}

/// Multi-token airspace predicate. The rule value splits on `+`, `,`, `&`
/// into required tokens; every token must appear as a substring of the
/// input designation (order-independent AND).
#[must_use]
pub fn match_airspace(rule_value: &str, input: &str) -> bool {
    let rule_value = rule_value.trim();
    if rule_value.is_empty() || rule_value == "*" {
        return true;
    }
    let input = input.trim().to_uppercase();
    if input.is_empty() {
        return false;
    }
    rule_value
        .split(['+', ',', '&'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .all(|token| input.contains(&token.to_uppercase()))
}

fn rule_matches(rule: &DepartureRule, inputs: &RuleInputs) -> bool {
    match_field(&rule.dep_runway, &inputs.dep_runway)
        && match_field(&rule.exit_gate_dir, &inputs.exit_gate_dir)
        && match_field(&rule.exit_fix_req, &inputs.exit_fix)
        && match_field(&rule.acft_type, &inputs.acft_type)
        && match_field(&rule.lga_ldg_class_req, &inputs.lga_ldg_class)
        && match_airspace(&rule.lga_airspace_req, &inputs.lga_airspace)
        && match_airspace(&rule.jfk_airspace_req, &inputs.jfk_airspace)
}

/// Select at most one departure rule for the input vector.
///
/// Returns `None` when no rule satisfies all seven predicates; that is a
/// first-class outcome, not an error. The sort is stable, so rules sharing
/// the winning priority resolve in original table order.
#[must_use]
pub fn pick_departure_rule<'a>(
    rules: &'a [DepartureRule],
    inputs: &RuleInputs,
) -> Option<&'a DepartureRule> {
    let mut matching: Vec<&DepartureRule> =
        rules.iter().filter(|r| rule_matches(r, inputs)).collect();
    matching.sort_by_key(|r| r.priority);
    matching.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(dep_rwy: &str, lga_air: &str, output: &str, priority: u32) -> DepartureRule {
        DepartureRule {
            dep_runway: dep_rwy.to_string(),
            lga_airspace_req: lga_air.to_string(),
            jfk_airspace_req: "*".to_string(),
            exit_gate_dir: "*".to_string(),
            exit_fix_req: "*".to_string(),
            acft_type: "*".to_string(),
            lga_ldg_class_req: "*".to_string(),
            output: output.to_string(),
            notes: String::new(),
            priority,
        }
    }

    fn inputs(dep_rwy: &str, lga_air: &str) -> RuleInputs {
        RuleInputs {
            dep_runway: dep_rwy.to_string(),
            lga_airspace: lga_air.to_string(),
            ..RuleInputs::default()
        }
    }

    #[test]
    fn test_match_field_wildcards() {
        assert!(match_field("*", "anything"));
        assert!(match_field("*", ""));
        assert!(match_field("", "anything"));
        assert!(match_field("", ""));
    }

    #[test]
    fn test_match_field_exact() {
        assert!(match_field("4", "4"));
        assert!(match_field("jet", "JET"));
        assert!(!match_field("4", "13"));
    }

    #[test]
    fn test_match_field_empty_input_needs_wildcard() {
        assert!(!match_field("4", ""));
        assert!(!match_field("N", "  "));
    }

    #[test]
    fn test_match_airspace_all_tokens_required() {
        assert!(match_airspace("A+B", "XAYB"));
        assert!(!match_airspace("A+B", "XAY"));
    }

    #[test]
    fn test_match_airspace_separators_and_whitespace() {
        assert!(match_airspace("N , S", "N+S"));
        assert!(match_airspace("N & S", "SOUTH N"));
        assert!(match_airspace("n", "N+S"));
    }

    #[test]
    fn test_match_airspace_empty_input_fails_unless_wildcard() {
        assert!(!match_airspace("N", ""));
        assert!(match_airspace("*", ""));
        assert!(match_airspace("", ""));
    }

    #[test]
    fn test_no_matching_rule_is_none() {
        let rules = vec![rule("4", "N", "LGA7 MASPETH", 1)];
        assert!(pick_departure_rule(&rules, &inputs("13", "N")).is_none());
    }

    #[test]
    fn test_lowest_priority_wins() {
        let rules = vec![
            rule("4", "*", "SECOND", 5),
            rule("4", "*", "FIRST", 1),
            rule("4", "*", "THIRD", 9),
        ];
        let winner = pick_departure_rule(&rules, &inputs("4", "N")).unwrap();
        assert_eq!(winner.output, "FIRST");
    }

    #[test]
    fn test_priority_tie_keeps_table_order() {
        let rules = vec![
            rule("4", "*", "EARLIER ROW", 3),
            rule("4", "*", "LATER ROW", 3),
        ];
        let winner = pick_departure_rule(&rules, &inputs("4", "N")).unwrap();
        assert_eq!(winner.output, "EARLIER ROW");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let rules = vec![
            rule("4", "N", "A", 2),
            rule("4", "*", "B", 2),
            rule("*", "*", "C", 7),
        ];
        let q = inputs("4", "N+S");
        let first = pick_departure_rule(&rules, &q).unwrap().output.clone();
        for _ in 0..10 {
            assert_eq!(pick_departure_rule(&rules, &q).unwrap().output, first);
        }
    }

    #[test]
    fn test_airspace_substring_semantics_in_selection() {
        // Requirement "N" is a substring-match success against active "N+S".
        let rules = vec![rule("4", "N", "LGA7 MASPETH", 1)];
        let winner = pick_departure_rule(&rules, &inputs("4", "N+S")).unwrap();
        assert_eq!(winner.output, "LGA7 MASPETH");
    }

    #[test]
    fn test_all_seven_fields_participate() {
        let mut strict = rule("4", "N", "STRICT", 1);
        strict.jfk_airspace_req = "NE".to_string();
        strict.exit_gate_dir = "N".to_string();
        strict.exit_fix_req = "WHITE".to_string();
        strict.acft_type = "JET".to_string();
        strict.lga_ldg_class_req = "A".to_string();
        let rules = vec![strict];

        let full = RuleInputs {
            dep_runway: "4".to_string(),
            lga_ldg_class: "A".to_string(),
            lga_airspace: "N+S".to_string(),
            jfk_airspace: "NE".to_string(),
            exit_gate_dir: "N".to_string(),
            exit_fix: "WHITE".to_string(),
            acft_type: "JET".to_string(),
        };
        assert!(pick_departure_rule(&rules, &full).is_some());

        let mut wrong_class = full.clone();
        wrong_class.lga_ldg_class = "B".to_string();
        assert!(pick_departure_rule(&rules, &wrong_class).is_none());
    }
}

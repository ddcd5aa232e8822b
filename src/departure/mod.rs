//! Departure-procedure resolution
//!
//! This module turns controller selections into a departure assignment:
//! - Derivation of the canonical rule inputs from the ATIS configurations,
//!   exit fix, and aircraft type
//! - Predicate matching over the prioritized departure-rule table
//! - Classification of the winning procedure into a climb instruction

pub mod procedure;
pub mod resolver;
pub mod rules;

pub use procedure::{CLIMB_MAINTAIN_5000, CLIMB_VIA_SID, climb_instruction};
pub use resolver::{Selections, derive_inputs, gate_direction, jfk_airspace, lga_derived};
pub use rules::{RuleInputs, match_airspace, match_field, pick_departure_rule};

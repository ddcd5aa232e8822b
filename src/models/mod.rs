//! Typed row models parsed from the snapshot tables

pub mod airport;
pub mod navaid;
pub mod rows;

pub use airport::AirportRecord;
pub use navaid::NavaidRecord;
pub use rows::{DepartureRule, GateRow, JfkConfigRow, LgaConfigRow, RouteRow};

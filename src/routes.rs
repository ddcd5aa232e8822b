//! Preferred-route join and display annotation
//!
//! Routes filter on the fixed hub origin plus the requested destination,
//! preserving table order. Waypoint tokens are classified against the
//! reference index purely for display; classification never affects
//! which routes match.

use crate::index::ReferenceIndex;
use crate::models::RouteRow;
use serde::Serialize;

/// Fixed origin every route in the table departs from
pub const HUB: &str = "KLGA";

/// How a route token renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Navaid,
    Airport,
    Text,
}

/// One classified token of a route string.
#[derive(Debug, Clone, Serialize)]
pub struct RouteToken {
    pub token: String,
    pub kind: TokenKind,
}

/// A matched route with its tokens classified for display.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRoute {
    #[serde(flatten)]
    pub route: RouteRow,
    pub tokens: Vec<RouteToken>,
}

fn classify(index: &ReferenceIndex, token: &str) -> TokenKind {
    if index.is_navaid(token) {
        TokenKind::Navaid
    } else if index.airport(token).is_some() {
        TokenKind::Airport
    } else {
        TokenKind::Text
    }
}

/// All hub routes to a destination, in source table order.
#[must_use]
pub fn find_routes(
    routes: &[RouteRow],
    index: &ReferenceIndex,
    destination: &str,
) -> Vec<AnnotatedRoute> {
    let destination = destination.trim();
    routes
        .iter()
        .filter(|row| {
            row.origin.eq_ignore_ascii_case(HUB) && row.destination.eq_ignore_ascii_case(destination)
        })
        .map(|row| AnnotatedRoute {
            route: row.clone(),
            tokens: row
                .route
                .split_whitespace()
                .map(|token| RouteToken {
                    token: token.to_string(),
                    kind: classify(index, token),
                })
                .collect(),
        })
        .collect()
}

/// The explicit no-data outcome for a destination with no routes.
#[must_use]
pub fn no_routes_message(destination: &str) -> String {
    format!("no routes found for {}", destination.trim().to_uppercase())
}

//! Route expansion and group normalization.

use chrono::{DateTime, Utc};

use crate::model::Group;
use crate::time::parse_timestamp;

/// A group with its derived fields attached. Normalization copies the raw
/// record; it never mutates the caller's collection.
#[derive(Debug, Clone)]
pub struct NormalizedGroup {
    pub group: Group,
    /// Ordered stop sequence: start, interior stops, destination.
    pub route: Vec<String>,
    /// Canonical departure instant, or `None` when the raw value is absent
    /// or unparseable.
    pub departure_dt: Option<DateTime<Utc>>,
}

/// Expand start/stop-list/destination into an ordered route.
///
/// Interior stops are split on `|`, trimmed, blanks discarded. Absent
/// endpoints are dropped, so a start-only group yields a single-element
/// route and a fully absent one yields an empty route.
pub fn stops_to_route(
    start: Option<&str>,
    stops: Option<&str>,
    dest: Option<&str>,
) -> Vec<String> {
    let middle: Vec<&str> = stops
        .map(|s| {
            s.split('|')
                .map(str::trim)
                .filter(|seg| !seg.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if middle.is_empty() {
        return start.into_iter().chain(dest).map(str::to_string).collect();
    }

    let mut route = Vec::with_capacity(middle.len() + 2);
    if let Some(start) = start {
        route.push(start.to_string());
    }
    route.extend(middle.into_iter().map(str::to_string));
    if let Some(dest) = dest {
        route.push(dest.to_string());
    }
    route
}

/// Map every raw group to an augmented copy carrying its route and parsed
/// departure instant. All other fields pass through unchanged.
pub fn normalize_groups(groups: &[Group]) -> Vec<NormalizedGroup> {
    groups
        .iter()
        .map(|g| NormalizedGroup {
            route: stops_to_route(g.start.as_deref(), g.stops.as_deref(), g.dest.as_deref()),
            departure_dt: g.departure_date.as_ref().and_then(parse_timestamp),
            group: g.clone(),
        })
        .collect()
}

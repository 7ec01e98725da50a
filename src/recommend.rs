//! Group scoring and ranking.
//!
//! The engine is a pure computation over one snapshot: resolve the seeker,
//! compute bounded social degrees, score every candidate group, filter by
//! the desired time window, sort deterministically, truncate, enrich. No
//! error escapes this module — every degraded input collapses to a neutral
//! value, and the only observable failure mode is a shorter (or empty)
//! result list.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::graph::{bfs_degrees, DegreeMap, SocialGraph};
use crate::model::{RawTimestamp, User};
use crate::route::{normalize_groups, NormalizedGroup};
use crate::snapshot::{Snapshot, UserIndex};
use crate::time::parse_timestamp;

const SEAT_WEIGHT: f64 = 10.0;
const PREFERENCE_BONUS: f64 = 20.0;
/// Hour caps on the time penalties.
const DESIRED_DELTA_CAP_HOURS: f64 = 48.0;
const NOW_DELTA_CAP_HOURS: f64 = 24.0;

/// Tuning knobs for one recommendation call.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Maximum number of groups returned.
    pub top_n: usize,
    /// Social-degree radius for mutual lookups.
    pub max_degree: u32,
    /// Inclusive admission window around the desired departure, in minutes.
    pub time_window_mins: i64,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            max_degree: 5,
            time_window_mins: 60,
        }
    }
}

/// A group member reachable from the seeker within the degree radius.
/// `roll_no` and `name` are attached after ranking for the retained groups
/// only, and stay absent when the uid is not in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutual {
    pub uid: i64,
    pub degree: u32,
    pub roll_no: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub gid: i64,
    pub score: f64,
    pub seats_left: i64,
    pub departure_dt: Option<DateTime<Utc>>,
    pub route: Vec<String>,
    pub mutuals: Vec<Mutual>,
}

/// A scored candidate before filtering and ranking.
struct Scored {
    rec: Recommendation,
    /// Chronological stand-in for the sort: the group's own departure, or a
    /// far-future sentinel that pushes unknown departures to the end.
    sort_departure: DateTime<Utc>,
}

/// Rank candidate ride groups for one seeker. See [`recommend_at`]; this
/// wrapper evaluates the "hours from now" penalty against the current time.
pub fn recommend(
    snapshot: &Snapshot,
    seeker_roll: &str,
    desired_departure: Option<&RawTimestamp>,
    opts: &RecommendOptions,
) -> Vec<Recommendation> {
    recommend_at(snapshot, seeker_roll, desired_departure, opts, Utc::now())
}

/// Rank candidate ride groups for one seeker, with an explicit reference
/// instant for the no-desired-departure penalty.
///
/// An unknown seeker and a seeker with zero matches both yield an empty
/// list; the output does not distinguish them. An unparseable desired
/// departure is treated as no desired departure at all.
pub fn recommend_at(
    snapshot: &Snapshot,
    seeker_roll: &str,
    desired_departure: Option<&RawTimestamp>,
    opts: &RecommendOptions,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let users = UserIndex::build(&snapshot.users);
    let Some(seeker) = users.by_roll(seeker_roll) else {
        debug!(seeker_roll, "seeker not found");
        return Vec::new();
    };

    let graph = SocialGraph::build(&snapshot.connections);
    let degrees = bfs_degrees(&graph, Some(seeker.uid), opts.max_degree);
    let groups = normalize_groups(&snapshot.groups);
    let desired_dt = desired_departure.and_then(parse_timestamp);

    let mut candidates: Vec<Scored> = groups
        .iter()
        .map(|g| score_group(snapshot, g, seeker, &degrees, desired_dt, now))
        .collect();

    if let Some(desired) = desired_dt {
        let window = Duration::minutes(opts.time_window_mins);
        candidates.retain(|c| match c.rec.departure_dt {
            Some(dep) => (dep - desired).abs() <= window,
            None => false,
        });
    }

    sort_candidates(&mut candidates, desired_dt);
    candidates.truncate(opts.top_n);

    debug!(
        seeker = seeker.uid,
        reachable = degrees.len(),
        returned = candidates.len(),
        "ranked groups"
    );

    let mut results: Vec<Recommendation> = candidates.into_iter().map(|c| c.rec).collect();
    for rec in &mut results {
        for mutual in &mut rec.mutuals {
            if let Some(user) = users.by_uid(mutual.uid) {
                mutual.roll_no = user.roll_no.clone();
                mutual.name = user.name.clone();
            }
        }
    }
    results
}

fn score_group(
    snapshot: &Snapshot,
    group: &NormalizedGroup,
    seeker: &User,
    degrees: &DegreeMap,
    desired_dt: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Scored {
    let gid = group.group.gid;
    let members = snapshot.members_of(gid);
    let seats_left = (group.group.capacity.unwrap_or(0) - members.len() as i64).max(0);

    let mut score = seats_left as f64 * SEAT_WEIGHT;

    let gender = seeker.gender.as_deref().unwrap_or("");
    if !gender.is_empty() && Some(gender) == group.group.preference.as_deref() {
        score += PREFERENCE_BONUS;
    }

    match (desired_dt, group.departure_dt) {
        (Some(desired), Some(dep)) => {
            score -= hours_between(dep, desired).min(DESIRED_DELTA_CAP_HOURS) * 2.0;
        }
        (None, Some(dep)) => {
            score -= hours_between(dep, now).min(NOW_DELTA_CAP_HOURS);
        }
        // Unknown departure: no time penalty, seats and preference decide.
        (_, None) => {}
    }

    let mut mutuals: Vec<Mutual> = members
        .iter()
        .filter(|m| m.uid != seeker.uid)
        .filter_map(|m| match degrees.get(&m.uid) {
            // Degree 0 marks the seeker's own node and is never a mutual.
            Some(&degree) if degree > 0 => Some(Mutual {
                uid: m.uid,
                degree,
                roll_no: None,
                name: None,
            }),
            _ => None,
        })
        .collect();
    mutuals.sort_by_key(|m| m.degree);

    Scored {
        sort_departure: sort_key_departure(group.departure_dt),
        rec: Recommendation {
            gid,
            score,
            seats_left,
            departure_dt: group.departure_dt,
            route: group.route.clone(),
            mutuals,
        },
    }
}

fn hours_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (a - b).num_milliseconds().abs() as f64 / 3_600_000.0
}

/// Ten calendar years short of the maximum representable instant: late
/// enough to land after any real departure, early enough that arithmetic
/// around it cannot overflow.
fn sort_key_departure(departure: Option<DateTime<Utc>>) -> DateTime<Utc> {
    departure.unwrap_or_else(|| DateTime::<Utc>::MAX_UTC - Duration::days(3650))
}

/// Score descending, seats_left descending, then time proximity: distance to
/// the desired departure when one is known, otherwise the raw sort-key
/// departure (unknowns last either way).
fn sort_candidates(candidates: &mut [Scored], desired_dt: Option<DateTime<Utc>>) {
    match desired_dt {
        Some(desired) => candidates.sort_by(|a, b| {
            b.rec
                .score
                .total_cmp(&a.rec.score)
                .then_with(|| b.rec.seats_left.cmp(&a.rec.seats_left))
                .then_with(|| {
                    (a.sort_departure - desired)
                        .abs()
                        .cmp(&(b.sort_departure - desired).abs())
                })
        }),
        None => candidates.sort_by(|a, b| {
            b.rec
                .score
                .total_cmp(&a.rec.score)
                .then_with(|| b.rec.seats_left.cmp(&a.rec.seats_left))
                .then_with(|| a.sort_departure.cmp(&b.sort_departure))
        }),
    }
}

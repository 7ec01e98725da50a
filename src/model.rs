//! Record types for the snapshot collections.
//!
//! Fields mirror the upstream store column-for-column. Anything the store can
//! leave NULL is an `Option` here; validation happens once at the serde
//! boundary, never ad hoc inside scoring code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as it arrives from the snapshot: either an already-typed UTC
/// instant or free-form text that still needs parsing.
///
/// Untagged so RFC 3339 strings deserialize straight into `Instant` and
/// anything looser lands in `Text` for [`crate::time::parse_timestamp`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Instant(DateTime<Utc>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    /// Secondary unique key; seekers are resolved by it.
    pub roll_no: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub year: Option<i32>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub gid: i64,
    pub start: Option<String>,
    pub dest: Option<String>,
    /// `|`-delimited intermediate stops.
    pub stops: Option<String>,
    pub departure_date: Option<RawTimestamp>,
    pub capacity: Option<i64>,
    /// Rider-gender preference; scores a bonus on an exact match.
    pub preference: Option<String>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub uid: i64,
    pub role: Option<String>,
    pub is_admin: Option<bool>,
    pub joined_at: Option<RawTimestamp>,
}

/// One undirected social edge. Endpoints are optional because the upstream
/// relation can carry NULLs; an edge missing either side is dropped at graph
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub uid_a: Option<i64>,
    pub uid_b: Option<i64>,
}

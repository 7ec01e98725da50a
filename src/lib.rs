//! # Poolmatch
//!
//! Ride-group recommendations over a campus social graph.
//!
//! Given a point-in-time snapshot of users, groups, memberships, and social
//! connections, the engine ranks candidate ride groups for one seeker:
//! bounded BFS over the connection graph for degrees of separation,
//! per-group scoring, optional time-window filtering, and a deterministic
//! composite sort. The engine is pure — it performs no I/O and never
//! mutates the snapshot it is handed, so concurrent callers can share one
//! read-only snapshot freely.

pub mod graph;
pub mod model;
pub mod recommend;
pub mod route;
pub mod snapshot;
pub mod time;

pub use recommend::{recommend, recommend_at, Mutual, Recommendation, RecommendOptions};
pub use snapshot::{Snapshot, SnapshotError, SnapshotStore, UserIndex};

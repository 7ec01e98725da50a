//! Snapshot ownership and user lookups.
//!
//! A [`Snapshot`] is a point-in-time copy of the four upstream collections.
//! [`SnapshotStore`] owns the current one with an explicit lifecycle: loaded
//! on startup, refreshed on demand, handed to the engine by reference. The
//! engine itself never reaches for globals and never mutates what it is
//! handed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::{Connection, Group, GroupMember, User};

/// The four input collections. Field names match the upstream schema; any
/// collection missing from the file is simply empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Membership rows keyed by gid.
    #[serde(default)]
    pub group_members: HashMap<i64, Vec<GroupMember>>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Snapshot {
    pub fn members_of(&self, gid: i64) -> &[GroupMember] {
        self.group_members
            .get(&gid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// uid → User and roll_no → User lookups over one snapshot.
pub struct UserIndex<'a> {
    by_uid: FxHashMap<i64, &'a User>,
    by_roll: FxHashMap<&'a str, &'a User>,
}

impl<'a> UserIndex<'a> {
    pub fn build(users: &'a [User]) -> Self {
        let mut by_uid = FxHashMap::default();
        let mut by_roll = FxHashMap::default();
        for user in users {
            by_uid.insert(user.uid, user);
            if let Some(roll) = user.roll_no.as_deref() {
                if !roll.is_empty() {
                    by_roll.insert(roll, user);
                }
            }
        }
        Self { by_uid, by_roll }
    }

    pub fn by_uid(&self, uid: i64) -> Option<&'a User> {
        self.by_uid.get(&uid).copied()
    }

    pub fn by_roll(&self, roll: &str) -> Option<&'a User> {
        self.by_roll.get(roll).copied()
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Owns the current snapshot and where it came from.
pub struct SnapshotStore {
    path: PathBuf,
    current: Snapshot,
}

impl SnapshotStore {
    /// Read and parse the snapshot file once at startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let path = path.into();
        let current = read_snapshot(&path)?;
        Ok(Self { path, current })
    }

    /// Re-read the snapshot file, replacing the in-memory copy.
    pub fn refresh(&mut self) -> Result<(), SnapshotError> {
        self.current = read_snapshot(&self.path)?;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        users = snapshot.users.len(),
        groups = snapshot.groups.len(),
        member_rows = snapshot.group_members.values().map(Vec::len).sum::<usize>(),
        connections = snapshot.connections.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

//! Social connection graph and bounded-depth traversal.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::Connection;

/// Shortest hop-counts from a fixed source user. Entries beyond the depth
/// bound are absent, not infinite.
pub type DegreeMap = FxHashMap<i64, u32>;

/// Undirected adjacency over user ids. Every edge is inserted both ways, so
/// adjacency is symmetric by construction; duplicate edges collapse into the
/// set.
#[derive(Debug, Default)]
pub struct SocialGraph {
    adjacency: FxHashMap<i64, FxHashSet<i64>>,
}

impl SocialGraph {
    /// Build the graph from pairwise connections. Edges missing either
    /// endpoint are skipped.
    pub fn build(connections: &[Connection]) -> Self {
        let mut adjacency: FxHashMap<i64, FxHashSet<i64>> = FxHashMap::default();
        for edge in connections {
            let (Some(a), Some(b)) = (edge.uid_a, edge.uid_b) else {
                continue;
            };
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        Self { adjacency }
    }

    pub fn neighbors(&self, uid: i64) -> impl Iterator<Item = i64> + '_ {
        self.adjacency.get(&uid).into_iter().flatten().copied()
    }

    pub fn contains(&self, uid: i64) -> bool {
        self.adjacency.contains_key(&uid)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

/// Breadth-first hop distances from `source`, bounded at `max_depth`.
///
/// The source is recorded at distance 0. A node sitting exactly at
/// `max_depth` is recorded but not expanded further. A `None` source yields
/// an empty map. O(V+E) within the depth bound.
pub fn bfs_degrees(graph: &SocialGraph, source: Option<i64>, max_depth: u32) -> DegreeMap {
    let Some(source) = source else {
        return DegreeMap::default();
    };

    let mut degrees = DegreeMap::default();
    degrees.insert(source, 0);
    let mut queue = VecDeque::from([(source, 0u32)]);

    while let Some((uid, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for next in graph.neighbors(uid) {
            if !degrees.contains_key(&next) {
                degrees.insert(next, depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: i64, b: i64) -> Connection {
        Connection {
            uid_a: Some(a),
            uid_b: Some(b),
        }
    }

    /// Chain 1-2-3-4-5 with a short branch off node 2.
    fn chain_graph() -> SocialGraph {
        SocialGraph::build(&[edge(1, 2), edge(2, 3), edge(3, 4), edge(4, 5), edge(2, 6)])
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = SocialGraph::build(&[edge(1, 2), edge(2, 3)]);
        assert!(graph.neighbors(1).any(|n| n == 2));
        assert!(graph.neighbors(2).any(|n| n == 1));
        assert!(graph.neighbors(2).any(|n| n == 3));
        assert!(graph.neighbors(3).any(|n| n == 2));
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let graph = SocialGraph::build(&[edge(1, 2), edge(1, 2), edge(2, 1)]);
        assert_eq!(graph.neighbors(1).count(), 1);
        assert_eq!(graph.neighbors(2).count(), 1);
    }

    #[test]
    fn test_null_endpoint_edges_skipped() {
        let graph = SocialGraph::build(&[
            Connection { uid_a: Some(1), uid_b: None },
            Connection { uid_a: None, uid_b: Some(2) },
            Connection { uid_a: None, uid_b: None },
            edge(3, 4),
        ]);
        assert!(!graph.contains(1));
        assert!(!graph.contains(2));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_source_at_distance_zero() {
        let degrees = bfs_degrees(&chain_graph(), Some(1), 10);
        assert_eq!(degrees.get(&1), Some(&0));
    }

    #[test]
    fn test_depth_bound_is_inclusive() {
        let degrees = bfs_degrees(&chain_graph(), Some(1), 2);
        // Node 3 sits exactly at the bound and is kept; node 4 is beyond it.
        assert_eq!(degrees.get(&3), Some(&2));
        assert_eq!(degrees.get(&4), None);
        assert!(degrees.values().all(|&d| d <= 2));
    }

    #[test]
    fn test_shortest_path_wins() {
        // Two routes to node 4: 1-2-3-4 and the shortcut 1-4.
        let graph = SocialGraph::build(&[edge(1, 2), edge(2, 3), edge(3, 4), edge(1, 4)]);
        let degrees = bfs_degrees(&graph, Some(1), 10);
        assert_eq!(degrees.get(&4), Some(&1));
    }

    #[test]
    fn test_absent_source_yields_empty_map() {
        assert!(bfs_degrees(&chain_graph(), None, 5).is_empty());
    }

    #[test]
    fn test_source_not_in_graph_is_alone() {
        let degrees = bfs_degrees(&chain_graph(), Some(99), 5);
        assert_eq!(degrees.len(), 1);
        assert_eq!(degrees.get(&99), Some(&0));
    }
}

//! Per-player connectivity graph over claimed cells.
//!
//! The graph only grows between resets: a move adds one vertex and links
//! it to the mover's already-owned neighbors. Which edges are legal is the
//! session's business; the graph stores whatever it is given.

use super::types::Coord;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, instrument};

/// Undirected graph whose vertices are cell coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityGraph {
    adjacency: HashMap<Coord, HashSet<Coord>>,
}

impl ConnectivityGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `v` with no neighbors. Does nothing if already present.
    pub fn add_vertex(&mut self, v: Coord) {
        self.adjacency.entry(v).or_default();
    }

    /// Links `a` and `b`, inserting either vertex if absent.
    ///
    /// Re-adding an existing edge is a no-op and `a == b` only inserts the
    /// vertex.
    pub fn add_edge(&mut self, a: Coord, b: Coord) {
        self.add_vertex(a);
        self.add_vertex(b);
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Returns true if `v` is a vertex.
    pub fn contains(&self, v: Coord) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Neighbors of `v`; empty if `v` is absent.
    pub fn neighbors(&self, v: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.adjacency.get(&v).into_iter().flatten().copied()
    }

    /// All vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = Coord> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    /// Returns true if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Breadth-first search for a path from `a` to `b`.
    ///
    /// Absent endpoints have no path. A present vertex always reaches
    /// itself.
    #[instrument(skip(self), fields(vertices = self.adjacency.len()))]
    pub fn path_exists(&self, a: Coord, b: Coord) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        if a == b {
            return true;
        }

        let mut visited = HashSet::with_capacity(self.adjacency.len());
        let mut frontier = VecDeque::new();
        visited.insert(a);
        frontier.push_back(a);

        while let Some(current) = frontier.pop_front() {
            for next in self.neighbors(current) {
                if next == b {
                    debug!(explored = visited.len(), "Path found");
                    return true;
                }
                if visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        debug!(explored = visited.len(), "No path");
        false
    }
}

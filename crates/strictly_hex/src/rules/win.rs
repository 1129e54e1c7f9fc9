//! Win detection for Hex.
//!
//! A player wins once a chain of their own tiles joins the two board
//! edges on their axis. The edges are the outermost lines, index `0` and
//! index `size - 1`.

use super::super::board::Board;
use super::super::graph::ConnectivityGraph;
use super::super::types::{Axis, Coord, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A player's owned tiles on each of their two edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Boundaries {
    /// Owned tiles on the `0` edge.
    pub start: Vec<Coord>,
    /// Owned tiles on the `size - 1` edge.
    pub goal: Vec<Coord>,
}

impl Boundaries {
    /// Collects `player`'s edge tiles from the current board.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn compute(board: &Board, player: PlayerId, axis: Axis) -> Self {
        let last = board.size() - 1;
        let mut boundaries = Self::default();
        for coord in board.owned_by(player) {
            let index = coord.along(axis);
            if index == 0 {
                boundaries.start.push(coord);
            }
            if index == last {
                boundaries.goal.push(coord);
            }
        }
        boundaries
    }

    /// Returns true if both edges hold at least one tile.
    pub fn both_touched(&self) -> bool {
        !self.start.is_empty() && !self.goal.is_empty()
    }
}

/// Two connected edge tiles witnessing a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Tile on the `0` edge.
    pub start: Coord,
    /// Tile on the `size - 1` edge.
    pub goal: Coord,
}

/// Finds a connected pair of edge tiles for `player`, if one exists.
///
/// Boundaries are recomputed on every call. The first connected pair
/// found is returned.
#[instrument(skip(graph, board), fields(vertices = graph.vertex_count()))]
pub fn winning_connection(
    graph: &ConnectivityGraph,
    player: PlayerId,
    axis: Axis,
    board: &Board,
) -> Option<Connection> {
    let boundaries = Boundaries::compute(board, player, axis);
    if !boundaries.both_touched() {
        debug!(
            start = boundaries.start.len(),
            goal = boundaries.goal.len(),
            "Edge not reached yet"
        );
        return None;
    }

    for &start in &boundaries.start {
        for &goal in &boundaries.goal {
            if graph.path_exists(start, goal) {
                debug!(%start, %goal, "Edges connected");
                return Some(Connection { start, goal });
            }
        }
    }
    None
}

/// Returns true if `player` has connected their edges.
pub fn has_won(graph: &ConnectivityGraph, player: PlayerId, axis: Axis, board: &Board) -> bool {
    winning_connection(graph, player, axis, board).is_some()
}

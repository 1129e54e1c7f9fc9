//! Graph consistency invariant: each graph mirrors its owner's tiles.

use super::super::{GameSession, PlayerId};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: every player's graph matches the board.
///
/// The vertex set equals the set of tiles the player owns, every edge
/// joins two hex-adjacent vertices, and every pair of adjacent owned tiles
/// is linked. A graph holding a tile from an earlier board generation
/// fails the first check.
pub struct GraphConsistentInvariant;

impl Invariant<GameSession> for GraphConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        PlayerId::ALL.into_iter().all(|seat| {
            let graph = session.graph(seat);
            let owned: HashSet<_> = board.owned_by(seat).collect();
            let vertices: HashSet<_> = graph.vertices().collect();
            if owned != vertices {
                return false;
            }
            owned.iter().all(|&v| {
                let linked: HashSet<_> = graph.neighbors(v).collect();
                let expected: HashSet<_> = board
                    .neighbors(v)
                    .filter(|n| board.owner(*n) == Some(seat))
                    .collect();
                linked == expected
            })
        })
    }

    fn description() -> &'static str {
        "Connectivity graphs match owned tiles and hex adjacency"
    }
}

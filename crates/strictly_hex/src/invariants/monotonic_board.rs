//! Monotonic board invariant: owners never change once set.

use super::super::{Board, GameSession};
use super::Invariant;

/// Invariant: tile owners are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board of the same size must
/// claim only empty cells and reproduce the current ownership exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameSession> for MonotonicBoardInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        let mut reconstructed = Board::new(board.board_size());

        for mov in session.history() {
            if reconstructed.assign(mov.coord, mov.player).is_err() {
                return false;
            }
        }

        reconstructed.tiles() == board.tiles()
    }

    fn description() -> &'static str {
        "Tile owners are monotonic (never overwritten)"
    }
}

//! First-class move and error types for Hex.
//!
//! A move records who claimed which cell. Errors classify every way a
//! request can be refused; all of them leave the session untouched.

use super::phases::Phase;
use super::types::{Coord, PlayerId};
use serde::{Deserialize, Serialize};

/// A move: a player claiming a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{player} -> {coord}")]
pub struct Move {
    /// The player making the move.
    pub player: PlayerId,
    /// The claimed cell.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: PlayerId, coord: Coord) -> Self {
        Self { player, coord }
    }
}

/// Error raised by board, session or configuration operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum HexError {
    /// The cell already has an owner.
    #[display("Cell {} is already owned", _0)]
    IllegalMove(Coord),

    /// The coordinates fall outside the grid.
    #[display("No cell at ({}, {})", row, col)]
    NotFound {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },

    /// The requested board size is outside the supported range.
    #[display("Board size {} is outside 4..=19", size)]
    InvalidConfiguration {
        /// Requested size.
        size: usize,
    },

    /// Moves are only accepted while the game is in progress.
    #[display("Game is not in progress ({})", _0)]
    NotInProgress(Phase),

    /// An internal invariant failed after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for HexError {}

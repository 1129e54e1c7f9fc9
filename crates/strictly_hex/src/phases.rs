//! Session phases and move results.

use super::rules::Connection;
use super::types::{Coord, PlayerId};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Configured, board empty, not accepting moves yet.
    #[strum(to_string = "setup")]
    Setup,
    /// Accepting moves.
    #[strum(to_string = "in progress")]
    InProgress,
    /// A player has connected their edges.
    #[strum(to_string = "game over")]
    GameOver,
}

/// What happened after a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// No win yet; `next` is to move.
    Continue {
        /// The claimed cell.
        claimed: Coord,
        /// Player to move next.
        next: PlayerId,
    },
    /// The mover connected their edges.
    Won {
        /// The claimed cell.
        claimed: Coord,
        /// The winning player.
        winner: PlayerId,
        /// A boundary pair proving the connection.
        connection: Connection,
    },
}

impl MoveOutcome {
    /// The cell claimed by the move.
    pub fn claimed(&self) -> Coord {
        match self {
            MoveOutcome::Continue { claimed, .. } | MoveOutcome::Won { claimed, .. } => *claimed,
        }
    }

    /// The winner, if the move ended the game.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MoveOutcome::Won { winner, .. } => Some(*winner),
            MoveOutcome::Continue { .. } => None,
        }
    }
}

//! Contract-based validation for Hex moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Preconditions always run; postconditions run in debug
//! builds.

use super::action::{HexError, Move};
use super::invariants::{HexInvariants, InvariantSet};
use super::phases::Phase;
use super::session::GameSession;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), HexError>;

    /// Checks postconditions after applying the action.
    fn post(after: &S) -> Result<(), HexError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session accepts moves.
pub struct AcceptingMoves;

impl AcceptingMoves {
    /// Fails with [`HexError::NotInProgress`] outside `InProgress`.
    pub fn check(session: &GameSession) -> Result<(), HexError> {
        match session.phase() {
            Phase::InProgress => Ok(()),
            phase => Err(HexError::NotInProgress(phase)),
        }
    }
}

/// Precondition: the target cell is unowned.
///
/// The coordinate is expected to come from [`crate::Board::coord`], which
/// already rejects cells off the board.
pub struct CellIsFree;

impl CellIsFree {
    /// Fails with [`HexError::IllegalMove`] for an owned cell.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), HexError> {
        match session.board().owner(mov.coord) {
            None => Ok(()),
            Some(_) => Err(HexError::IllegalMove(mov.coord)),
        }
    }
}

/// Precondition: the mover is the seat to move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`HexError::InvariantViolation`] if the seat is wrong.
    ///
    /// Sessions always build moves for the current seat, so a failure here
    /// is a defect rather than bad input.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), HexError> {
        if mov.player == session.current_player() {
            Ok(())
        } else {
            Err(HexError::InvariantViolation(format!(
                "{} moved out of turn",
                mov.player
            )))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for claiming a cell.
///
/// The phase is gated by [`AcceptingMoves`] before the coordinate is
/// resolved, so the move preconditions assume a game in progress.
///
/// Preconditions:
/// - Cell is free
/// - Mover is the seat to move
///
/// Postconditions:
/// - Owners are monotonic
/// - Players alternate
/// - Graphs mirror the board
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), HexError> {
        CellIsFree::check(action, session)?;
        PlayersTurn::check(action, session)?;
        Ok(())
    }

    fn post(after: &GameSession) -> Result<(), HexError> {
        HexInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            HexError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

//! Alternating turn invariant: the seats take turns, row player first.

use super::super::{Axis, GameSession, Phase};
use super::Invariant;

/// Invariant: players alternate turns.
///
/// The history starts with the row-axis player and never shows the same
/// seat twice in a row. While the game is in progress the seat to move is
/// the one after the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        let opener = session.seat_with_axis(Axis::Row);

        let Some(first) = history.first() else {
            return session.phase() != Phase::InProgress || session.current_player() == opener;
        };
        if first.player != opener {
            return false;
        }
        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        match (session.phase(), history.last()) {
            (Phase::InProgress, Some(last)) => session.current_player() == last.player.opponent(),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns, row-axis player first"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, PlayerId, SessionConfig, StartOptions, Coord};

    fn started() -> GameSession {
        let mut session = GameSession::new(SessionConfig::default());
        session.start(StartOptions::default().size(5));
        session
    }

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&started()));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut session = started();
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            session.apply_move(row, col).unwrap();
        }
        assert!(AlternatingTurnInvariant::holds(&session));
        assert_eq!(session.current_player(), PlayerId::Second);
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut session = started();
        session.apply_move(0, 0).unwrap();
        session.history.push(Move::new(PlayerId::First, Coord::new(4, 4)));
        assert!(!AlternatingTurnInvariant::holds(&session));
    }

    #[test]
    fn test_wrong_seat_to_move_violates() {
        let mut session = started();
        session.apply_move(0, 0).unwrap();
        session.current = PlayerId::First;
        assert!(!AlternatingTurnInvariant::holds(&session));
    }
}

//! Traits for the front-ends that drive a session.
//!
//! A front-end turns clicks or keystrokes into `(row, col)` moves, draws
//! what the session reports through [`Renderer`], and answers the
//! session's questions through [`Prompter`].

use super::types::{Color, Coord, Player, PlayerId};

/// Receives notifications about what to draw.
pub trait Renderer {
    /// A tile was claimed and should be painted `color`.
    fn tile_claimed(&mut self, coord: Coord, color: Color);

    /// `winner` connected their edges.
    fn game_won(&mut self, winner: PlayerId, player: &Player);

    /// A new empty board of `size` replaced the previous one.
    fn board_reset(&mut self, _size: usize) {}
}

/// Answers questions asked by the session.
///
/// Every method returns `None` when the user cancels. The session never
/// treats a cancellation as an error; it keeps the default instead.
pub trait Prompter {
    /// Asks whether to start a new game.
    fn confirm_restart(&mut self) -> Option<bool>;

    /// Asks for the display name of `seat`, suggesting `default`.
    fn player_name(&mut self, seat: PlayerId, default: &str) -> Option<String>;

    /// Asks for the board edge length, suggesting `default`.
    fn board_size(&mut self, default: usize) -> Option<usize>;
}

/// A renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn tile_claimed(&mut self, _coord: Coord, _color: Color) {}

    fn game_won(&mut self, _winner: PlayerId, _player: &Player) {}
}

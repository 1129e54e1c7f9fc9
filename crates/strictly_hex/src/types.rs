//! Core domain types for Hex.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell address on the board, `(row, col)`.
///
/// Coordinates are plain values. Two tiles are the same cell exactly when
/// their coordinates are equal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, `0..size`.
    pub row: usize,
    /// Column index, `0..size`.
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the coordinate measured along `axis`.
    pub fn along(self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Col => self.col,
        }
    }
}

/// One of the two seats at the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum PlayerId {
    /// First seat (connects along rows, moves first).
    #[strum(to_string = "first")]
    First,
    /// Second seat (connects along columns).
    #[strum(to_string = "second")]
    Second,
}

impl PlayerId {
    /// Both seats in seating order.
    pub const ALL: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// Index of this seat into two-element arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }
}

/// The direction a player has to connect across.
///
/// A `Row` player links row `0` to row `size - 1`; a `Col` player links
/// column `0` to column `size - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Connect the top edge to the bottom edge.
    #[strum(to_string = "row")]
    Row,
    /// Connect the left edge to the right edge.
    #[strum(to_string = "col")]
    Col,
}

/// An RGB display color handed to renderers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Red, the first seat's default.
    pub const RED: Color = Color::rgb(220, 40, 40);
    /// Blue, the second seat's default.
    pub const BLUE: Color = Color::rgb(40, 80, 220);

    /// Creates a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A participant: display name, color and winning axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Player {
    /// Name shown in prompts and results.
    name: String,
    /// Color used to paint claimed tiles.
    color: Color,
    /// Edges this player must connect.
    axis: Axis,
}

impl Player {
    /// Creates a new player.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, color: Color, axis: Axis) -> Self {
        Self {
            name: name.as_ref().to_string(),
            color,
            axis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(PlayerId::First.opponent(), PlayerId::Second);
        assert_eq!(PlayerId::Second.opponent().opponent(), PlayerId::Second);
    }

    #[test]
    fn test_coord_along_axis() {
        let coord = Coord::new(2, 5);
        assert_eq!(coord.along(Axis::Row), 2);
        assert_eq!(coord.along(Axis::Col), 5);
    }

    #[test]
    fn test_color_display_is_hex() {
        assert_eq!(Color::rgb(255, 0, 16).to_string(), "#ff0010");
    }
}

//! Game rules for Hex.
//!
//! Pure functions over the board and a player's connectivity graph. Rules
//! are kept apart from the session so they can be checked in isolation.

pub mod win;

pub use win::{Boundaries, Connection, has_won, winning_connection};

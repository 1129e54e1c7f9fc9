//! Strictly Hex - rules engine for the Hex connection game
//!
//! Owns board state, move legality, a per-player connectivity graph over
//! claimed cells, and win detection between opposite board edges.
//! Drawing, hit-testing and dialogs belong to front-ends, which talk to
//! the engine through [`Renderer`] and [`Prompter`].
//!
//! # Architecture
//!
//! - **Board**: flat `size × size` tile store with hex adjacency
//! - **ConnectivityGraph**: one per player, grows with every move
//! - **Rules**: stateless edge-to-edge win check
//! - **GameSession**: turn and lifecycle state machine
//!
//! # Example
//!
//! ```
//! use strictly_hex::{GameSession, MoveOutcome, SessionConfig, StartOptions};
//!
//! let mut session = GameSession::new(SessionConfig::default());
//! session.start(StartOptions::default().size(4));
//!
//! let outcome = session.apply_move(0, 0)?;
//! assert!(matches!(outcome, MoveOutcome::Continue { .. }));
//! # Ok::<(), strictly_hex::HexError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod collaborator;
mod config;
mod graph;
mod phases;
mod session;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Core types
pub use types::{Axis, Color, Coord, Player, PlayerId};

// Crate-level exports - Moves and errors
pub use action::{HexError, Move};

// Crate-level exports - Board
pub use board::{Board, BoardSize, HEX_OFFSETS, Tile};

// Crate-level exports - Connectivity
pub use graph::ConnectivityGraph;
pub use rules::{Boundaries, Connection, has_won, winning_connection};

// Crate-level exports - Session
pub use phases::{MoveOutcome, Phase};
pub use session::{GameSession, Snapshot, StartOptions, StartReport};

// Crate-level exports - Configuration
pub use config::{ConfigError, PlayerConfig, SessionConfig};

// Crate-level exports - Front-end seams
pub use collaborator::{NullRenderer, Prompter, Renderer};

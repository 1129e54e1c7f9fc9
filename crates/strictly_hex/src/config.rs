//! Session configuration: board size, player names and colors.

use super::board::BoardSize;
use super::types::{Color, PlayerId};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Name and color for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    name: String,
    /// Tile color.
    color: Color,
}

impl PlayerConfig {
    /// Creates a player configuration.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Placeholder configuration for a seat.
    pub fn placeholder(seat: PlayerId) -> Self {
        match seat {
            PlayerId::First => Self::new("Player 1", Color::RED),
            PlayerId::Second => Self::new("Player 2", Color::BLUE),
        }
    }
}

fn default_board_size() -> usize {
    BoardSize::DEFAULT.get()
}

fn default_first() -> PlayerConfig {
    PlayerConfig::placeholder(PlayerId::First)
}

fn default_second() -> PlayerConfig {
    PlayerConfig::placeholder(PlayerId::Second)
}

/// Configuration for a game session.
///
/// The first seat always connects rows and the second seat columns;
/// only names, colors and the board size are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Requested board edge length.
    #[serde(default = "default_board_size")]
    #[getter(skip)]
    board_size: usize,

    /// First seat.
    #[serde(default = "default_first")]
    first: PlayerConfig,

    /// Second seat.
    #[serde(default = "default_second")]
    second: PlayerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            first: default_first(),
            second: default_second(),
        }
    }
}

impl SessionConfig {
    /// Creates the default configuration (11×11, placeholder players).
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the board size, falling back to the default when out of range.
    #[instrument(skip(self))]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = validated_size(size).get();
        self
    }

    /// Sets a seat's display name.
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub fn with_name(mut self, seat: PlayerId, name: impl AsRef<str>) -> Self {
        self.player_mut(seat).name = name.as_ref().to_string();
        self
    }

    /// Sets a seat's tile color.
    #[instrument(skip(self))]
    pub fn with_color(mut self, seat: PlayerId, color: Color) -> Self {
        self.player_mut(seat).color = color;
        self
    }

    /// Validated board size.
    pub fn board_size(&self) -> BoardSize {
        validated_size(self.board_size)
    }

    /// Configuration for `seat`.
    pub fn player(&self, seat: PlayerId) -> &PlayerConfig {
        match seat {
            PlayerId::First => &self.first,
            PlayerId::Second => &self.second,
        }
    }

    fn player_mut(&mut self, seat: PlayerId) -> &mut PlayerConfig {
        match seat {
            PlayerId::First => &mut self.first,
            PlayerId::Second => &mut self.second,
        }
    }

    pub(crate) fn set_board_size(&mut self, size: BoardSize) {
        self.board_size = size.get();
    }

    pub(crate) fn set_name(&mut self, seat: PlayerId, name: String) {
        self.player_mut(seat).name = name;
    }

    /// Parses configuration from TOML text.
    ///
    /// Missing fields take their defaults. An out-of-range board size is
    /// replaced with the default.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        let size = config.board_size();
        Ok(Self {
            board_size: size.get(),
            ..config
        })
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            board_size = config.board_size,
            first = %config.first.name,
            second = %config.second.name,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

fn validated_size(size: usize) -> BoardSize {
    BoardSize::new(size).unwrap_or_else(|err| {
        warn!(%err, fallback = %BoardSize::DEFAULT, "Using default board size");
        BoardSize::DEFAULT
    })
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.board_size().get(), 11);
        assert_eq!(config.player(PlayerId::First).name(), "Player 1");
        assert_eq!(config.player(PlayerId::Second).color(), &Color::BLUE);
    }

    #[test]
    fn test_builder_falls_back_on_bad_size() {
        let config = SessionConfig::new().with_board_size(25);
        assert_eq!(config.board_size(), BoardSize::DEFAULT);
        let config = SessionConfig::new().with_board_size(7);
        assert_eq!(config.board_size().get(), 7);
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml(
            r#"
            board_size = 9

            [second]
            name = "Bea"
            color = { r = 0, g = 128, b = 0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.board_size().get(), 9);
        assert_eq!(config.player(PlayerId::First).name(), "Player 1");
        assert_eq!(config.player(PlayerId::Second).name(), "Bea");
        assert_eq!(config.player(PlayerId::Second).color(), &Color::rgb(0, 128, 0));
    }

    #[test]
    fn test_toml_out_of_range_size_uses_default() {
        let config = SessionConfig::from_toml("board_size = 2").unwrap();
        assert_eq!(config.board_size(), BoardSize::DEFAULT);
    }

    #[test]
    fn test_malformed_toml() {
        let err = SessionConfig::from_toml("board_size = \"big\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }
}

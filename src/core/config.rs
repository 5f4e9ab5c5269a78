//! Match configuration.
//!
//! The menu collaborator picks a player count (and optionally colors)
//! and hands a `MatchConfig` to the match controller. The grid itself
//! is fixed at 8x8 and not configurable.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest supported roster.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported roster when colors are given explicitly.
pub const MAX_PLAYERS: usize = 8;

/// RGB display color of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Red.
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Blue.
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Green.
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Yellow.
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Create a color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors handed out in turn order when none are given.
pub const DEFAULT_PALETTE: [Color; 4] = [Color::RED, Color::BLUE, Color::GREEN, Color::YELLOW];

/// Roster configuration for a match.
///
/// ```
/// use chain_reaction::core::{Color, MatchConfig};
///
/// let config = MatchConfig::new(3).unwrap();
/// assert_eq!(config.player_count(), 3);
/// assert_eq!(config.colors()[2], Color::GREEN);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    colors: Vec<Color>,
}

impl MatchConfig {
    /// Configure `player_count` players using the default palette.
    pub fn new(player_count: usize) -> Result<Self, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount { count: player_count });
        }
        if player_count > DEFAULT_PALETTE.len() {
            return Err(ConfigError::PaletteExhausted { count: player_count });
        }
        Ok(Self {
            colors: DEFAULT_PALETTE[..player_count].to_vec(),
        })
    }

    /// Configure one player per color, in turn order.
    pub fn with_colors(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&colors.len()) {
            return Err(ConfigError::PlayerCount { count: colors.len() });
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(ConfigError::DuplicateColor(*color));
            }
        }
        Ok(Self { colors })
    }

    /// The menu's `configure(player_count, colors)` command: default
    /// palette without colors, otherwise exactly one color per player.
    pub fn for_roster(player_count: usize, colors: Option<Vec<Color>>) -> Result<Self, ConfigError> {
        match colors {
            None => Self::new(player_count),
            Some(colors) if colors.len() != player_count => Err(ConfigError::ColorCountMismatch {
                players: player_count,
                colors: colors.len(),
            }),
            Some(colors) => Self::with_colors(colors),
        }
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.colors.len()
    }

    /// Colors in turn order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE[..MIN_PLAYERS].to_vec(),
        }
    }
}

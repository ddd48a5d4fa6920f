//! Player identity and colours.
//!
//! Ownership of board structures is recorded by `PlayerId`; the renderer tints
//! claimed pieces with the player's `PlayerColor`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier
pub type PlayerId = u8;

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    White,
    Orange,
    Red,
    Blue,
    Green,
    Brown,
}

impl PlayerColor {
    /// Seat order of the default palette
    pub const ALL: [PlayerColor; 6] = [
        PlayerColor::White,
        PlayerColor::Orange,
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Brown,
    ];

    /// Get color for a player index, wrapping past the end of the palette
    pub fn for_player(id: PlayerId) -> Self {
        Self::ALL[usize::from(id) % Self::ALL.len()]
    }

    /// Get hex color code for rendering
    pub fn hex_code(&self) -> u32 {
        match self {
            PlayerColor::White => 0xEEEEEE,
            PlayerColor::Orange => 0xFF8C11,
            PlayerColor::Red => 0xDD1111,
            PlayerColor::Blue => 0x1111DD,
            PlayerColor::Green => 0x2E6F40,
            PlayerColor::Brown => 0x895129,
        }
    }

    /// `#rrggbb` form for style sheets
    pub fn css_string(&self) -> String {
        format!("#{:06x}", self.hex_code())
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::White => "white",
            PlayerColor::Orange => "orange",
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Brown => "brown",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

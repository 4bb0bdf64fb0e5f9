use serde::{Deserialize, Serialize};

use crate::*;

/// Face on the restart button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Smile,
    Cool,
    Dead,
}

impl Face {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Smile => "🙂",
            Self::Cool => "😎",
            Self::Dead => "😵",
        }
    }
}

impl From<GameState> for Face {
    fn from(state: GameState) -> Self {
        match state {
            GameState::Playing => Self::Smile,
            GameState::Won => Self::Cool,
            GameState::Lost => Self::Dead,
        }
    }
}

/// Highest value the time counter shows.
pub const COUNTER_MAX: u32 = 999;

/// Mines-left counter, padded to three characters but otherwise unclamped, so `-1` shows up
/// as `0-1` and `-120` as `-120`.
pub fn format_mines_counter(mines_left: i32) -> String {
    format!("{:0>3}", mines_left)
}

/// Time counter, saturates at 999.
pub fn format_time_counter(seconds: u32) -> String {
    format!("{:03}", seconds.min(COUNTER_MAX))
}

pub const fn status_message(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Playing => None,
        GameState::Won => Some("You Won!"),
        GameState::Lost => Some("Game Over!"),
    }
}

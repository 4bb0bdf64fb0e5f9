//! Board engine for an embeddable minesweeper widget.
//!
//! [`Minesweeper`] holds the game and takes two collaborators from the host: a
//! [`Stopwatch`] and a [`HighScoreStore`]. The host feeds it clicks and reads back a
//! [`Board`] to draw.

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use display::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use scores::*;
pub use settings::*;
pub use stopwatch::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod display;
mod engine;
mod error;
mod generator;
mod layout;
mod scores;
mod settings;
mod stopwatch;
mod types;

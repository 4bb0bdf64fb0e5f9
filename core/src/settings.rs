use serde::{Deserialize, Serialize};

use crate::*;

/// Engine configuration, every field optional in the TOML source.
///
/// ```toml
/// difficulty = "medium"
/// score_key_prefix = "minesweeper"
/// no_record = 999
/// seed = 1234
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty of the first board.
    pub difficulty: Difficulty,
    pub score_key_prefix: String,
    /// Best time assumed when the store has none.
    pub no_record: u32,
    /// Fixed seed for reproducible boards, fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            score_key_prefix: "minesweeper".to_owned(),
            no_record: NO_RECORD,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> core::result::Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn score_key(&self, difficulty: Difficulty) -> String {
        difficulty.score_key(&self.score_key_prefix)
    }
}

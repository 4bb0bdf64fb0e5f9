use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Generated layout does not match the requested board")]
    LayoutMismatch,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty {0:?}")]
pub struct UnknownDifficulty(pub String);

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

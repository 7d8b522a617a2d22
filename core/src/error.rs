use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine coordinates outside the board")]
    InvalidCoords,
    #[error("More mines than the board can hold")]
    TooManyMines,
    #[error("Board dimensions must be positive")]
    EmptyBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;

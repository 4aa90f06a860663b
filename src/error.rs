use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("cannot parse move '{0}'")]
    BadMoveText(String),
    #[error("FEN error: {0}")]
    InvalidFen(String),
    #[error("no move to undo")]
    EmptyHistory,
    #[error("the game is over")]
    GameOver,
    #[error("it is not the human player's turn")]
    NotYourTurn,
    #[error("difficulty must be between {min} and {max}, got {got}")]
    InvalidDifficulty { got: u32, min: u32, max: u32 },
    #[error("player color can only be changed before the first move")]
    ColorLocked,
    #[error("invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

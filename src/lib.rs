// Human vs. computer chess: fixed-depth alpha-beta search over a cozy-chess board
pub mod board;
pub mod error;
pub mod game;
pub mod search;
pub mod uci;

pub use error::{EngineError, Result};

use std::fmt;

use cozy_chess::{Color, Move, Piece, Square};

use crate::error::Result;

pub mod cozy;

/// Query and mutation interface the search engine needs from a rules engine.
///
/// Implementations own the position. The searcher only ever walks one path of the
/// game tree at a time, so every `apply_move` is paired with exactly one `undo_move`.
pub trait RulesEngine {
    fn side_to_move(&self) -> Color;
    /// Legal moves for the side to move, in the engine's own order.
    fn legal_moves(&self) -> Vec<Move>;
    /// Plays `mv`. A pawn reaching the last rank always promotes to a queen.
    fn apply_move(&mut self, mv: Move) -> Result<()>;
    /// Takes back the most recently applied move and returns it.
    fn undo_move(&mut self) -> Result<Move>;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    /// Checkmate, stalemate, insufficient material, 75-move rule or fivefold repetition.
    fn is_game_over(&self) -> bool;
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
    Resignation { winner: Color },
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate { winner } | Outcome::Resignation { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN style result string.
    pub fn result(&self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Checkmate { winner } => write!(f, "{} wins by checkmate!", color_name(winner)),
            Outcome::Stalemate => write!(f, "Draw by stalemate!"),
            Outcome::InsufficientMaterial => write!(f, "Draw by insufficient material!"),
            Outcome::SeventyFiveMoves => write!(f, "Draw by 75-move rule!"),
            Outcome::FivefoldRepetition => write!(f, "Draw by fivefold repetition!"),
            Outcome::Resignation { winner } => {
                write!(f, "{} resigned. {} wins!", color_name(!winner), color_name(winner))
            }
        }
    }
}

use cozy_chess::{Color, Piece, Square};

use crate::board::RulesEngine;
use crate::search::pst;

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
const KING: i32 = 20_000;

// Terminal scores, White's point of view.
pub const MATE_SCORE: i32 = 10_000;
pub const DRAW_SCORE: i32 = 0;

pub const fn material_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

/// Same file, rank r ↔ rank 7 - r.
pub fn mirror(square: Square) -> Square {
    Square::index(square as usize ^ 0b111_000)
}

// Tables are laid out rank 8 first; cozy squares count from a1.
fn table_index(square: Square, color: Color) -> usize {
    let file = square.file() as usize;
    let rank = square.rank() as usize;
    match color {
        Color::White => (7 - rank) * 8 + file,
        Color::Black => rank * 8 + file,
    }
}

/// Piece-square bonus for `piece` of `color` on `square`.
///
/// Row 0 of every table is rank 8 from White's side, so White reads rows top-down
/// (`a8` is index 0) and Black reads the mirrored square. This is deliberately not the
/// a1-first indexing some table-driven engines use; a White pawn on d2 gets the -20
/// of the second-to-last row, not the entry at index 11.
pub fn table_value(piece: Piece, square: Square, color: Color) -> i32 {
    pst::table(piece)[table_index(square, color)]
}

/// Loose bound on `|evaluate|`: sixteen kings' worth of every piece plus the largest
/// table entry on every square.
pub const SCORE_BOUND: i32 = (KING + PAWN + KNIGHT + BISHOP + ROOK + QUEEN) * 16 + pst::max_abs_entry() * 64;

/// Material plus piece-square score, positive when White is better.
pub fn eval_cp<P: RulesEngine + ?Sized>(pos: &P) -> i32 {
    let mut value = 0;
    for square in Square::ALL {
        if let Some((piece, color)) = pos.piece_at(square) {
            let v = material_value(piece) + table_value(piece, square, color);
            match color {
                Color::White => value += v,
                Color::Black => value -= v,
            }
        }
    }
    value
}

/// Static evaluation with terminal scoring.
///
/// The side to move being mated scores `-MATE_SCORE` for White and `MATE_SCORE`
/// for Black. Stalemate and dead positions score `DRAW_SCORE`.
pub fn evaluate<P: RulesEngine + ?Sized>(pos: &P) -> i32 {
    if pos.is_checkmate() {
        return match pos.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if pos.is_stalemate() || pos.is_insufficient_material() {
        return DRAW_SCORE;
    }
    eval_cp(pos)
}

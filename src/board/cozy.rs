use cozy_chess::{BitBoard, Board as CozyBoard, Color, File, Move, Piece, Rank, Square};

use crate::board::{Outcome, RulesEngine};
use crate::error::{EngineError, Result};

// Draw thresholds for the automatic (unclaimed) draw rules.
const SEVENTY_FIVE_MOVE_PLIES: usize = 150;
const FIVEFOLD: usize = 5;

/// cozy-chess board with an undo stack.
///
/// cozy-chess has no unmake, so every applied move pushes the previous board.
/// The board's own halfmove clock saturates at 100, so plies since the last pawn
/// move or capture are counted here.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    reversible: usize,
    stack: Vec<Undo>,
}

#[derive(Clone, Debug)]
struct Undo {
    board: CozyBoard,
    reversible: usize,
    mv: Move,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), reversible: 0, stack: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { reversible: b.halfmove_clock() as usize, board: b, stack: Vec::with_capacity(128) })
            .map_err(|e| EngineError::InvalidFen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn hash(&self) -> u64 { self.board.hash() }

    /// Number of moves applied since this position was created.
    pub fn ply(&self) -> usize { self.stack.len() }

    /// Plies since the last pawn move or capture.
    pub fn reversible_plies(&self) -> usize { self.reversible }

    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|moves| !moves.is_empty())
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.legal_moves().into_iter().filter(|m| m.from == from).collect()
    }

    /// Promotes to a queen whenever a pawn lands on the last rank.
    fn force_queen(&self, mut mv: Move) -> Move {
        let last_rank = mv.to.rank() == Rank::First || mv.to.rank() == Rank::Eighth;
        if last_rank && self.board.piece_on(mv.from) == Some(Piece::Pawn) {
            mv.promotion = Some(Piece::Queen);
        }
        mv
    }

    /// UCI text for a legal move; castling is shown as the king's two-square step.
    pub fn move_to_uci(&self, mv: Move) -> String {
        let mut shown = mv;
        let is_king = self.board.piece_on(mv.from) == Some(Piece::King);
        if is_king && self.board.color_on(mv.to) == self.board.color_on(mv.from) {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
            shown.to = Square::new(file, mv.from.rank());
        }
        format!("{}", shown)
    }

    /// Resolves UCI text to a legal move. A pawn move to the last rank becomes a
    /// queen promotion whatever suffix was typed.
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        let text = text.trim().to_ascii_lowercase();
        if text.parse::<Move>().is_err() {
            return Err(EngineError::BadMoveText(text));
        }
        let squares = &text[..4];
        self.legal_moves()
            .into_iter()
            .find(|&m| {
                let uci = self.move_to_uci(m);
                let native = format!("{}", m);
                uci == text || native == text || (m.promotion.is_some() && (&uci[..4] == squares))
            })
            .ok_or(EngineError::IllegalMove(text))
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<()> {
        let mv = self.parse_move(mv_uci)?;
        self.apply_move(mv)
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.reversible >= SEVENTY_FIVE_MOVE_PLIES && self.has_legal_moves()
    }

    /// Current position occurred at least five times since the last irreversible move.
    pub fn is_fivefold_repetition(&self) -> bool {
        let key = self.board.hash();
        let earlier = self.stack.iter().rev().take(self.reversible).filter(|u| u.board.hash() == key).count();
        earlier + 1 >= FIVEFOLD
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            return Some(Outcome::Checkmate { winner: !self.board.side_to_move() });
        }
        if self.is_insufficient_material() { return Some(Outcome::InsufficientMaterial); }
        if self.is_stalemate() { return Some(Outcome::Stalemate); }
        if self.is_seventyfive_moves() { return Some(Outcome::SeventyFiveMoves); }
        if self.is_fivefold_repetition() { return Some(Outcome::FivefoldRepetition); }
        None
    }

    fn has_insufficient_material(&self, color: Color) -> bool {
        let b = &self.board;
        let ours = b.colors(color);
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !(ours & heavy).is_empty() { return false; }
        if !(ours & b.pieces(Piece::Knight)).is_empty() {
            // Lone knight, and the opponent has nothing that could block its own king in.
            let blockers = b.pieces(Piece::Pawn) | b.pieces(Piece::Knight) | b.pieces(Piece::Bishop) | b.pieces(Piece::Rook);
            return ours.len() <= 2 && (b.colors(!color) & blockers).is_empty();
        }
        let bishops = b.pieces(Piece::Bishop);
        if !(ours & bishops).is_empty() {
            let no_pawns_or_knights = (b.pieces(Piece::Pawn) | b.pieces(Piece::Knight)).is_empty();
            return same_square_color(bishops) && no_pawns_or_knights;
        }
        true
    }
}

fn same_square_color(bb: BitBoard) -> bool {
    let mut shades = bb.into_iter().map(|sq| (sq.file() as usize + sq.rank() as usize) % 2);
    match shades.next() {
        Some(first) => shades.all(|s| s == first),
        None => true,
    }
}

impl RulesEngine for Position {
    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|ml| {
            for m in ml {
                if m.promotion.map_or(true, |p| p == Piece::Queen) { moves.push(m); }
            }
            false
        });
        moves
    }

    fn apply_move(&mut self, mv: Move) -> Result<()> {
        let mv = self.force_queen(mv);
        if !self.board.is_legal(mv) {
            return Err(EngineError::IllegalMove(format!("{} in {}", mv, self.fen())));
        }
        let zeroing = self.board.piece_on(mv.from) == Some(Piece::Pawn)
            || self.board.color_on(mv.to) == Some(!self.board.side_to_move());
        self.stack.push(Undo { board: self.board.clone(), reversible: self.reversible, mv });
        self.reversible = if zeroing { 0 } else { self.reversible + 1 };
        self.board.play_unchecked(mv);
        Ok(())
    }

    fn undo_move(&mut self) -> Result<Move> {
        let undo = self.stack.pop().ok_or(EngineError::EmptyHistory)?;
        self.board = undo.board;
        self.reversible = undo.reversible;
        Ok(undo.mv)
    }

    fn is_checkmate(&self) -> bool { self.is_check() && !self.has_legal_moves() }

    fn is_stalemate(&self) -> bool { !self.is_check() && !self.has_legal_moves() }

    fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(Color::White) && self.has_insufficient_material(Color::Black)
    }

    fn is_game_over(&self) -> bool { self.outcome().is_some() }

    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        Some((self.board.piece_on(square)?, self.board.color_on(square)?))
    }
}

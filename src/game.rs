use std::fmt::Write as _;
use std::path::Path;

use cozy_chess::{Color, Move, Piece, Square};
use log::info;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::board::{color_name, Outcome, RulesEngine};
use crate::error::{EngineError, Result};
use crate::search::alphabeta::{SearchResult, Searcher};
use crate::search::eval::evaluate;

pub const MIN_DIFFICULTY: u32 = 1;
pub const MAX_DIFFICULTY: u32 = 5;
pub const DEFAULT_DIFFICULTY: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    White,
    Black,
}

impl From<PlayerColor> for Color {
    fn from(c: PlayerColor) -> Self {
        match c {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Search depth in plies.
    pub difficulty: u32,
    pub player_color: PlayerColor,
    pub show_legal_moves: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { difficulty: DEFAULT_DIFFICULTY, player_color: PlayerColor::White, show_legal_moves: true }
    }
}

impl GameSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text).map_err(|e| EngineError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Settings(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> { check_difficulty(self.difficulty) }
}

fn check_difficulty(level: u32) -> Result<()> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
        Ok(())
    } else {
        Err(EngineError::InvalidDifficulty { got: level, min: MIN_DIFFICULTY, max: MAX_DIFFICULTY })
    }
}

/// One human vs. computer game.
pub struct GameSession {
    initial: Position,
    position: Position,
    settings: GameSettings,
    searcher: Searcher,
    history: Vec<String>,
    last_move: Option<Move>,
    resigned: Option<Outcome>,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Result<Self> {
        Self::with_position(settings, Position::startpos())
    }

    pub fn with_position(settings: GameSettings, position: Position) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            initial: position.clone(),
            position,
            settings,
            searcher: Searcher::default(),
            history: Vec::new(),
            last_move: None,
            resigned: None,
        })
    }

    pub fn position(&self) -> &Position { &self.position }
    pub fn settings(&self) -> &GameSettings { &self.settings }
    pub fn history(&self) -> &[String] { &self.history }
    pub fn last_move(&self) -> Option<Move> { self.last_move }
    pub fn human_color(&self) -> Color { self.settings.player_color.into() }

    pub fn set_difficulty(&mut self, level: u32) -> Result<()> {
        check_difficulty(level)?;
        self.settings.difficulty = level;
        Ok(())
    }

    pub fn set_player_color(&mut self, color: PlayerColor) -> Result<()> {
        if !self.history.is_empty() { return Err(EngineError::ColorLocked); }
        self.settings.player_color = color;
        Ok(())
    }

    pub fn toggle_show_legal_moves(&mut self) {
        self.settings.show_legal_moves = !self.settings.show_legal_moves;
    }

    pub fn outcome(&self) -> Option<Outcome> { self.resigned.or_else(|| self.position.outcome()) }

    pub fn in_progress(&self) -> bool { self.outcome().is_none() }

    pub fn is_ai_turn(&self) -> bool {
        self.in_progress() && self.position.side_to_move() != self.human_color()
    }

    /// Plays the human's move given as UCI text.
    pub fn play_human(&mut self, text: &str) -> Result<Move> {
        if !self.in_progress() { return Err(EngineError::GameOver); }
        if self.is_ai_turn() { return Err(EngineError::NotYourTurn); }
        let mv = self.position.parse_move(text)?;
        self.push(mv)?;
        Ok(mv)
    }

    /// Searches at the configured difficulty and plays the result, if any.
    pub fn play_ai(&mut self) -> Result<SearchResult> {
        if !self.in_progress() {
            return Ok(SearchResult { best_move: None, score: evaluate(&self.position), nodes: 0 });
        }
        if !self.is_ai_turn() { return Err(EngineError::NotYourTurn); }
        let res = self.searcher.search_depth(&mut self.position, self.settings.difficulty)?;
        if let Some(mv) = res.best_move {
            self.push(mv)?;
            info!("ai played {} (score {}, {} nodes)", self.history.last().map_or("", String::as_str), res.score, res.nodes);
        }
        Ok(res)
    }

    fn push(&mut self, mv: Move) -> Result<()> {
        let uci = self.position.move_to_uci(mv);
        self.position.apply_move(mv)?;
        self.history.push(uci);
        self.last_move = Some(mv);
        if let Some(outcome) = self.position.outcome() {
            info!("game over: {outcome}");
        }
        Ok(())
    }

    pub fn resign(&mut self) -> Result<Outcome> {
        if !self.in_progress() { return Err(EngineError::GameOver); }
        let outcome = Outcome::Resignation { winner: !self.human_color() };
        self.resigned = Some(outcome);
        info!("{outcome}");
        Ok(outcome)
    }

    pub fn new_game(&mut self) {
        self.position = self.initial.clone();
        self.history.clear();
        self.last_move = None;
        self.resigned = None;
    }

    /// Numbered move pairs, one per line: `1. e2e4 e7e5`.
    pub fn move_history_text(&self) -> String {
        self.history
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn status_text(&self) -> String {
        if let Some(outcome) = self.outcome() { return outcome.to_string(); }
        let check = if self.position.is_check() { "Check! " } else { "" };
        format!("{}{} to move", check, color_name(self.position.side_to_move()))
    }

    /// Target squares for the piece on `from`, if legal-move hints are enabled and
    /// the piece belongs to the side to move.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        if !self.settings.show_legal_moves { return Vec::new(); }
        self.position
            .legal_moves_from(from)
            .into_iter()
            .filter_map(|m| self.position.move_to_uci(m)[2..4].parse::<Square>().ok())
            .collect()
    }

    /// Plain-text board, rank 8 at the top, White in upper case.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let _ = write!(out, "{} ", rank + 1);
            for file in 0..8 {
                let sq = Square::index(rank * 8 + file);
                let c = match self.position.piece_at(sq) {
                    Some((piece, color)) => piece_char(piece, color),
                    None => '.',
                };
                out.push(c);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    if color == Color::White { c.to_ascii_uppercase() } else { c }
}

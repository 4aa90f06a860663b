use cozy_chess::{Color, Move};
use log::debug;

use crate::board::RulesEngine;
use crate::error::Result;
use crate::search::eval::evaluate;

pub const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    /// Alpha-beta cutoffs; off means a full-width minimax over the same tree.
    pub prune: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 3, prune: true } }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Moves are searched in the order the rules engine yields them, and only a strictly
/// better score replaces the current best move, so the earliest of equally scored
/// moves wins.
#[derive(Debug, Clone)]
pub struct Searcher {
    nodes: u64,
    prune: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self { nodes: 0, prune: true } }
}

impl Searcher {
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Best move for the side to move at `depth` plies.
    ///
    /// Returns no move when `depth` is 0 or the game is already over.
    pub fn search_depth<P: RulesEngine>(&mut self, pos: &mut P, depth: u32) -> Result<SearchResult> {
        let maximizing = pos.side_to_move() == Color::White;
        self.search(pos, depth, maximizing)
    }

    pub fn search_with_params<P: RulesEngine>(&mut self, pos: &mut P, params: SearchParams) -> Result<SearchResult> {
        self.prune = params.prune;
        let res = self.search_depth(pos, params.depth);
        self.prune = true;
        res
    }

    /// Minimax from the root with a full window. White maximizes, Black minimizes.
    pub fn search<P: RulesEngine>(&mut self, pos: &mut P, depth: u32, maximizing: bool) -> Result<SearchResult> {
        self.nodes = 0;
        let (score, best_move) = self.minimax(pos, depth, -INFINITY, INFINITY, maximizing)?;
        debug!(
            "search depth={} prune={} score={} best={:?} nodes={}",
            depth, self.prune, score, best_move.map(|m| m.to_string()), self.nodes
        );
        Ok(SearchResult { best_move, score, nodes: self.nodes })
    }

    fn minimax<P: RulesEngine>(
        &mut self,
        pos: &mut P,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<(i32, Option<Move>)> {
        self.nodes += 1;
        if depth == 0 || pos.is_game_over() {
            return Ok((evaluate(pos), None));
        }

        let mut best_move: Option<Move> = None;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for m in pos.legal_moves() {
            pos.apply_move(m)?;
            let child = self.minimax(pos, depth - 1, alpha, beta, !maximizing);
            pos.undo_move()?;
            let (score, _) = child?;

            if maximizing {
                if score > best { best = score; best_move = Some(m); }
                alpha = alpha.max(score);
            } else {
                if score < best { best = score; best_move = Some(m); }
                beta = beta.min(score);
            }
            if self.prune && beta <= alpha { break; }
        }
        Ok((best, best_move))
    }
}

//! Classical alpha-beta chess engine.
//!
//! Negamax search with iterative deepening, a transposition table,
//! quiescence, move-ordering heuristics, PVS, LMR and null-move
//! pruning, over a hand-written tapered evaluation.

mod eval;
mod pst;
mod search;
mod tt;

pub use eval::{CHECKMATE, DRAW, evaluate, game_phase, piece_value};
pub use search::{MAX_PLY, Search};
pub use tt::{Bound, TTEntry, TranspositionTable};

use engine_core::{Engine, Position, SearchLimits, SearchResult};

/// Alpha-beta engine behind the shared [`Engine`] seam.
#[derive(Default)]
pub struct AlphaBetaEngine {
    search: Search,
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self {
            search: Search::new(),
        }
    }

    /// Direct access to the last search's statistics.
    pub fn stats(&self) -> (u64, u8, i32) {
        (
            self.search.nodes_searched,
            self.search.depth_reached,
            self.search.last_score,
        )
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let mut root = pos.clone();
        let best = self.search.find_best_move(&mut root, &limits);

        SearchResult {
            best_move: (!best.is_null()).then_some(best),
            score: self.search.last_score,
            depth: self.search.depth_reached,
            nodes: self.search.nodes_searched,
            stopped: limits.time_control.is_stopped(),
        }
    }

    fn name(&self) -> &str {
        "alphabeta v1.0"
    }

    fn new_game(&mut self) {
        self.search.new_game();
    }
}

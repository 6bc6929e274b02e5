/*
 *  The tree-search strategy: alpha-beta minimax over half-plies with a
 *  transposition table, a board-score cache, symmetry pruning and an
 *  optional parallel root fan-out.
 */

pub mod abstract_move;
pub mod config;
pub mod evaluation;
pub(crate) mod minimax;
pub(crate) mod parallel;
pub mod persistence;
pub mod transposition;

pub mod prelude {
    pub use super::abstract_move::{AbstractMove, PlacementSpec, ScoredMove};
    pub use super::config::{EvaluationType, DEPTH_PENALTY, WIN_CONDITION_SCORE};
    pub use super::transposition::{TranspositionEntry, TranspositionTable};
    pub use super::TreeSearchStrategy;
}

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::game::prelude::*;
use crate::strategy::Strategy;
use abstract_move::{AbstractMove, ScoredMove};
use config::EvaluationType;
use evaluation::ScoreCache;
use minimax::{SearchContext, ALPHA_STARTING_VALUE, BETA_STARTING_VALUE};
use transposition::TranspositionTable;

/// The alpha-beta strategy. Owns every cache the search touches, so two
/// engines in one process never share hidden state.
pub struct TreeSearchStrategy {
    depth: u8,
    multiprocessing: bool,
    move_time_limit: Option<Duration>,
    transpositions: TranspositionTable,
    board_scores: ScoreCache,
}

impl TreeSearchStrategy {
    pub fn new(depth: u8) -> TreeSearchStrategy {
        TreeSearchStrategy {
            depth,
            multiprocessing: false,
            move_time_limit: None,
            transpositions: TranspositionTable::new(),
            board_scores: ScoreCache::new(),
        }
    }

    /// Fans the root search out over a worker pool.
    pub fn with_multiprocessing(mut self, enabled: bool) -> TreeSearchStrategy {
        self.multiprocessing = enabled;
        self
    }

    /// Bounds each move decision by wall-clock time.
    pub fn with_move_time_limit(mut self, limit: Duration) -> TreeSearchStrategy {
        self.move_time_limit = Some(limit);
        self
    }

    /// Loads persisted exact evaluations, unless the table is already warm.
    pub fn hydrate(&mut self) {
        persistence::hydrate_transposition_cache(&mut self.transpositions);
    }

    pub fn transpositions(&self) -> &TranspositionTable {
        &self.transpositions
    }

    pub fn board_scores(&self) -> &ScoreCache {
        &self.board_scores
    }

    /// Full search from the given position: the set of equally-best moves,
    /// their common score and the kind of bound the score is.
    pub fn get_best_moves(
        &mut self,
        game: &Game,
        player: PlayerId,
        opponent: PlayerId,
        is_first_move: bool,
        depth: u8,
    ) -> (Vec<AbstractMove>, i32, EvaluationType) {
        let deadline = self.move_time_limit.map(|limit| Instant::now() + limit);
        if self.multiprocessing {
            parallel::max_multiprocess(
                &mut self.transpositions,
                &mut self.board_scores,
                game,
                player,
                opponent,
                depth,
                is_first_move,
                deadline,
            )
        } else {
            let mut ctx = SearchContext {
                tt: &mut self.transpositions,
                scores: &mut self.board_scores,
                snapshot: None,
                deadline,
            };
            minimax::max(
                &mut ctx,
                game,
                player,
                opponent,
                depth,
                is_first_move,
                ALPHA_STARTING_VALUE,
                BETA_STARTING_VALUE,
            )
        }
    }

    /// Like [`TreeSearchStrategy::get_best_moves`], sampling one of the tied
    /// moves uniformly.
    pub fn get_best_move(
        &mut self,
        game: &Game,
        player: PlayerId,
        opponent: PlayerId,
        is_first_move: bool,
        depth: u8,
    ) -> ScoredMove {
        let (best_moves, score, _) = self.get_best_moves(game, player, opponent, is_first_move, depth);
        log::debug!("Found {} moves with score {}.", best_moves.len(), score);
        let mv = *best_moves
            .choose(&mut rand::thread_rng())
            .expect("the search always returns at least one candidate");
        ScoredMove { mv, score }
    }
}

impl Strategy for TreeSearchStrategy {
    fn choose(&mut self, game: &Game, player: PlayerId, is_first: bool) -> Option<PlacementMove> {
        if game.board.legal_placement_moves(player).is_empty() {
            return None;
        }
        let best_move = self.get_best_move(game, player, player.opponent(), is_first, self.depth);
        log::info!("Player {player} plays: {best_move}");
        best_move.to_placement_move(&game.board)
    }

    fn flush_caches(&mut self) {
        persistence::persist_transposition_cache(&self.transpositions);
    }
}

use std::time::Instant;

use rayon::prelude::*;

use crate::game::prelude::*;
use crate::search::abstract_move::{get_legal_abstract_moves, AbstractMove};
use crate::search::config::EvaluationType;
use crate::search::evaluation::ScoreCache;
use crate::search::minimax::{self, SearchContext, ALPHA_STARTING_VALUE, BETA_STARTING_VALUE};
use crate::search::transposition::TranspositionTable;

/// Root-level fan-out: every root move runs its own full-window child search
/// on a cloned game. Workers probe the pre-search table through a frozen
/// snapshot and write into private shards, which merge back once the pool
/// drains; the alpha/beta window is never shared between workers.
#[allow(clippy::too_many_arguments)]
pub(crate) fn max_multiprocess(
    tt: &mut TranspositionTable,
    scores: &mut ScoreCache,
    game: &Game,
    player: PlayerId,
    opponent: PlayerId,
    depth: u8,
    is_first_move: bool,
    deadline: Option<Instant>,
) -> (Vec<AbstractMove>, i32, EvaluationType) {
    let moves = get_legal_abstract_moves(&game.board, player, true);

    let snapshot: &TranspositionTable = tt;
    let results: Vec<(AbstractMove, i32, EvaluationType, TranspositionTable, ScoreCache)> = moves
        .into_par_iter()
        .map(|mv| {
            let mut shard_tt = TranspositionTable::new();
            let mut shard_scores = ScoreCache::new();
            let mut ctx = SearchContext {
                tt: &mut shard_tt,
                scores: &mut shard_scores,
                snapshot: Some(snapshot),
                deadline,
            };
            let (score, kind) = minimax::descend_max(
                &mut ctx,
                game,
                mv,
                player,
                opponent,
                depth,
                is_first_move,
                ALPHA_STARTING_VALUE,
                BETA_STARTING_VALUE,
            );
            (mv, score, kind, shard_tt, shard_scores)
        })
        .collect();

    let mut best_moves: Vec<AbstractMove> = Vec::new();
    let mut best_score = ALPHA_STARTING_VALUE;
    let mut evaluation_type = EvaluationType::Exact;
    for (mv, score, kind, shard_tt, shard_scores) in results {
        tt.merge(shard_tt);
        scores.extend(shard_scores);

        if score > best_score {
            best_score = score;
            best_moves = vec![mv];
            evaluation_type = kind;
        } else if score == best_score && kind == EvaluationType::Exact {
            best_moves.push(mv);
        }
    }

    tt.store(
        best_moves.clone(),
        best_score,
        evaluation_type,
        player,
        &game.board,
        depth,
        false,
    );
    minimax::conclude(best_moves, best_score, evaluation_type, is_first_move)
}

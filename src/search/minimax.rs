use std::time::Instant;

use crate::game::prelude::*;
use crate::search::abstract_move::{get_legal_abstract_moves, AbstractMove};
use crate::search::config::*;
use crate::search::evaluation::{depth_adjusted_score, evaluate_board, ScoreCache};
use crate::search::transposition::TranspositionTable;

pub(crate) const ALPHA_STARTING_VALUE: i32 = -WIN_CONDITION_SCORE * 10;
pub(crate) const BETA_STARTING_VALUE: i32 = WIN_CONDITION_SCORE * 10;

/// Mutable search state threaded through one tree walk.
pub(crate) struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub scores: &'a mut ScoreCache,
    /// Frozen table shared by parallel workers; probed when the writable
    /// table misses.
    pub snapshot: Option<&'a TranspositionTable>,
    /// Wall-clock bound; elapsed nodes return conservative cutoffs and stay
    /// out of the transposition table.
    pub deadline: Option<Instant>,
}

impl SearchContext<'_> {
    fn probe(
        &self,
        side: PlayerId,
        board: &Board,
        remaining_depth: u8,
        inverse_score: bool,
        alpha: i32,
        beta: i32,
    ) -> Option<(Vec<AbstractMove>, i32, EvaluationType)> {
        self.tt
            .probe(side, board, remaining_depth, inverse_score, alpha, beta)
            .or_else(|| {
                self.snapshot.and_then(|table| {
                    table.probe(side, board, remaining_depth, inverse_score, alpha, beta)
                })
            })
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Leaves are only recognised between rounds: at the first placement of a
/// round, once the depth is spent or the board already has a result.
fn board_needs_to_be_evaluated(
    game: &Game,
    player: PlayerId,
    opponent: PlayerId,
    remaining_depth: u8,
    is_first_move: bool,
) -> bool {
    is_first_move
        && (remaining_depth == 0 || game.board.game_result(player, opponent).is_some())
}

/// Applies the per-round depth penalty on the way out of second-placement
/// nodes, which are the ones that consumed a board tick.
pub(crate) fn conclude(
    best_moves: Vec<AbstractMove>,
    best_score: i32,
    evaluation_type: EvaluationType,
    is_first_move: bool,
) -> (Vec<AbstractMove>, i32, EvaluationType) {
    let score = if is_first_move {
        best_score
    } else {
        depth_adjusted_score(best_score)
    };
    (best_moves, score, evaluation_type)
}

/// The maximising half of the search: `player` places a piece. Returns the
/// set of equally-best moves, the (depth-adjusted) score and the kind of
/// bound the score represents.
pub(crate) fn max(
    ctx: &mut SearchContext,
    game: &Game,
    player: PlayerId,
    opponent: PlayerId,
    remaining_depth: u8,
    is_first_move: bool,
    mut alpha: i32,
    beta: i32,
) -> (Vec<AbstractMove>, i32, EvaluationType) {
    if board_needs_to_be_evaluated(game, player, opponent, remaining_depth, is_first_move) {
        let score = evaluate_board(ctx.scores, &game.board, player, opponent);
        return (vec![], score, EvaluationType::Exact);
    }

    if let Some((best_moves, score, kind)) =
        ctx.probe(player, &game.board, remaining_depth, false, alpha, beta)
    {
        return conclude(best_moves, score, kind, is_first_move);
    }

    // Symmetric placements are only pruned on the maximising side; pruning
    // the minimiser would leak unexplored refutations into the cache.
    let moves = get_legal_abstract_moves(&game.board, player, true);
    let mut best_moves: Vec<AbstractMove> = Vec::new();
    let mut best_score = ALPHA_STARTING_VALUE;
    let mut evaluation_type = EvaluationType::Exact;

    for mv in moves {
        let (score, child_type) = descend_max(
            ctx,
            game,
            mv,
            player,
            opponent,
            remaining_depth,
            is_first_move,
            alpha,
            beta,
        );

        if score > best_score {
            best_score = score;
            best_moves = vec![mv];
            evaluation_type = child_type;
        } else if score == best_score && child_type == EvaluationType::Exact {
            best_moves.push(mv);
        }

        // An elapsed deadline beats even a cutoff: the partial result may
        // lean on truncated children, so it must not reach the table.
        if ctx.expired() {
            return conclude(best_moves, best_score, EvaluationType::BetaCutoff, is_first_move);
        }
        alpha = alpha.max(best_score);
        if alpha > beta {
            evaluation_type = EvaluationType::BetaCutoff;
            break;
        }
    }

    ctx.tt.store(
        best_moves.clone(),
        best_score,
        evaluation_type,
        player,
        &game.board,
        remaining_depth,
        false,
    );
    conclude(best_moves, best_score, evaluation_type, is_first_move)
}

/// The minimising half: `opponent` places a piece, scores stay in `player`'s
/// point of view. Cache traffic goes through the opponent's key with negated
/// scores, so both sides can reuse each other's work.
pub(crate) fn min(
    ctx: &mut SearchContext,
    game: &Game,
    player: PlayerId,
    opponent: PlayerId,
    remaining_depth: u8,
    is_first_move: bool,
    alpha: i32,
    mut beta: i32,
) -> (Vec<AbstractMove>, i32, EvaluationType) {
    if board_needs_to_be_evaluated(game, player, opponent, remaining_depth, is_first_move) {
        let score = evaluate_board(ctx.scores, &game.board, player, opponent);
        return (vec![], score, EvaluationType::Exact);
    }

    if let Some((best_moves, score, kind)) =
        ctx.probe(opponent, &game.board, remaining_depth, true, alpha, beta)
    {
        return conclude(best_moves, score, kind, is_first_move);
    }

    let moves = get_legal_abstract_moves(&game.board, opponent, false);
    let mut best_moves: Vec<AbstractMove> = Vec::new();
    let mut best_score = BETA_STARTING_VALUE;
    let mut evaluation_type = EvaluationType::Exact;

    for mv in moves {
        let (score, child_type) = descend_min(
            ctx,
            game,
            mv,
            player,
            opponent,
            remaining_depth,
            is_first_move,
            alpha,
            beta,
        );

        if score < best_score {
            best_score = score;
            best_moves = vec![mv];
            evaluation_type = child_type;
        } else if score == best_score && child_type == EvaluationType::Exact {
            best_moves.push(mv);
        }

        if ctx.expired() {
            return conclude(best_moves, best_score, EvaluationType::AlphaCutoff, is_first_move);
        }
        beta = beta.min(best_score);
        if beta < alpha {
            evaluation_type = EvaluationType::AlphaCutoff;
            break;
        }
    }

    ctx.tt.store(
        best_moves.clone(),
        best_score,
        evaluation_type,
        opponent,
        &game.board,
        remaining_depth,
        true,
    );
    conclude(best_moves, best_score, evaluation_type, is_first_move)
}

/// One child of a maximiser node: apply the placement; the second placement
/// of a round also resolves the board and hands the next round's initiative
/// to the other side.
#[allow(clippy::too_many_arguments)]
pub(crate) fn descend_max(
    ctx: &mut SearchContext,
    game: &Game,
    mv: AbstractMove,
    player: PlayerId,
    opponent: PlayerId,
    remaining_depth: u8,
    is_first_move: bool,
    alpha: i32,
    beta: i32,
) -> (i32, EvaluationType) {
    let mut clone = game.clone();
    mv.execute(&mut clone.board);
    if is_first_move {
        let (_, score, kind) = min(
            ctx,
            &clone,
            player,
            opponent,
            remaining_depth,
            false,
            alpha,
            beta,
        );
        (score, kind)
    } else {
        clone.board.execute_board_movements(clone.starting_player);
        clone.switch_starting_player();
        let (_, score, kind) = max(
            ctx,
            &clone,
            player,
            opponent,
            remaining_depth - 1,
            true,
            alpha,
            beta,
        );
        (score, kind)
    }
}

#[allow(clippy::too_many_arguments)]
fn descend_min(
    ctx: &mut SearchContext,
    game: &Game,
    mv: AbstractMove,
    player: PlayerId,
    opponent: PlayerId,
    remaining_depth: u8,
    is_first_move: bool,
    alpha: i32,
    beta: i32,
) -> (i32, EvaluationType) {
    let mut clone = game.clone();
    mv.execute(&mut clone.board);
    if is_first_move {
        let (_, score, kind) = max(
            ctx,
            &clone,
            player,
            opponent,
            remaining_depth,
            false,
            alpha,
            beta,
        );
        (score, kind)
    } else {
        clone.board.execute_board_movements(clone.starting_player);
        clone.switch_starting_player();
        let (_, score, kind) = min(
            ctx,
            &clone,
            player,
            opponent,
            remaining_depth - 1,
            true,
            alpha,
            beta,
        );
        (score, kind)
    }
}

use crate::game::prelude::*;
use crate::search::config::*;

/// Memoised static scores, keyed by the scoring player and the board
/// notation. Owned by the searching strategy; there is no global state.
pub type ScoreCache = HashMap<String, i32>;

pub fn board_score_key(player: PlayerId, board: &Board) -> String {
    format!("{}#{}", player, board.to_notation())
}

pub fn game_result_score(result: GameResult) -> i32 {
    match result {
        GameResult::Win => WIN_CONDITION_SCORE,
        GameResult::Draw => 0,
        GameResult::Loss => -WIN_CONDITION_SCORE,
    }
}

/// Applies one depth-penalty step toward zero; capped so adjusted scores
/// never change sign.
pub fn depth_adjusted_score(score: i32) -> i32 {
    let capped_offset = DEPTH_PENALTY.min(score.abs());
    if score > 0 {
        score - capped_offset
    } else {
        score + capped_offset
    }
}

/// Static evaluation of the board from `player`'s point of view: terminal
/// results dominate, otherwise each play-area piece contributes its type
/// score shaped by the positional multiplier.
pub fn evaluate_board(
    cache: &mut ScoreCache,
    board: &Board,
    player: PlayerId,
    opponent: PlayerId,
) -> i32 {
    let cache_key = board_score_key(player, board);
    if let Some(&score) = cache.get(&cache_key) {
        return score;
    }

    let score = match board.game_result(player, opponent) {
        Some(result) => game_result_score(result),
        None => board
            .board_piece_ids(true)
            .iter()
            .map(|&id| {
                let piece = board.piece(id);
                let coord = board.coord_of(piece.tile.expect("board pieces stand on tiles"));
                let direction = piece.direction.expect("on-board pieces always have a direction");
                let multiplier = tile_score_multiplier(coord.x, coord.y, direction);
                let piece_score = placed_piece_score(piece.kind) * multiplier / 100;
                if piece.owner == player {
                    piece_score
                } else {
                    -piece_score
                }
            })
            .sum(),
    };

    cache.insert(cache_key, score);
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, owner: PlayerId, kind: PieceType, direction: Direction, x: i8, y: i8) {
        let piece = board.piece_by_type(owner, kind);
        board.set_piece_direction(piece, direction);
        board.place_piece(piece, board.tile_at(x, y).unwrap());
    }

    fn remove(board: &mut Board, owner: PlayerId, kind: PieceType) {
        let piece = board.piece_by_type(owner, kind);
        let tile = board.piece(piece).tile.unwrap();
        board.remove_piece(tile);
    }

    #[test]
    fn piece_board_evaluation() {
        let mut cache = ScoreCache::new();
        let mut board = Board::new();

        place(&mut board, PlayerId::One, PieceType::Two, Direction::West, 2, 2);
        let two_score =
            placed_piece_score(PieceType::Two) * tile_score_multiplier(2, 2, Direction::West) / 100;
        assert_eq!(
            evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two),
            two_score
        );

        place(&mut board, PlayerId::Two, PieceType::Two, Direction::East, 2, 1);
        let enemy_two_score =
            placed_piece_score(PieceType::Two) * tile_score_multiplier(2, 1, Direction::East) / 100;
        assert_eq!(
            evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two),
            two_score - enemy_two_score
        );

        place(&mut board, PlayerId::Two, PieceType::Three, Direction::South, 1, 1);
        let enemy_three_score =
            placed_piece_score(PieceType::Three) * tile_score_multiplier(1, 1, Direction::South) / 100;
        assert_eq!(
            evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two),
            two_score - enemy_two_score - enemy_three_score
        );
    }

    #[test]
    fn piece_value_relationships() {
        let mut cache = ScoreCache::new();
        let mut board = Board::new();

        place(&mut board, PlayerId::One, PieceType::Two, Direction::North, 1, 1);
        let just_entered = evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two);

        remove(&mut board, PlayerId::One, PieceType::Two);
        place(&mut board, PlayerId::One, PieceType::Two, Direction::North, 2, 2);
        let center_square = evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two);

        remove(&mut board, PlayerId::One, PieceType::Two);
        place(&mut board, PlayerId::One, PieceType::Two, Direction::East, 3, 3);
        let about_to_exit = evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two);

        remove(&mut board, PlayerId::One, PieceType::Two);
        place(&mut board, PlayerId::One, PieceType::Two, Direction::West, 2, 3);
        let neutral = evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two);

        assert!(center_square > neutral);
        assert!(just_entered > neutral);
        assert!(neutral > about_to_exit);
    }

    #[test]
    fn win_condition_board_evaluation() {
        let mut cache = ScoreCache::new();
        let mut board = Board::new();

        place(&mut board, PlayerId::One, PieceType::One, Direction::North, 1, 1);
        place(&mut board, PlayerId::One, PieceType::Two, Direction::North, 2, 2);
        place(&mut board, PlayerId::One, PieceType::Three, Direction::South, 3, 3);

        assert_eq!(
            evaluate_board(&mut cache, &board, PlayerId::One, PlayerId::Two),
            WIN_CONDITION_SCORE
        );
        assert_eq!(
            evaluate_board(&mut cache, &board, PlayerId::Two, PlayerId::One),
            -WIN_CONDITION_SCORE
        );
    }

    #[test]
    fn depth_adjustment_never_crosses_zero() {
        assert_eq!(depth_adjusted_score(WIN_CONDITION_SCORE), WIN_CONDITION_SCORE - DEPTH_PENALTY);
        assert_eq!(depth_adjusted_score(-WIN_CONDITION_SCORE), -WIN_CONDITION_SCORE + DEPTH_PENALTY);
        assert_eq!(depth_adjusted_score(0), 0);
    }
}

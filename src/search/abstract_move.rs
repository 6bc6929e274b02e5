use crate::game::prelude::*;
use crate::search::config::*;

/// A placement described positionally: owner, piece type and target
/// coordinates. Independent of any concrete game instance, which is what
/// lets the search store, order and compare moves across clones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AbstractMove {
    pub owner: PlayerId,
    pub placement: Option<PlacementSpec>,
}

/// The positional payload of a non-empty abstract move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementSpec {
    pub piece_type: PieceType,
    pub x: i8,
    pub y: i8,
}

impl AbstractMove {
    pub fn from_placement(board: &Board, mv: PlacementMove) -> AbstractMove {
        let piece = board.piece(mv.piece);
        let coord = board.coord_of(mv.tile);
        AbstractMove {
            owner: piece.owner,
            placement: Some(PlacementSpec {
                piece_type: piece.kind,
                x: coord.x,
                y: coord.y,
            }),
        }
    }

    /// The "no move" placeholder a side plays when it has no legal placements.
    pub fn empty(owner: PlayerId) -> AbstractMove {
        AbstractMove {
            owner,
            placement: None,
        }
    }

    pub fn is_empty_movement(&self) -> bool {
        self.placement.is_none()
    }

    /// Rebinds the move to a concrete game's arenas.
    pub fn to_placement_move(&self, board: &Board) -> Option<PlacementMove> {
        let spec = self.placement?;
        let piece = board.piece_by_type(self.owner, spec.piece_type);
        let tile = board.tile_at(spec.x, spec.y)?;
        Some(PlacementMove { piece, tile })
    }

    pub fn execute(&self, board: &mut Board) {
        if let Some(mv) = self.to_placement_move(board) {
            mv.execute(board);
        }
    }

    /// Heuristic ordering bucket. Placements whose entry appears blocked by
    /// an opposing piece the mover can neither push nor displace rank last.
    pub fn to_sorting_order(&self, board: &Board) -> u8 {
        let Some(spec) = self.placement else {
            return 0;
        };

        let placement = self
            .to_placement_move(board)
            .expect("abstract moves describe existing tiles");
        if let Some(target) = placement.board_target_tile(board) {
            if let Some(blocker) = board.tile(target).piece {
                let mover_is_pusher = spec.piece_type == PieceType::Four;
                let blocker_piece = board.piece(blocker);
                if !mover_is_pusher
                    && !blocker_piece.is_pushable()
                    && blocker_piece.kind.value() >= spec.piece_type.value()
                    && !board.piece_is_exiting(blocker)
                {
                    return PIECE_ENTRY_APPEARS_BLOCKED_ORDER;
                }
            }
        }

        piece_coordinate_sorting_order(spec.piece_type, spec.x, spec.y)
    }
}

impl std::fmt::Display for AbstractMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.placement {
            Some(spec) => write!(f, "{} -> ({}, {})", spec.piece_type, spec.x, spec.y),
            None => write!(f, "pass"),
        }
    }
}

/// An abstract move paired with the score the search assigned to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: AbstractMove,
    pub score: i32,
}

impl ScoredMove {
    pub fn to_placement_move(&self, board: &Board) -> Option<PlacementMove> {
        self.mv.to_placement_move(board)
    }

    pub fn spec(&self) -> Option<PlacementSpec> {
        self.mv.placement
    }
}

impl std::fmt::Display for ScoredMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.mv, self.score)
    }
}

/// Drops placements a board reflection makes redundant. On an empty board
/// only the two representative tiles `(4, 2)` and `(4, 3)` survive; with a
/// mirror-symmetric position, one half of the board does.
pub fn filter_symmetric_movements(moves: &mut Vec<AbstractMove>, board: &Board) {
    let board_pieces = board.board_piece_ids(false);
    let mut center_x_symmetry = true;
    let mut center_y_symmetry = true;
    for &id in &board_pieces {
        let piece = board.piece(id);
        let coord = board.coord_of(piece.tile.expect("board pieces stand on tiles"));
        if coord.y != CENTER_COORD
            || matches!(piece.direction, Some(Direction::North | Direction::South))
        {
            center_x_symmetry = false;
        }
        if coord.x != CENTER_COORD
            || matches!(piece.direction, Some(Direction::East | Direction::West))
        {
            center_y_symmetry = false;
        }
    }

    moves.retain(|mv| {
        let Some(spec) = mv.placement else {
            return true;
        };
        if board_pieces.is_empty() {
            spec.x == 4 && (spec.y == 2 || spec.y == 3)
        } else if center_x_symmetry {
            spec.y >= CENTER_COORD
        } else if center_y_symmetry {
            spec.x >= CENTER_COORD
        } else {
            true
        }
    });
}

/// Legal abstract placements for `player`, best bucket first. When the side
/// has no placements at all, the single empty move stands in.
pub fn get_legal_abstract_moves(
    board: &Board,
    player: PlayerId,
    filter_symmetric_moves: bool,
) -> Vec<AbstractMove> {
    let mut moves: Vec<AbstractMove> = board
        .legal_placement_moves(player)
        .into_iter()
        .map(|mv| AbstractMove::from_placement(board, mv))
        .collect();
    if filter_symmetric_moves {
        filter_symmetric_movements(&mut moves, board);
    }
    if moves.is_empty() {
        moves.push(AbstractMove::empty(player));
    }

    // Stable descending sort, so the tile-major enumeration order survives
    // within a bucket.
    let mut scored: Vec<(AbstractMove, u8)> = moves
        .into_iter()
        .map(|mv| {
            let order = mv.to_sorting_order(board);
            (mv, order)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(mv, _)| mv).collect()
}

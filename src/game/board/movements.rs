use crate::game::prelude::*;

impl Board {
    /// Resolves one board tick in-place: every on-board piece attempts its
    /// movement, in movement order. Returns the number of committed
    /// sub-movements.
    pub fn execute_board_movements(&mut self, starting_player: PlayerId) -> usize {
        let pieces = self.movement_ordered_pieces(starting_player);
        let mut executed_movements = 0;
        for piece in pieces {
            // Piece may have been removed from the board by an earlier sub-movement.
            if !self.piece(piece).is_on_board() {
                continue;
            }
            executed_movements += self.execute_piece_movement(piece);
        }
        executed_movements
    }

    /// On-board pieces sorted by movement priority; the sort is stable over
    /// tile enumeration order.
    pub(crate) fn movement_ordered_pieces(&self, starting_player: PlayerId) -> Vec<PieceId> {
        let mut pieces = self.board_piece_ids(false);
        pieces.sort_by_key(|&id| self.piece(id).movement_order(starting_player));
        pieces
    }

    fn execute_piece_movement(&mut self, piece: PieceId) -> usize {
        let source = self.piece(piece).tile.expect("moving piece is on the board");
        let (dx, dy) = self.piece(piece).movement_offsets();
        let source_coord = self.coord_of(source);
        let target = self.tile_at(source_coord.x + dx, source_coord.y + dy);
        let target_piece = target.and_then(|t| self.tile(t).piece);

        match (target, target_piece) {
            (Some(target), None) => {
                self.commit_piece_movement(piece, source, Some(target));
                1
            }
            _ if self.piece(piece).is_pusher() => {
                let push_movements = self.chained_push_movements(source, target);
                for &(push_source, push_target) in push_movements.iter().rev() {
                    let pushed = self.tile(push_source).piece.expect("push chain tiles are occupied");
                    self.commit_piece_movement(pushed, push_source, push_target);
                }
                push_movements.len()
            }
            (Some(target), Some(blocker))
                if self.piece(blocker).is_pushable() && !self.piece(piece).is_pushable() =>
            {
                let target_coord = self.coord_of(target);
                let displacement = self.tile_at(target_coord.x + dx, target_coord.y + dy);
                let displacement_free = displacement.map_or(true, |t| self.tile(t).is_empty());
                if displacement_free {
                    self.commit_piece_movement(blocker, target, displacement);
                    self.commit_piece_movement(piece, source, Some(target));
                    2
                } else {
                    self.remove_piece_stuck_in_perimeter(piece);
                    0
                }
            }
            _ => {
                self.remove_piece_stuck_in_perimeter(piece);
                0
            }
        }
    }

    /// A piece that could not move must leave the board if it never entered
    /// the play area in the first place.
    fn remove_piece_stuck_in_perimeter(&mut self, piece: PieceId) {
        let stuck = self
            .piece(piece)
            .tile
            .is_some_and(|t| self.tile(t).is_perimeter());
        if stuck {
            self.remove_from_play(piece);
        }
    }

    /// The chain of movements a pusher triggers: each occupied tile pushes
    /// the next along the same direction. A `None` target means the pushed
    /// piece leaves the grid.
    pub(crate) fn chained_push_movements(
        &self,
        source_tile: TileId,
        target_tile: Option<TileId>,
    ) -> Vec<(TileId, Option<TileId>)> {
        let Some(target_tile) = target_tile else {
            // The pusher itself is about to run off the grid.
            return vec![(source_tile, None)];
        };
        let source_coord = self.coord_of(source_tile);
        let target_coord = self.coord_of(target_tile);
        let (dx, dy) = (target_coord.x - source_coord.x, target_coord.y - source_coord.y);

        let mut push_movements = Vec::new();
        let mut push_source = source_tile;
        let mut push_target = Some(target_tile);
        while self.tile(push_source).piece.is_some() {
            push_movements.push((push_source, push_target));
            let Some(next_source) = push_target else {
                break;
            };
            push_source = next_source;
            let coord = self.coord_of(push_source);
            push_target = self.tile_at(coord.x + dx, coord.y + dy);
            if push_target.is_none() && self.tile(push_source).piece.is_some() {
                push_movements.push((push_source, None));
                break;
            }
        }
        push_movements
    }

    /// Moves a piece off its source tile. Targets that are off-grid or on
    /// the perimeter remove the piece from play instead of landing it.
    pub(crate) fn commit_piece_movement(
        &mut self,
        piece: PieceId,
        source_tile: TileId,
        target_tile: Option<TileId>,
    ) {
        self.remove_piece(source_tile);
        match target_tile {
            Some(target) if !self.tile(target).is_perimeter() => self.place_piece(piece, target),
            _ => self.remove_from_play(piece),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, owner: PlayerId, kind: PieceType, direction: Direction, x: i8, y: i8) -> PieceId {
        let piece = board.piece_by_type(owner, kind);
        board.set_piece_direction(piece, direction);
        board.place_piece(piece, board.tile_at(x, y).unwrap());
        piece
    }

    #[test]
    fn pieces_movement_order() {
        let mut board = Board::new();
        let p1_two = place(&mut board, PlayerId::One, PieceType::Two, Direction::North, 1, 1);
        assert_eq!(board.movement_ordered_pieces(PlayerId::One), vec![p1_two]);

        let p2_one = place(&mut board, PlayerId::Two, PieceType::One, Direction::North, 1, 2);
        let p2_two = place(&mut board, PlayerId::Two, PieceType::Two, Direction::North, 1, 3);
        let p1_four = place(&mut board, PlayerId::One, PieceType::Four, Direction::North, 2, 1);

        assert_eq!(
            board.movement_ordered_pieces(PlayerId::One),
            vec![p2_one, p1_two, p2_two, p1_four]
        );
        assert_eq!(
            board.movement_ordered_pieces(PlayerId::Two),
            vec![p2_one, p2_two, p1_two, p1_four]
        );
    }

    #[test]
    fn chained_push_movements() {
        let mut board = Board::new();
        place(&mut board, PlayerId::One, PieceType::Four, Direction::East, 0, 3);
        place(&mut board, PlayerId::One, PieceType::Two, Direction::East, 1, 3);
        place(&mut board, PlayerId::Two, PieceType::Three, Direction::West, 2, 3);
        place(&mut board, PlayerId::Two, PieceType::One, Direction::West, 4, 3);

        let source = board.tile_at(0, 3).unwrap();
        let target = board.tile_at(1, 3).unwrap();
        let movements = board.chained_push_movements(source, Some(target));
        assert_eq!(
            movements,
            vec![
                (source, Some(target)),
                (target, board.tile_at(2, 3)),
                (board.tile_at(2, 3).unwrap(), board.tile_at(3, 3)),
            ]
        );
    }

    #[test]
    fn chained_push_movements_empty() {
        let mut board = Board::new();
        place(&mut board, PlayerId::One, PieceType::Four, Direction::South, 1, 3);
        let source = board.tile_at(1, 3).unwrap();
        let target = board.tile_at(1, 2).unwrap();
        assert_eq!(
            board.chained_push_movements(source, Some(target)),
            vec![(source, Some(target))]
        );
    }

    #[test]
    fn chained_push_movements_edge() {
        let mut board = Board::new();
        place(&mut board, PlayerId::One, PieceType::Four, Direction::North, 3, 3);
        place(&mut board, PlayerId::One, PieceType::One, Direction::North, 3, 4);
        let source = board.tile_at(3, 3).unwrap();
        let target = board.tile_at(3, 4).unwrap();
        assert_eq!(
            board.chained_push_movements(source, Some(target)),
            vec![(source, Some(target)), (target, None)]
        );
    }

    #[test]
    fn simple_movement_execution() {
        let mut board = Board::new();
        let two = place(&mut board, PlayerId::One, PieceType::Two, Direction::South, 1, 2);
        assert_eq!(board.execute_board_movements(PlayerId::One), 1);
        assert_eq!(board.tile(board.tile_at(1, 1).unwrap()).piece, Some(two));
    }

    #[test]
    fn push_movements_execution() {
        let mut board = Board::new();
        let four = place(&mut board, PlayerId::One, PieceType::Four, Direction::North, 2, 1);
        let three = place(&mut board, PlayerId::One, PieceType::Three, Direction::East, 1, 2);
        let three_2 = place(&mut board, PlayerId::Two, PieceType::Three, Direction::West, 2, 2);
        let five = place(&mut board, PlayerId::Two, PieceType::Five, Direction::East, 2, 3);
        let two = place(&mut board, PlayerId::One, PieceType::Two, Direction::South, 3, 3);
        let one = place(&mut board, PlayerId::Two, PieceType::One, Direction::West, 3, 2);

        assert_eq!(board.execute_board_movements(PlayerId::One), 5);
        assert!(board.tile(board.tile_at(1, 1).unwrap()).is_empty());
        assert!(board.tile(board.tile_at(2, 1).unwrap()).is_empty());
        assert_eq!(board.tile(board.tile_at(3, 1).unwrap()).piece, Some(one));
        assert_eq!(board.tile(board.tile_at(1, 2).unwrap()).piece, Some(three));
        assert_eq!(board.tile(board.tile_at(2, 2).unwrap()).piece, Some(four));
        assert_eq!(board.tile(board.tile_at(3, 2).unwrap()).piece, Some(two));
        assert!(board.tile(board.tile_at(1, 3).unwrap()).is_empty());
        assert_eq!(board.tile(board.tile_at(2, 3).unwrap()).piece, Some(three_2));
        assert!(board.tile(board.tile_at(3, 3).unwrap()).is_empty());
        assert!(board.piece(five).tile.is_none());
    }

    #[test]
    fn pusher_removes_piece_pushed_off_grid() {
        let mut board = Board::new();
        let four = place(&mut board, PlayerId::One, PieceType::Four, Direction::North, 3, 3);
        let one = place(&mut board, PlayerId::One, PieceType::One, Direction::North, 3, 4);

        assert_eq!(board.execute_board_movements(PlayerId::One), 2);
        assert!(board.piece(one).tile.is_none());
        assert!(board.piece(one).direction.is_none());
        // The pusher's own commit lands on a perimeter tile, which removes
        // it from play as well.
        assert!(board.piece(four).tile.is_none());
    }

    #[test]
    fn blocked_perimeter_piece_is_removed_from_play() {
        let mut board = Board::new();
        // The three and five block each other head-on, so neither vacates
        // its tile this tick.
        let blocker = place(&mut board, PlayerId::Two, PieceType::Five, Direction::North, 1, 1);
        place(&mut board, PlayerId::Two, PieceType::Three, Direction::South, 1, 2);
        let five = place(&mut board, PlayerId::One, PieceType::Five, Direction::East, 0, 1);

        assert_eq!(board.execute_board_movements(PlayerId::Two), 0);
        assert!(board.piece(five).tile.is_none());
        assert!(board.piece(blocker).tile.is_some());
    }

    #[test]
    fn tick_counter_equals_committed_sub_movements() {
        let mut board = Board::new();
        place(&mut board, PlayerId::One, PieceType::Two, Direction::South, 1, 2);
        place(&mut board, PlayerId::Two, PieceType::Three, Direction::West, 3, 2);
        assert_eq!(board.execute_board_movements(PlayerId::One), 2);
        // The two exits at (1, 0) and the three advances to (1, 2).
        assert_eq!(board.execute_board_movements(PlayerId::One), 2);
        // The three exits at (0, 2), after which the board is quiet.
        assert_eq!(board.execute_board_movements(PlayerId::One), 1);
        assert_eq!(board.execute_board_movements(PlayerId::One), 0);
    }
}

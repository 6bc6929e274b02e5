use crate::game::prelude::*;

/// A concrete placement of a hand piece onto an empty perimeter tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementMove {
    pub piece: PieceId,
    pub tile: TileId,
}

impl PlacementMove {
    /// Binds the piece to the tile and forces the tile's entry direction.
    pub fn execute(&self, board: &mut Board) {
        let direction = board
            .tile(self.tile)
            .entry_direction
            .expect("placement targets are perimeter tiles");
        board.place_piece(self.piece, self.tile);
        board.set_piece_direction(self.piece, direction);
    }

    /// The play-area tile the placed piece will try to enter on the next tick.
    pub fn board_target_tile(&self, board: &Board) -> Option<TileId> {
        let tile = board.tile(self.tile);
        let direction = tile.entry_direction?;
        let target = tile.coord.offset(direction);
        board.tile_at(target.x, target.y)
    }
}

impl Board {
    /// Every legal placement for `player`: the cross product of hand pieces
    /// and empty perimeter tiles, in tile-major order.
    pub fn legal_placement_moves(&self, player: PlayerId) -> Vec<PlacementMove> {
        let legal_tiles = self.legal_tiles();
        let available_pieces = self.available_pieces(player);
        let mut legal_moves = Vec::with_capacity(legal_tiles.len() * available_pieces.len());
        for &tile in &legal_tiles {
            for &piece in &available_pieces {
                legal_moves.push(PlacementMove { piece, tile });
            }
        }
        legal_moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_forces_entry_direction() {
        let mut board = Board::new();
        let piece = board.piece_by_type(PlayerId::One, PieceType::Two);
        let tile = board.tile_at(0, 2).unwrap();
        PlacementMove { piece, tile }.execute(&mut board);

        assert_eq!(board.piece(piece).tile, Some(tile));
        assert_eq!(board.piece(piece).direction, Some(Direction::East));
    }

    #[test]
    fn legal_moves_are_hand_pieces_times_legal_tiles() {
        let mut board = Board::new();
        assert_eq!(
            board.legal_placement_moves(PlayerId::One).len(),
            12 * PIECES_PER_PLAYER
        );

        let piece = board.piece_by_type(PlayerId::One, PieceType::Five);
        let tile = board.tile_at(2, 0).unwrap();
        PlacementMove { piece, tile }.execute(&mut board);

        // One tile occupied, one piece out of player one's hand.
        assert_eq!(board.legal_placement_moves(PlayerId::One).len(), 11 * 4);
        assert_eq!(board.legal_placement_moves(PlayerId::Two).len(), 11 * 5);
    }

    #[test]
    fn board_target_tile_points_into_the_play_area() {
        let board = Board::new();
        let mv = PlacementMove {
            piece: board.piece_by_type(PlayerId::One, PieceType::One),
            tile: board.tile_at(4, 3).unwrap(),
        };
        assert_eq!(mv.board_target_tile(&board), board.tile_at(3, 3));
    }
}

use crate::game::prelude::*;

impl Board {
    /// The game result from `player`'s point of view, if any. Both players
    /// completing a row in the same tick is a draw.
    pub fn game_result(&self, player: PlayerId, opponent: PlayerId) -> Option<GameResult> {
        match (self.has_complete_row(player), self.has_complete_row(opponent)) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Win),
            (false, true) => Some(GameResult::Loss),
            (false, false) => None,
        }
    }

    /// Whether `owner` holds a full row, column or diagonal of the play area.
    pub fn has_complete_row(&self, owner: PlayerId) -> bool {
        for coordinate in 1..=PLAY_AREA_SIZE {
            if self.check_row_completeness(owner, coordinate, false)
                || self.check_row_completeness(owner, coordinate, true)
            {
                return true;
            }
        }

        // Diagonals only matter when the center is already held.
        let center = self.tile_at(CENTER_COORD, CENTER_COORD).unwrap();
        if self.has_piece_of_player(center, owner) {
            let diagonal_offsets = [[(-1, -1), (1, 1)], [(-1, 1), (1, -1)]];
            for offsets in diagonal_offsets {
                if self.check_diagonal_completeness(owner, offsets) {
                    return true;
                }
            }
        }

        false
    }

    fn check_diagonal_completeness(&self, owner: PlayerId, offsets: [(i8, i8); 2]) -> bool {
        offsets.iter().all(|&(dx, dy)| {
            let tile = self
                .tile_at(CENTER_COORD + dx, CENTER_COORD + dy)
                .expect("diagonal tiles are in the play area");
            self.has_piece_of_player(tile, owner)
        })
    }

    fn check_row_completeness(&self, owner: PlayerId, main_coordinate: i8, vertical: bool) -> bool {
        (1..=PLAY_AREA_SIZE).all(|secondary_coordinate| {
            let (x, y) = if vertical {
                (secondary_coordinate, main_coordinate)
            } else {
                (main_coordinate, secondary_coordinate)
            };
            let tile = self.tile_at(x, y).expect("row tiles are in the play area");
            self.has_piece_of_player(tile, owner)
        })
    }
}

use rand::seq::SliceRandom;

use crate::game::prelude::*;
use crate::strategy::Strategy;

/// Plays a uniformly random hand piece on a uniformly random legal tile.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose(&mut self, game: &Game, player: PlayerId, _is_first: bool) -> Option<PlacementMove> {
        let legal_tiles = game.board.legal_tiles();
        let available_pieces = game.board.available_pieces(player);
        let mut rng = rand::thread_rng();
        match (
            available_pieces.choose(&mut rng),
            legal_tiles.choose(&mut rng),
        ) {
            (Some(&piece), Some(&tile)) => Some(PlacementMove { piece, tile }),
            _ => None,
        }
    }
}

use std::io::Write;

use crate::game::prelude::*;
use crate::strategy::Strategy;

/// Prompts on stdin for a piece type and target coordinates until the input
/// matches a legal placement.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanInputStrategy;

impl HumanInputStrategy {
    fn prompt(&self, label: &str) -> Result<i8> {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        line.trim()
            .parse::<i8>()
            .map_err(|_| anyhow!("expected a number, received {}", line.trim()))
    }

    fn read_move(&self, game: &Game, player: PlayerId) -> Result<Option<PlacementMove>> {
        let legal_moves = game.board.legal_placement_moves(player);
        if legal_moves.is_empty() {
            println!("You have no valid legal moves, skipping");
            return Ok(None);
        }

        loop {
            let kind = PieceType::from_value(self.prompt("Piece type")? as u8)?;
            let x = self.prompt("X coordinate")?;
            let y = self.prompt("Y coordinate")?;

            let matching = legal_moves.iter().find(|mv| {
                let coord = game.board.coord_of(mv.tile);
                game.board.piece(mv.piece).kind == kind && coord.x == x && coord.y == y
            });
            match matching {
                Some(&mv) => return Ok(Some(mv)),
                None => println!(
                    "Invalid legal move specified (piece: {kind}, x: {x}, y: {y}), try again."
                ),
            }
        }
    }
}

impl Strategy for HumanInputStrategy {
    fn choose(&mut self, game: &Game, player: PlayerId, _is_first: bool) -> Option<PlacementMove> {
        loop {
            match self.read_move(game, player) {
                Ok(mv) => return mv,
                Err(e) => println!("{e}, try again."),
            }
        }
    }
}

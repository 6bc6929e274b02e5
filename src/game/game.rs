use crate::game::prelude::*;
use crate::strategy::Strategy;

/// A full game: the board arenas plus the round-driver state. Cloning a game
/// duplicates the entire position deterministically.
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    pub starting_player: PlayerId,
    pub turns: u32,
    pub result: Option<GameResult>,
    /// Set when a caller has already executed the starting player's
    /// placement for the upcoming round.
    pub first_move_executed: bool,
    pub player_1_moves: Vec<Option<PlacementMove>>,
    pub player_2_moves: Vec<Option<PlacementMove>>,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            starting_player: PlayerId::One,
            turns: 0,
            result: None,
            first_move_executed: false,
            player_1_moves: Vec::new(),
            player_2_moves: Vec::new(),
        }
    }

    /// The player placing second this round.
    pub fn secondary_player(&self) -> PlayerId {
        self.starting_player.opponent()
    }

    pub fn switch_starting_player(&mut self) {
        self.starting_player = self.starting_player.opponent();
    }

    /// The running result, from player one's point of view.
    pub fn current_result(&self) -> Option<GameResult> {
        self.board.game_result(PlayerId::One, PlayerId::Two)
    }

    /// Plays rounds until the game resolves.
    pub fn play(&mut self, player_1: &mut dyn Strategy, player_2: &mut dyn Strategy) -> GameResult {
        while self.result.is_none() {
            self.play_round(player_1, player_2);
        }
        self.result.expect("loop exits once the game has a result")
    }

    /// One round: the starting player's placement, the second player's
    /// placement, one board tick, then the result check.
    pub fn play_round(&mut self, player_1: &mut dyn Strategy, player_2: &mut dyn Strategy) {
        let starting_player = self.starting_player;

        let starting_move = if self.first_move_executed {
            self.first_move_executed = false;
            None
        } else {
            let chosen = match starting_player {
                PlayerId::One => player_1.choose(self, starting_player, true),
                PlayerId::Two => player_2.choose(self, starting_player, true),
            };
            if let Some(placement) = chosen {
                placement.execute(&mut self.board);
            }
            chosen
        };

        let second_player = self.secondary_player();
        let second_move = match second_player {
            PlayerId::One => player_1.choose(self, second_player, false),
            PlayerId::Two => player_2.choose(self, second_player, false),
        };
        if let Some(placement) = second_move {
            placement.execute(&mut self.board);
        }

        match starting_player {
            PlayerId::One => {
                self.player_1_moves.push(starting_move);
                self.player_2_moves.push(second_move);
            }
            PlayerId::Two => {
                self.player_1_moves.push(second_move);
                self.player_2_moves.push(starting_move);
            }
        }

        let executed_movements = self.board.execute_board_movements(starting_player);
        self.turns += 1;
        if executed_movements == 0 && self.board.is_full() {
            self.result = Some(GameResult::Draw);
            return;
        }
        self.switch_starting_player();
        self.result = self.current_result();
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::RandomStrategy;

    #[test]
    fn setup() {
        let game = Game::new();
        assert!(game.current_result().is_none());
        assert_eq!(
            game.board.legal_placement_moves(PlayerId::One).len(),
            game.board.legal_tiles().len() * PIECES_PER_PLAYER
        );
        assert_eq!(
            game.board.legal_placement_moves(PlayerId::Two).len(),
            game.board.legal_tiles().len() * PIECES_PER_PLAYER
        );
    }

    #[test]
    fn random_games_resolve() {
        let mut random_1 = RandomStrategy;
        let mut random_2 = RandomStrategy;
        for _ in 0..50 {
            let mut game = Game::new();
            game.play(&mut random_1, &mut random_2);
            // Minimum number of rounds for either player to win or draw.
            assert!(game.turns >= 3);
            assert_eq!(game.turns as usize, game.player_1_moves.len());
            assert_eq!(game.turns as usize, game.player_2_moves.len());
            assert!(game.result.is_some());
        }
    }

    #[test]
    fn clone_duplicates_the_position() {
        let mut game = Game::new();
        game.starting_player = PlayerId::Two;

        let two = game.board.piece_by_type(PlayerId::One, PieceType::Two);
        game.board.set_piece_direction(two, Direction::East);
        game.board.place_piece(two, game.board.tile_at(2, 2).unwrap());

        let three = game.board.piece_by_type(PlayerId::Two, PieceType::Three);
        game.board.set_piece_direction(three, Direction::North);
        game.board.place_piece(three, game.board.tile_at(1, 0).unwrap());

        let clone = game.clone();

        let center = clone.board.tile_piece(clone.board.tile_at(2, 2).unwrap());
        assert!(center.is_some_and(|p| p.kind == PieceType::Two && p.owner == PlayerId::One));

        let edge = clone.board.tile_piece(clone.board.tile_at(1, 0).unwrap());
        assert!(edge.is_some_and(|p| p.kind == PieceType::Three && p.owner == PlayerId::Two));

        assert_eq!(clone.starting_player, PlayerId::Two);
    }
}

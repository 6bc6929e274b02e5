use regex::Regex;

use crate::game::prelude::*;
use itertools::Itertools;

impl Board {
    /// Serialises the 21 tiles in their fixed enumeration order; empty tiles
    /// emit empty strings. This string doubles as the cache key for every
    /// search-side lookup.
    pub fn to_notation(&self) -> String {
        self.tiles().map(|(id, _)| self.tile_notation(id)).join(",")
    }

    /// Notation of a single tile: `<type>|<owner>|<direction>` or empty.
    pub fn tile_notation(&self, id: TileId) -> String {
        match self.tile_piece(id) {
            Some(piece) => {
                let direction = piece
                    .direction
                    .expect("on-board pieces always have a direction");
                format!("{}|{}|{}", piece.kind, piece.owner, direction)
            }
            None => String::new(),
        }
    }
}

impl Game {
    /// The canonical round-trip notation:
    /// `<starting_player>#<tile_0>,<tile_1>,…`.
    pub fn to_notation(&self) -> String {
        format!("{}#{}", self.starting_player, self.board.to_notation())
    }

    /// Parses the notation produced by [`Game::to_notation`]. Unknown player
    /// ids and malformed tile tokens are rejected.
    pub fn from_notation(s: &str) -> Result<Game> {
        let (player_token, tiles_token) = s
            .split_once('#')
            .ok_or_else(|| anyhow!("game notation {s} is missing its starting player"))?;
        let starting_player = PlayerId::parse(player_token)?;

        let tokens: Vec<&str> = tiles_token.split(',').collect();
        if tokens.len() != TILE_COUNT {
            return Err(anyhow!(
                "expected {TILE_COUNT} tile tokens, received {}",
                tokens.len()
            ));
        }

        let pattern = Regex::new("^(?<kind>[0-9]+)\\|(?<owner>[0-9]+)\\|(?<direction>[a-z]+)$")?;
        let mut game = Game::new();
        game.starting_player = starting_player;

        for (index, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                continue;
            }
            let captures = pattern
                .captures(token)
                .ok_or_else(|| anyhow!("malformed tile token {token}"))?;
            let kind = PieceType::parse(captures.name("kind").unwrap().as_str())?;
            let owner = PlayerId::parse(captures.name("owner").unwrap().as_str())?;
            let direction = Direction::parse(captures.name("direction").unwrap().as_str())?;

            let piece = game.board.piece_by_type(owner, kind);
            if game.board.piece(piece).is_on_board() {
                return Err(anyhow!(
                    "piece {kind} of player {owner} appears twice in {s}"
                ));
            }
            game.board.place_piece(piece, TileId(index));
            game.board.set_piece_direction(piece, direction);
        }

        Ok(game)
    }
}

impl std::str::FromStr for Game {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Game::from_notation(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_BOARD_NOTATION: &str = ",,,,,,,,,,,,,,,,,,,,";

    #[test]
    fn board_serialization() {
        let mut board = Board::new();
        assert_eq!(board.to_notation(), EMPTY_BOARD_NOTATION);

        let two = board.piece_by_type(PlayerId::One, PieceType::Two);
        board.set_piece_direction(two, Direction::East);
        let tile = board.tile_at(1, 1).unwrap();
        board.place_piece(two, tile);

        assert_eq!(board.tile_notation(tile), "2|1|east");
        assert_eq!(board.to_notation(), ",,,,2|1|east,,,,,,,,,,,,,,,,");
    }

    #[test]
    fn game_two_way_serialization() {
        let mut game = Game::new();
        assert_eq!(game.to_notation(), format!("1#{EMPTY_BOARD_NOTATION}"));

        for (owner, kind, direction, x, y) in [
            (PlayerId::One, PieceType::Two, Direction::West, 2, 2),
            (PlayerId::Two, PieceType::Two, Direction::East, 2, 3),
            (PlayerId::One, PieceType::Five, Direction::South, 0, 2),
        ] {
            let piece = game.board.piece_by_type(owner, kind);
            game.board.set_piece_direction(piece, direction);
            game.board.place_piece(piece, game.board.tile_at(x, y).unwrap());
        }

        let clone = Game::from_notation(&game.to_notation()).unwrap();
        assert_eq!(clone.starting_player, PlayerId::One);
        assert_eq!(clone.to_notation(), game.to_notation());

        let piece = clone.board.tile_piece(clone.board.tile_at(2, 2).unwrap()).unwrap();
        assert_eq!(piece.kind, PieceType::Two);
        assert_eq!(piece.owner, PlayerId::One);
        assert_eq!(piece.direction, Some(Direction::West));

        let piece = clone.board.tile_piece(clone.board.tile_at(2, 3).unwrap()).unwrap();
        assert_eq!(piece.kind, PieceType::Two);
        assert_eq!(piece.owner, PlayerId::Two);
        assert_eq!(piece.direction, Some(Direction::East));

        let piece = clone.board.tile_piece(clone.board.tile_at(0, 2).unwrap()).unwrap();
        assert_eq!(piece.kind, PieceType::Five);
        assert_eq!(piece.owner, PlayerId::One);
        assert_eq!(piece.direction, Some(Direction::South));
    }

    #[test]
    fn malformed_notation_is_rejected() {
        assert!(Game::from_notation("3#,,,,,,,,,,,,,,,,,,,,").is_err());
        assert!(Game::from_notation("1#,,").is_err());
        assert!(Game::from_notation("1#6|1|east,,,,,,,,,,,,,,,,,,,,").is_err());
        assert!(Game::from_notation("1#2|1|upwards,,,,,,,,,,,,,,,,,,,,").is_err());
        assert!(Game::from_notation(EMPTY_BOARD_NOTATION).is_err());
        // The same piece cannot stand on two tiles.
        assert!(Game::from_notation("1#2|1|east,2|1|east,,,,,,,,,,,,,,,,,,,").is_err());
    }
}

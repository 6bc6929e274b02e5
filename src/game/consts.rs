use crate::game::prelude::*;

/// Width of the full tile grid, perimeter included.
pub const GRID_SIZE: i8 = 5;
/// Width of the inner play area where rows are scored.
pub const PLAY_AREA_SIZE: i8 = 3;
/// Coordinate values that mark a perimeter row or column.
pub const PERIMETER_COORDS: [i8; 2] = [0, 4];
/// The central coordinate of the grid.
pub const CENTER_COORD: i8 = 2;
/// Number of tiles on the board once the four corners are excluded.
pub const TILE_COUNT: usize = 21;
/// Number of pieces each player owns for the whole game.
pub const PIECES_PER_PLAYER: usize = 5;

// A player typing.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerId {
    One = 1,
    Two = 2,
}

impl PlayerId {
    /// Both players, player one first.
    pub fn all() -> [PlayerId; 2] {
        [PlayerId::One, PlayerId::Two]
    }

    /// The other player.
    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Notates the player.
    pub fn notate(&self) -> String {
        match self {
            PlayerId::One => "1",
            PlayerId::Two => "2",
        }
        .into()
    }

    /// Parses into a player.
    pub fn parse(s: &str) -> Result<PlayerId> {
        match s {
            "1" => Ok(PlayerId::One),
            "2" => Ok(PlayerId::Two),
            _ => Err(anyhow!("invalid notation {s} for player")),
        }
    }

    /// Recovers a player from its numeric id.
    pub fn from_value(value: u8) -> Result<PlayerId> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            _ => Err(anyhow!("invalid player id value {value}")),
        }
    }

    /// Zero-based arena offset for this player's pieces.
    pub(crate) fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

/// Outcome of a finished game, from the point of view of a given player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

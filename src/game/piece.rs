use crate::game::prelude::*;

/// The five piece types of a player's hand.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl PieceType {
    /// All piece types, in ascending movement priority.
    pub fn all() -> [PieceType; PIECES_PER_PLAYER] {
        [
            PieceType::One,
            PieceType::Two,
            PieceType::Three,
            PieceType::Four,
            PieceType::Five,
        ]
    }

    /// The numeric value of the type.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Recovers a type from its numeric value.
    pub fn from_value(value: u8) -> Result<PieceType> {
        match value {
            1 => Ok(PieceType::One),
            2 => Ok(PieceType::Two),
            3 => Ok(PieceType::Three),
            4 => Ok(PieceType::Four),
            5 => Ok(PieceType::Five),
            _ => Err(anyhow!("invalid piece type value {value}")),
        }
    }

    /// Notates the piece type.
    pub fn notate(&self) -> String {
        self.value().to_string()
    }

    /// Parses into a piece type.
    pub fn parse(s: &str) -> Result<PieceType> {
        let value = s
            .parse::<u8>()
            .map_err(|_| anyhow!("invalid notation {s} for piece type"))?;
        PieceType::from_value(value)
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

/// A single piece. Each player owns exactly one piece of each type for the
/// whole game; a piece without a tile is in its owner's hand.
#[derive(Clone, Copy, Debug)]
pub struct Piece {
    pub owner: PlayerId,
    pub kind: PieceType,
    pub direction: Option<Direction>,
    pub tile: Option<TileId>,
}

// Two pieces are the same piece iff owner and type match.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.kind == other.kind
    }
}

impl Eq for Piece {}

impl Piece {
    /// Constructs a fresh off-board piece.
    pub fn new(owner: PlayerId, kind: PieceType) -> Piece {
        Piece {
            owner,
            kind,
            direction: None,
            tile: None,
        }
    }

    /// Movement priority inside a tick; lower values move first. Smaller
    /// types go before larger ones, the starting player breaks ties.
    pub fn movement_order(&self, starting_player: PlayerId) -> u8 {
        if self.owner == starting_player {
            self.kind.value() * 10
        } else {
            self.kind.value() * 10 + 1
        }
    }

    /// The coordinate offsets of the piece's current facing.
    pub fn movement_offsets(&self) -> (i8, i8) {
        self.direction
            .expect("on-board pieces always have a direction")
            .offsets()
    }

    pub fn is_on_board(&self) -> bool {
        self.tile.is_some()
    }

    /// Returns the piece to its owner's hand, clearing its facing.
    pub fn remove_from_play(&mut self) {
        self.direction = None;
        self.tile = None;
    }

    /// Type one pieces can be displaced by any non-pushable mover.
    pub fn is_pushable(&self) -> bool {
        self.kind == PieceType::One
    }

    /// Type four pieces push whole chains in front of them.
    pub fn is_pusher(&self) -> bool {
        self.kind == PieceType::Four
    }

    /// Whether a piece standing at `coord` faces out of the play area, so the
    /// next tick would carry it off the board.
    pub fn is_exiting_board(&self, coord: Coord) -> bool {
        match self.direction {
            Some(Direction::West) => coord.x == 1,
            Some(Direction::East) => coord.x == PLAY_AREA_SIZE,
            Some(Direction::South) => coord.y == 1,
            Some(Direction::North) => coord.y == PLAY_AREA_SIZE,
            None => false,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = self
            .direction
            .map_or(String::new(), |d| d.notate()[0..1].to_uppercase());
        write!(f, "{}{} ({})", self.kind, direction, self.owner)
    }
}

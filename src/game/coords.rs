use crate::game::prelude::*;

/// A movement direction on the board.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North = 1,
    South = 2,
    East = 3,
    West = 4,
}

impl Direction {
    /// The coordinate offsets a piece facing this direction moves by.
    pub fn offsets(&self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Notates the direction.
    pub fn notate(&self) -> String {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
        .into()
    }

    /// Parses into a direction.
    pub fn parse(s: &str) -> Result<Direction> {
        match s {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            _ => Err(anyhow!("invalid notation {s} for direction")),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

/// A board coordinate on the 5x5 grid; the four corner cells do not exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(x: i8, y: i8) -> Coord {
        Coord { x, y }
    }

    /// Determines whether the coord denotes an existing tile: in bounds and not a corner.
    pub fn is_valid(&self) -> bool {
        let in_bounds = (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y);
        in_bounds && !self.is_corner()
    }

    /// Whether the coord lies on the perimeter ring around the play area.
    pub fn is_perimeter(&self) -> bool {
        PERIMETER_COORDS.contains(&self.x) || PERIMETER_COORDS.contains(&self.y)
    }

    /// Whether the coord is one of the four nonexistent corner cells.
    pub fn is_corner(&self) -> bool {
        PERIMETER_COORDS.contains(&self.x) && PERIMETER_COORDS.contains(&self.y)
    }

    /// The single direction from which a placed piece enters the play area.
    /// Only perimeter tiles have one.
    pub fn entry_direction(&self) -> Option<Direction> {
        if !self.is_perimeter() {
            return None;
        }
        if self.x == 0 {
            Some(Direction::East)
        } else if self.x == GRID_SIZE - 1 {
            Some(Direction::West)
        } else if self.y == 0 {
            Some(Direction::North)
        } else {
            Some(Direction::South)
        }
    }

    /// The coordinate one step away in the given direction; may be invalid.
    pub fn offset(&self, direction: Direction) -> Coord {
        let (dx, dy) = direction.offsets();
        Coord {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_not_valid_tiles() {
        for (x, y) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert!(!Coord::new(x, y).is_valid());
        }
        assert!(Coord::new(0, 2).is_valid());
        assert!(Coord::new(2, 2).is_valid());
        assert!(!Coord::new(5, 2).is_valid());
        assert!(!Coord::new(2, -1).is_valid());
    }

    #[test]
    fn perimeter_tiles_point_inward() {
        assert_eq!(Coord::new(0, 2).entry_direction(), Some(Direction::East));
        assert_eq!(Coord::new(4, 1).entry_direction(), Some(Direction::West));
        assert_eq!(Coord::new(3, 0).entry_direction(), Some(Direction::North));
        assert_eq!(Coord::new(1, 4).entry_direction(), Some(Direction::South));
        assert_eq!(Coord::new(2, 2).entry_direction(), None);
    }
}

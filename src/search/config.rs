use crate::game::prelude::*;

/// Score awarded to a resolved win; losses score its negation.
pub const WIN_CONDITION_SCORE: i32 = 1000;

/// Per-round penalty that biases the search toward faster wins and slower
/// losses. Low enough that it can never reorder two genuinely different
/// outcomes.
pub const DEPTH_PENALTY: i32 = 1;

/// Only exact evaluations at least this deep are worth persisting.
pub const MIN_DEPTH_TO_PERSIST: u8 = 2;

/// How a cached score relates to the true minimax value of its node.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvaluationType {
    /// The true score of the node.
    Exact = 0,
    /// An upper bound: the minimiser refuted everything at or above it.
    AlphaCutoff = 1,
    /// A lower bound: the maximiser stopped searching once it was exceeded.
    BetaCutoff = 2,
}

impl EvaluationType {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Result<EvaluationType> {
        match value {
            0 => Ok(EvaluationType::Exact),
            1 => Ok(EvaluationType::AlphaCutoff),
            2 => Ok(EvaluationType::BetaCutoff),
            _ => Err(anyhow!("invalid evaluation type value {value}")),
        }
    }
}

/// Base worth of each piece type while it stands on the play area. The
/// pusher scores negative: it is a tool, not a row candidate.
pub fn placed_piece_score(kind: PieceType) -> i32 {
    match kind {
        PieceType::One => 80,
        PieceType::Two => 120,
        PieceType::Three => 140,
        PieceType::Four => -80,
        PieceType::Five => 100,
    }
}

// Multipliers are integer percentages so that evaluation stays exact in i32
// arithmetic; every piece score is a multiple of 20.
pub const CENTER_PIECE_MULTIPLIER: i32 = 200;
pub const PIECE_ABOUT_TO_EXIT_MULTIPLIER: i32 = 70;
pub const FRESH_CORNER_PIECE_MULTIPLIER: i32 = 155;
pub const FRESH_CENTER_LANE_PIECE_MULTIPLIER: i32 = 170;
pub const NEUTRAL_MULTIPLIER: i32 = 100;

/// Positional multiplier (in percent) for a play-area piece: center bonus,
/// about-to-exit penalty, fresh corner and fresh center-lane entry bonuses.
pub fn tile_score_multiplier(x: i8, y: i8, direction: Direction) -> i32 {
    use Direction::*;
    match (x, y) {
        (1, 1) => match direction {
            East | North => FRESH_CORNER_PIECE_MULTIPLIER,
            West | South => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
        },
        (1, 2) => match direction {
            East => FRESH_CENTER_LANE_PIECE_MULTIPLIER,
            West => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
            _ => NEUTRAL_MULTIPLIER,
        },
        (1, 3) => match direction {
            East | South => FRESH_CORNER_PIECE_MULTIPLIER,
            West | North => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
        },
        (2, 1) => match direction {
            North => FRESH_CENTER_LANE_PIECE_MULTIPLIER,
            South => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
            _ => NEUTRAL_MULTIPLIER,
        },
        (2, 2) => CENTER_PIECE_MULTIPLIER,
        (2, 3) => match direction {
            South => FRESH_CENTER_LANE_PIECE_MULTIPLIER,
            North => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
            _ => NEUTRAL_MULTIPLIER,
        },
        (3, 1) => match direction {
            West | North => FRESH_CORNER_PIECE_MULTIPLIER,
            East | South => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
        },
        (3, 2) => match direction {
            West => FRESH_CENTER_LANE_PIECE_MULTIPLIER,
            East => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
            _ => NEUTRAL_MULTIPLIER,
        },
        (3, 3) => match direction {
            West | South => FRESH_CORNER_PIECE_MULTIPLIER,
            East | North => PIECE_ABOUT_TO_EXIT_MULTIPLIER,
        },
        _ => NEUTRAL_MULTIPLIER,
    }
}

// Ordering buckets for abstract moves, best last to worst first.
pub const PIECE_ENTRY_APPEARS_BLOCKED_ORDER: u8 = 1;
pub const ONE_CORNER_ROW_ORDER: u8 = 2;
pub const CORNER_ROW_ORDER: u8 = 3;
pub const CENTRAL_ROW_ORDER: u8 = 4;
pub const FOUR_CORNER_ROW_ORDER: u8 = 5;
pub const FOUR_CENTRAL_ROW_ORDER: u8 = 6;

/// Coarse placement priority for a piece type entering at `(x, y)`: pushers
/// first, the pushable one last, central entry lanes ahead of corner lanes.
pub fn piece_coordinate_sorting_order(kind: PieceType, x: i8, y: i8) -> u8 {
    let central_lane = x == CENTER_COORD || y == CENTER_COORD;
    match kind {
        PieceType::Four => {
            if central_lane {
                FOUR_CENTRAL_ROW_ORDER
            } else {
                FOUR_CORNER_ROW_ORDER
            }
        }
        PieceType::One => {
            if central_lane {
                CENTRAL_ROW_ORDER
            } else {
                ONE_CORNER_ROW_ORDER
            }
        }
        _ => {
            if central_lane {
                CENTRAL_ROW_ORDER
            } else {
                CORNER_ROW_ORDER
            }
        }
    }
}

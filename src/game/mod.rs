/*
 *  The Alphalcazar rules engine: board, pieces, movement resolution and the
 *  round driver.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub mod game;
pub mod notation;
pub(crate) mod piece;
pub(crate) mod placement;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, PieceId, Tile, TileId},
        consts::*,
        coords::{Coord, Direction},
        game::Game,
        piece::{Piece, PieceType},
        placement::PlacementMove,
    };
}

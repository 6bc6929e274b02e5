pub(crate) mod movements;
pub(crate) mod results;

use crate::game::prelude::*;

/// Stable handle into the board's tile arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub(crate) usize);

/// Stable handle into the board's piece arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub(crate) usize);

/// A single board tile. Perimeter tiles carry the direction any placed piece
/// is forced to face.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    pub coord: Coord,
    pub entry_direction: Option<Direction>,
    pub piece: Option<PieceId>,
}

impl Tile {
    pub fn is_perimeter(&self) -> bool {
        self.coord.is_perimeter()
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Placement targets are empty perimeter tiles.
    pub fn is_placement_legal(&self) -> bool {
        self.piece.is_none() && self.is_perimeter()
    }
}

/// The board: 21 tiles (the 5x5 grid minus its corners) plus both players'
/// ten pieces, on the board or in hand. Tiles and pieces live in owned
/// arenas addressed by `TileId`/`PieceId`, so cloning a board clones the
/// whole position.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Vec<Tile>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Constructs an empty board with every piece in hand. Tiles are laid
    /// out in lexicographic `(x, y)` order; that order is also the canonical
    /// notation order.
    pub fn new() -> Board {
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                let coord = Coord::new(x, y);
                if coord.is_corner() {
                    continue;
                }
                tiles.push(Tile {
                    coord,
                    entry_direction: coord.entry_direction(),
                    piece: None,
                });
            }
        }

        let mut pieces = Vec::with_capacity(PIECES_PER_PLAYER * 2);
        for owner in PlayerId::all() {
            for kind in PieceType::all() {
                pieces.push(Piece::new(owner, kind));
            }
        }

        Board { tiles, pieces }
    }

    // -- arena accessors

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    /// The tile at `(x, y)`, if it exists (in bounds and not a corner).
    pub fn tile_at(&self, x: i8, y: i8) -> Option<TileId> {
        let coord = Coord::new(x, y);
        if !coord.is_valid() {
            return None;
        }
        // The arena skips the four corners, whose row-major positions are
        // 0, 4, 20 and 24.
        let linear = x as usize * GRID_SIZE as usize + y as usize;
        let skipped = [0usize, 4, 20, 24].iter().filter(|&&c| c < linear).count();
        Some(TileId(linear - skipped))
    }

    pub fn coord_of(&self, id: TileId) -> Coord {
        self.tiles[id.0].coord
    }

    /// The piece of the given type owned by `owner`; piece sets are fixed,
    /// so this always resolves.
    pub fn piece_by_type(&self, owner: PlayerId, kind: PieceType) -> PieceId {
        PieceId(owner.index() * PIECES_PER_PLAYER + (kind.value() - 1) as usize)
    }

    pub fn tile_piece(&self, id: TileId) -> Option<&Piece> {
        self.tiles[id.0].piece.map(|p| self.piece(p))
    }

    pub fn has_piece_of_player(&self, id: TileId, owner: PlayerId) -> bool {
        self.tile_piece(id).is_some_and(|p| p.owner == owner)
    }

    // -- occupancy mutation

    /// Binds a piece to a tile. Placing onto an occupied tile is a rules
    /// violation, not an input error.
    pub fn place_piece(&mut self, piece: PieceId, tile: TileId) {
        assert!(
            self.tiles[tile.0].piece.is_none(),
            "tile {} is already occupied",
            self.coord_of(tile)
        );
        self.tiles[tile.0].piece = Some(piece);
        self.pieces[piece.0].tile = Some(tile);
    }

    /// Empties a tile, unbinding the piece that stood on it.
    pub fn remove_piece(&mut self, tile: TileId) {
        if let Some(piece) = self.tiles[tile.0].piece.take() {
            self.pieces[piece.0].tile = None;
        }
    }

    /// Returns a piece to its owner's hand, clearing its tile and facing.
    pub fn remove_from_play(&mut self, piece: PieceId) {
        if let Some(tile) = self.pieces[piece.0].tile {
            self.tiles[tile.0].piece = None;
        }
        self.pieces[piece.0].remove_from_play();
    }

    pub fn set_piece_direction(&mut self, piece: PieceId, direction: Direction) {
        self.pieces[piece.0].direction = Some(direction);
    }

    // -- queries

    /// The subset of perimeter tiles that are legal placement targets.
    pub fn legal_tiles(&self) -> Vec<TileId> {
        self.tiles()
            .filter(|(_, t)| t.is_placement_legal())
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of every on-board piece, in tile enumeration order.
    pub fn board_piece_ids(&self, exclude_perimeter: bool) -> Vec<PieceId> {
        self.tiles
            .iter()
            .filter(|t| !(exclude_perimeter && t.is_perimeter()))
            .filter_map(|t| t.piece)
            .collect()
    }

    /// The hand of the given player, in ascending type order.
    pub fn available_pieces(&self, owner: PlayerId) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.owner == owner && !p.is_on_board())
            .map(|(i, _)| PieceId(i))
            .collect()
    }

    /// Whether every play-area tile is occupied.
    pub fn is_full(&self) -> bool {
        self.tiles
            .iter()
            .filter(|t| !t.is_perimeter())
            .all(|t| t.piece.is_some())
    }

    /// Whether the piece currently faces out of the play area.
    pub fn piece_is_exiting(&self, id: PieceId) -> bool {
        let piece = self.piece(id);
        match piece.tile {
            Some(tile) => piece.is_exiting_board(self.coord_of(tile)),
            None => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

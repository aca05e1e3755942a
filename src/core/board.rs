//! Board module - tile ownership, move legality, shuffling, serialization
//!
//! The board owns every tile plus the row-major placement grid, keeps the
//! two mutually consistent, and guarantees that random shuffles stay
//! solvable via Calabro's parity criterion. Completed moves are announced
//! to registered listeners synchronously, in registration order.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rand::Rng;

use crate::core::tile::{Tile, TileOnTargetListener};
use crate::error::BoardError;
use crate::types::Move;

/// Observer for completed moves on a board
///
/// `blank` is the blank tile at its new cell and `moved` the displaced
/// tile now sitting where the blank was. Dispatched after the swap
/// completes.
pub trait MoveListener<A = ()> {
    fn tile_moved(&self, blank: &Tile<A>, moved: &Tile<A>);
}

/// Square sliding-tile board of `size * size` cells
///
/// Construction allocates the tiles and assigns their home cells; no tile
/// has a position until one of the placement methods runs. Position
/// queries and moves on an unplaced board fail with
/// [`BoardError::EmptyBoard`].
pub struct Board<A = ()> {
    size: usize,
    /// Row-major cell -> tile number; `None` until first populated.
    grid: Vec<Option<usize>>,
    /// Indexed by tile number; the blank is entry 0.
    tiles: Vec<Tile<A>>,
    move_listeners: Vec<Rc<dyn MoveListener<A>>>,
}

impl<A> Board<A> {
    /// Create an unplaced board
    ///
    /// Any positive size whose square fits the allocation range is
    /// accepted; the playable presets only use 3 through 5.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let fits = size
            .checked_mul(size)
            .is_some_and(|count| count <= isize::MAX as usize);
        if size == 0 || !fits {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::with_size(size))
    }

    /// Construction path for callers that already validated the size
    pub(crate) fn with_size(size: usize) -> Self {
        let tile_count = size * size;
        let mut tiles = Vec::with_capacity(tile_count);
        for number in 0..tile_count {
            let mut tile = Tile::new(number);
            // tile k is at home in cell k-1; the blank's home is the last cell
            let home = if number == 0 { tile_count } else { number } - 1;
            tile.set_target(home / size, home % size);
            tiles.push(tile);
        }
        Board {
            size,
            grid: vec![None; tile_count],
            tiles,
            move_listeners: Vec::new(),
        }
    }

    /// Edge size of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tiles, blank included (`size * size`)
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Count of tiles currently on their home cell, blank included
    pub fn score(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_on_target()).count()
    }

    /// Tile occupying the given cell
    pub fn tile_at(&self, row: usize, col: usize) -> Result<&Tile<A>, BoardError> {
        if row >= self.size {
            return Err(BoardError::RowOutOfRange {
                row,
                size: self.size,
            });
        }
        if col >= self.size {
            return Err(BoardError::ColumnOutOfRange {
                col,
                size: self.size,
            });
        }
        let number = self.grid[row * self.size + col].ok_or(BoardError::EmptyBoard)?;
        Ok(&self.tiles[number])
    }

    /// Canonical serialized form: comma-separated tile numbers, row-major
    ///
    /// Round-trips exactly through [`Board::place_tiles`].
    pub fn tile_layout(&self) -> Result<String, BoardError> {
        let mut layout = String::with_capacity(self.tile_count() * 3);
        for &cell in &self.grid {
            let number = cell.ok_or(BoardError::EmptyBoard)?;
            if !layout.is_empty() {
                layout.push(',');
            }
            layout.push_str(&number.to_string());
        }
        Ok(layout)
    }

    /// The move that would swap the blank with `tile`, if any
    ///
    /// Answers `None` for the blank itself and for tiles that are not
    /// orthogonally adjacent to it. The tile must be the very object this
    /// board holds under its number, not a look-alike.
    pub fn permitted_move_for(&self, tile: &Tile<A>) -> Result<Option<Move>, BoardError> {
        let number = tile.number();
        let held = self
            .tiles
            .get(number)
            .ok_or(BoardError::ForeignTile(number))?;
        if !std::ptr::eq(held, tile) {
            return Err(BoardError::ForeignTile(number));
        }
        if number == 0 {
            return Ok(None);
        }
        let (Some(pos), Some(blank)) = (tile.pos(), self.tiles[0].pos()) else {
            return Ok(None);
        };
        let dx = pos.col as isize - blank.col as isize;
        let dy = pos.row as isize - blank.row as isize;
        Ok(match (dx, dy) {
            (0, -1) => Some(Move::Up),
            (0, 1) => Some(Move::Down),
            (-1, 0) => Some(Move::Left),
            (1, 0) => Some(Move::Right),
            _ => None,
        })
    }

    /// Slide the blank one cell in `direction`
    ///
    /// Swaps the blank with the tile at the destination cell, then fires a
    /// move notification. Fails without touching the board when the
    /// destination is off the grid.
    pub fn make_move(&mut self, direction: Move) -> Result<(), BoardError> {
        let blank = self.tiles[0].pos().ok_or(BoardError::EmptyBoard)?;
        let (mut row, mut col) = (blank.row as isize, blank.col as isize);
        if direction.is_horizontal() {
            col += direction.amount();
        } else {
            row += direction.amount();
        }
        let side = self.size as isize;
        if row < 0 || row >= side || col < 0 || col >= side {
            return Err(BoardError::MoveOffBoard(direction));
        }
        let (row, col) = (row as usize, col as usize);
        let displaced = self.grid[row * self.size + col].ok_or(BoardError::EmptyBoard)?;
        self.swap_tiles(0, displaced);

        let blank = &self.tiles[0];
        let moved = &self.tiles[displaced];
        for listener in &self.move_listeners {
            listener.tile_moved(blank, moved);
        }
        Ok(())
    }

    /// Register a move observer; it lives as long as the board
    pub fn add_move_listener(&mut self, listener: Rc<dyn MoveListener<A>>) {
        self.move_listeners.push(listener);
    }

    /// Register an on-target observer on every tile of the board
    pub fn add_tile_on_target_listener(&mut self, listener: Rc<dyn TileOnTargetListener<A>>) {
        for tile in &mut self.tiles {
            tile.add_on_target_listener(listener.clone());
        }
    }

    /// Visit every tile in ascending number order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile<A>> {
        self.tiles.iter()
    }

    /// Apply `handler` to every tile in ascending number order
    pub fn for_each_tile(&self, mut handler: impl FnMut(&Tile<A>)) {
        for tile in &self.tiles {
            handler(tile);
        }
    }

    pub(crate) fn for_each_tile_mut(&mut self, mut handler: impl FnMut(&mut Tile<A>)) {
        for tile in &mut self.tiles {
            handler(tile);
        }
    }

    /// Lay tiles out in descending number order from the top-left
    ///
    /// A fixed reference layout. On even sizes the plain reversal is an
    /// odd permutation, so the tiles numbered 1 and 2 are swapped to keep
    /// the layout reachable from the solved state.
    pub fn place_tiles_reverse(&mut self) {
        let size = self.size;
        for (slot, number) in (0..self.tile_count()).rev().enumerate() {
            self.place_tile(number, slot / size, slot % size);
        }
        if size % 2 == 0 {
            self.swap_tiles(1, 2);
        }
    }

    /// Place every tile on its home cell (the solved arrangement)
    pub fn place_tiles_on_target(&mut self) {
        for number in 0..self.tile_count() {
            if let Some(target) = self.tiles[number].target() {
                self.place_tile(number, target.row, target.col);
            }
        }
    }

    /// Restore a layout produced by [`Board::tile_layout`]
    ///
    /// The k-th token names the tile placed into the k-th row-major cell.
    /// Stray separators are skipped. The whole string is validated before
    /// any tile moves, so a failed parse leaves the board unchanged.
    pub fn place_tiles(&mut self, layout: &str) -> Result<(), BoardError> {
        let tile_count = self.tile_count();
        let mut numbers = Vec::with_capacity(tile_count);
        let mut seen = vec![false; tile_count];
        for token in layout.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let number: usize = token
                .parse()
                .map_err(|_| BoardError::LayoutSyntax(token.to_string()))?;
            if number >= tile_count {
                return Err(BoardError::LayoutUnknownTile { number, tile_count });
            }
            if seen[number] {
                return Err(BoardError::LayoutDuplicateTile(number));
            }
            seen[number] = true;
            numbers.push(number);
        }
        if numbers.len() < tile_count {
            return Err(BoardError::LayoutIncomplete {
                expected: tile_count,
                placed: numbers.len(),
            });
        }
        let size = self.size;
        for (slot, number) in numbers.into_iter().enumerate() {
            self.place_tile(number, slot / size, slot % size);
        }
        Ok(())
    }

    /// Shuffle into a uniformly random, guaranteed-solvable layout
    ///
    /// Every tile draws a distinct random key (collisions retried) and the
    /// key order is the permutation. If the result fails the parity
    /// criterion, the tiles numbered 1 and 2 are swapped, which flips the
    /// permutation sign without disturbing the blank. The fix-up is
    /// skipped on boards too small to hold tiles 1 and 2.
    pub fn place_tiles_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.size;
        let mut keyed: BTreeMap<u32, usize> = BTreeMap::new();
        for number in (0..self.tile_count()).rev() {
            loop {
                let key = rng.random::<u32>();
                if !keyed.contains_key(&key) {
                    keyed.insert(key, number);
                    break;
                }
            }
        }
        for (slot, number) in keyed.into_values().enumerate() {
            self.place_tile(number, slot / size, slot % size);
        }
        if self.tile_count() > 2 && matches!(self.is_solvable(), Ok(false)) {
            self.swap_tiles(1, 2);
        }
    }

    /// Calabro's parity criterion
    ///
    /// A layout is reachable from the solved state iff the permutation
    /// sign equals `(blank_row + blank_col) % 2`. See Chris Calabro,
    /// "Solving the 15-Puzzle" (2005).
    pub fn is_solvable(&self) -> Result<bool, BoardError> {
        let sign = self.permutation_sign().ok_or(BoardError::EmptyBoard)?;
        let blank = self.tiles[0].pos().ok_or(BoardError::EmptyBoard)?;
        Ok(sign == (blank.row + blank.col) % 2)
    }

    /// Permutation sign by cycle decomposition over a 1-indexed array
    ///
    /// The blank counts as occupying slot `size * size`. `None` until
    /// every tile has a position.
    fn permutation_sign(&self) -> Option<usize> {
        let count = self.tile_count();
        let mut perm = vec![0usize; count + 1];
        for tile in &self.tiles {
            let pos = tile.pos()?;
            let slot = pos.row * self.size + pos.col + 1;
            perm[slot] = if tile.number() == 0 {
                count
            } else {
                tile.number()
            };
        }
        let mut sign = 0;
        let mut i = 1;
        while i <= count {
            if perm[i] == i {
                i += 1;
            } else {
                let target = perm[i];
                perm.swap(i, target);
                sign = 1 - sign;
            }
        }
        Some(sign)
    }

    /// Swap the cells of the tiles numbered `a` and `b`
    fn swap_tiles(&mut self, a: usize, b: usize) {
        if let (Some(pa), Some(pb)) = (self.tiles[a].pos(), self.tiles[b].pos()) {
            self.place_tile(a, pb.row, pb.col);
            self.place_tile(b, pa.row, pa.col);
        }
    }

    fn place_tile(&mut self, number: usize, row: usize, col: usize) {
        self.tiles[number].place(row, col);
        self.grid[row * self.size + col] = Some(number);
    }
}

impl<A> fmt::Debug for Board<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("grid", &self.grid)
            .finish()
    }
}

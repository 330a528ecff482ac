//! Tile grid and solidity lookup
//!
//! Cells hold a (category, variant) pair from the tile atlas. Only the two
//! ground tiles block movement; everything else, including any cell outside the
//! map, is passable.

use serde::{Deserialize, Serialize};

/// A single map cell, addressed by its atlas (category, variant) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub category: u8,
    pub variant: u8,
}

impl Tile {
    pub const EMPTY: Tile = Tile::new(0, 0);
    pub const GROUND: Tile = Tile::new(0, 1);
    pub const BLOCK: Tile = Tile::new(0, 2);
    /// Enemy origin; cleared to `EMPTY` once the enemy is spawned
    pub const SPAWN_MARKER: Tile = Tile::new(1, 0);

    pub const fn new(category: u8, variant: u8) -> Self {
        Self { category, variant }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.category == 0 && matches!(self.variant, 1 | 2)
    }
}

/// Answers "does this cell block movement?"
///
/// Implementations must treat out-of-range cells as passable.
pub trait TileLookup {
    fn is_solid(&self, cell_x: i32, cell_y: i32) -> bool;
}

/// Fixed-size grid of tiles, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with `Tile::EMPTY`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::EMPTY; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell_x: i32, cell_y: i32) -> Option<usize> {
        if cell_x < 0 || cell_y < 0 {
            return None;
        }
        let (x, y) = (cell_x as usize, cell_y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Tile at a cell, `None` when out of range
    pub fn get(&self, cell_x: i32, cell_y: i32) -> Option<Tile> {
        self.index(cell_x, cell_y).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Returns false (and does nothing) when out of range.
    pub fn set(&mut self, cell_x: i32, cell_y: i32, tile: Tile) -> bool {
        match self.index(cell_x, cell_y) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    pub fn is_spawn_marker(&self, cell_x: i32, cell_y: i32) -> bool {
        self.get(cell_x, cell_y) == Some(Tile::SPAWN_MARKER)
    }

    /// Collect every spawn marker (row by row, left to right) and clear it.
    pub fn take_spawn_markers(&mut self) -> Vec<(i32, i32)> {
        let mut markers = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.is_spawn_marker(x, y) {
                    self.set(x, y, Tile::EMPTY);
                    markers.push((x, y));
                }
            }
        }
        markers
    }
}

impl TileLookup for TileGrid {
    #[inline]
    fn is_solid(&self, cell_x: i32, cell_y: i32) -> bool {
        self.get(cell_x, cell_y).is_some_and(Tile::is_solid)
    }
}

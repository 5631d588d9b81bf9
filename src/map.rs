/// Static tile grid the arena is built from.

use crate::entities::{Rect, Tile, TileKind, FIELD_HEIGHT, FIELD_WIDTH, TILE_SIZE};
use crate::error::MapError;

/// Stock arena: 20×15 tiles of 40 px, walled in, with a few pillars.
/// `#` is a wall, `.` is floor.
pub const ARENA_LAYOUT: &str = "\
####################
#..................#
#..................#
#.....##.....##....#
#.....##.....##....#
#..................#
#..................#
#........##........#
#........##........#
#..................#
#..................#
#....##......##....#
#....##......##....#
#..................#
####################";

#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    cols: usize,
    rows: usize,
    /// Row-major.
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Floor everywhere except a one-tile wall ring around the edge.
    pub fn bordered(cols: usize, rows: usize) -> Self {
        let mut tiles = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let edge = row == 0 || row + 1 == rows || col == 0 || col + 1 == cols;
                let kind = if edge { TileKind::Wall } else { TileKind::Floor };
                tiles.push(tile_at(col, row, kind));
            }
        }
        Self { cols, rows, tiles }
    }

    /// Parse a text layout, one line per tile row.  Blank lines are skipped.
    pub fn from_layout(layout: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();

        let cols = match lines.first() {
            Some(first) => first.chars().count(),
            None => return Err(MapError::Empty),
        };

        let mut tiles = Vec::with_capacity(cols * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MapError::RaggedRow { row, expected: cols, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind = match ch {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Floor,
                    _ => return Err(MapError::UnknownTile { row, col, ch }),
                };
                tiles.push(tile_at(col, row, kind));
            }
        }

        Ok(Self { cols, rows: lines.len(), tiles })
    }

    /// The stock arena, sized to fill the playfield.
    pub fn arena() -> Result<Self, MapError> {
        Self::from_layout(ARENA_LAYOUT)
    }

    /// Tile count of a map that exactly covers the playfield.
    pub fn field_dimensions() -> (usize, usize) {
        ((FIELD_WIDTH / TILE_SIZE) as usize, (FIELD_HEIGHT / TILE_SIZE) as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Tile> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.tiles.get(row * self.cols + col)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn walls(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_wall())
    }

    /// True if `bounds` overlaps any wall tile.
    pub fn hits_wall(&self, bounds: &Rect) -> bool {
        self.walls().any(|t| bounds.intersects(&t.bounds()))
    }
}

fn tile_at(col: usize, row: usize, kind: TileKind) -> Tile {
    Tile {
        x: col as i32 * TILE_SIZE,
        y: row as i32 * TILE_SIZE,
        kind,
    }
}

// src/dungeon/src/map.rs
use std::fmt;

use thiserror::Error;

use crate::tiles::Tile;

/// 默认地图边长
pub const MAP_SIZE: usize = 7;

/// 默认地图布局：`.` 空地，`#` 障碍，`E` 敌人。第 y 行第 x 列。
pub const DEFAULT_LAYOUT: [&str; MAP_SIZE] = [
    "..#...E",
    ".##.E..",
    ".....#.",
    ".E.#...",
    "..#..E#",
    "#...#..",
    "E.#....",
];

/// 地图构建错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map layout has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Fixed-size grid of tiles, mutated in place.
///
/// Callers check `in_bounds` before touching a coordinate; `tile_at` and
/// `set_tile` panic on out-of-bounds access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMap {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl GameMap {
    /// Build a map from rows of layout glyphs.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).ok_or(MapError::UnknownGlyph { glyph, x, y })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            tiles,
            width,
            height: rows.len(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 检查坐标是否在地图范围内
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.tiles[self.index(x, y)]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        let idx = self.index(x, y);
        self.tiles[idx] = tile;
    }

    /// 剩余敌人数量
    pub fn enemy_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.has_enemy()).count()
    }

    /// Rows top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "tile ({x}, {y}) outside {}x{} map",
            self.width,
            self.height
        );
        y as usize * self.width + x as usize
    }
}

impl Default for GameMap {
    fn default() -> Self {
        let tiles = DEFAULT_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|glyph| Tile::from_glyph(glyph).unwrap_or_default())
            .collect();
        Self {
            tiles,
            width: MAP_SIZE,
            height: MAP_SIZE,
        }
    }
}

impl fmt::Display for GameMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_map_matches_layout() {
        let map = GameMap::default();
        assert_eq!(map.width(), 7);
        assert_eq!(map.height(), 7);
        assert_eq!(map.to_string(), DEFAULT_LAYOUT.join("\n"));
        assert_eq!(map.enemy_count(), 5);
        assert_eq!(map.tile_at(2, 0), Tile::Obstacle);
        assert_eq!(map.tile_at(6, 0), Tile::Enemy);
        assert_eq!(map.tile_at(0, 6), Tile::Enemy);
        assert_eq!(map.tile_at(0, 0), Tile::Empty);
    }

    #[test]
    fn test_from_rows_matches_default() {
        let parsed = GameMap::from_rows(&DEFAULT_LAYOUT).unwrap();
        assert_eq!(parsed, GameMap::default());
    }

    #[test]
    fn test_bounds() {
        let map = GameMap::default();
        assert!(map.in_bounds(0, 0));
        assert!(map.in_bounds(6, 6));
        assert!(!map.in_bounds(-1, 0));
        assert!(!map.in_bounds(0, -1));
        assert!(!map.in_bounds(7, 0));
        assert!(!map.in_bounds(0, 7));
    }

    #[test]
    fn test_set_tile() {
        let mut map = GameMap::default();
        map.set_tile(6, 0, Tile::Empty);
        assert_eq!(map.tile_at(6, 0), Tile::Empty);
        assert_eq!(map.enemy_count(), 4);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_access_panics() {
        let map = GameMap::default();
        map.tile_at(7, 7);
    }

    #[test]
    fn test_from_rows_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(GameMap::from_rows(&empty), Err(MapError::Empty));
        assert_eq!(
            GameMap::from_rows(&["...", ".."]),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            GameMap::from_rows(&[".x."]),
            Err(MapError::UnknownGlyph {
                glyph: 'x',
                x: 1,
                y: 0
            })
        );
    }
}

// src/dungeon/src/tiles.rs
use std::fmt;

/// 地图格子的状态
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// 空地，可通行
    #[default]
    Empty,
    /// 障碍物（树），永久存在
    Obstacle,
    /// 有敌人占据，击败后变为空地
    Enemy,
}

impl Tile {
    /// Parse the single-character layout notation.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Tile::Empty),
            '#' => Some(Tile::Obstacle),
            'E' => Some(Tile::Enemy),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Obstacle => '#',
            Tile::Enemy => 'E',
        }
    }

    /// Whether the hero may step onto this tile at all
    pub fn is_passable(&self) -> bool {
        !matches!(self, Tile::Obstacle)
    }

    pub fn has_enemy(&self) -> bool {
        matches!(self, Tile::Enemy)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

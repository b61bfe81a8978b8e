//src/dungeon/src/lib.rs
//! The tile map the hero walks on.

pub mod map;
pub mod tiles;

pub use crate::map::{GameMap, MapError, DEFAULT_LAYOUT, MAP_SIZE};
pub use crate::tiles::Tile;

// src/hero/src/lib.rs
//! Hero stats, progression and inventory.

mod bag;
mod core;

pub use self::{
    bag::Bag,
    core::{HeroError, ItemEffect, LevelUp, Player},
};

/// 初始属性与成长常量
pub mod constants {
    pub const DEFAULT_NAME: &str = "Hero";
    pub const START_HP: u32 = 30;
    pub const START_ATTACK: u32 = 6;
    pub const START_HEAL: u32 = 6;
    pub const START_XP_TO_NEXT: u32 = 15;

    pub const HP_PER_LEVEL: u32 = 8;
    pub const ATTACK_PER_LEVEL: u32 = 2;
    pub const HEAL_PER_LEVEL: u32 = 2;
    /// Threshold growth is `xp_to_next * 16 / 10 + level * 8` (integer floor of ×1.6).
    pub const XP_GROWTH_NUM: u32 = 16;
    pub const XP_GROWTH_DEN: u32 = 10;
    pub const XP_PER_LEVEL: u32 = 8;
}

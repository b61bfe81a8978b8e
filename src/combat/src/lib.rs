// src/combat/src/lib.rs
//! Encounter combat: enemy catalog, random sources and the turn engine.

pub mod enemy;
pub mod engine;
pub mod rng;

pub use crate::enemy::{ENEMY_CATALOG, Enemy, EnemyFactory, EnemyTemplate, SpecialAbility};
pub use crate::engine::{CombatEngine, CombatState};
pub use crate::rng::{RandomSource, ScriptedRng, SeededRng};

use hero::LevelUp;
use items::Item;

/// Combat configuration constants
pub mod constants {
    /// Both strikes add a uniform roll in 0..=DAMAGE_SPREAD.
    pub const DAMAGE_SPREAD: u32 = 2;
    pub const POTION_DROP_CHANCE: f64 = 0.45;
    /// Victory heal is this plus the hero's level.
    pub const VICTORY_HEAL_BASE: u32 = 5;
    pub const FIRE_CHANCE: f64 = 0.25;
    pub const FIRE_BONUS_DAMAGE: u32 = 4;
    pub const STONE_REGEN_CHANCE: f64 = 0.3;
    pub const STONE_REGEN_HP: u32 = 6;
}

/// 单回合结算结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No enemy was engaged; nothing happened.
    Idle,
    /// Both sides still standing.
    Continuing,
    Victory,
    Defeat,
}

/// Turn result with combat logs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    pub logs: Vec<String>, // Combat messages for the event log
    pub xp_gained: u32,
    pub level_ups: Vec<LevelUp>,
    pub loot: Option<Item>,
}

impl TurnReport {
    pub fn new(outcome: TurnOutcome) -> Self {
        Self {
            outcome,
            logs: Vec::new(),
            xp_gained: 0,
            level_ups: Vec::new(),
            loot: None,
        }
    }

    pub fn log(&mut self, message: String) {
        self.logs.push(message);
    }
}

// src/combat/src/engine.rs
//! Turn-by-turn encounter resolution.
//!
//! The engine is either idle or engaged with exactly one enemy, bound to the
//! map coordinate where the encounter started. Each call to
//! [`CombatEngine::resolve_turn`] plays one exchange: the hero strikes, then a
//! surviving enemy strikes back. Callers loop until the outcome is final.

use dungeon::{GameMap, Tile};
use hero::Player;
use items::Item;
use log::{debug, info, warn};

use crate::constants::*;
use crate::enemy::{Enemy, SpecialAbility};
use crate::rng::RandomSource;
use crate::{TurnOutcome, TurnReport};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CombatState {
    #[default]
    Idle,
    Engaged {
        enemy: Enemy,
        /// Encounter tile, cleared on victory
        at: (i32, i32),
    },
}

#[derive(Clone, Debug, Default)]
pub struct CombatEngine {
    state: CombatState,
}

impl CombatEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn is_engaged(&self) -> bool {
        matches!(self.state, CombatState::Engaged { .. })
    }

    /// 当前敌人
    pub fn enemy(&self) -> Option<&Enemy> {
        match &self.state {
            CombatState::Engaged { enemy, .. } => Some(enemy),
            CombatState::Idle => None,
        }
    }

    /// Start an encounter with `enemy` on the tile at `at`.
    pub fn engage(&mut self, enemy: Enemy, at: (i32, i32)) {
        if let CombatState::Engaged { enemy: previous, .. } = &self.state {
            warn!("replacing unfinished encounter with {}", previous.name);
        }
        info!("engaged {} at {:?}", enemy.name, at);
        self.state = CombatState::Engaged { enemy, at };
    }

    /// Drop any active encounter.
    pub fn disengage(&mut self) {
        self.state = CombatState::Idle;
    }

    /// 结算一个回合：英雄攻击，敌人存活则反击
    pub fn resolve_turn(
        &mut self,
        player: &mut Player,
        map: &mut GameMap,
        rng: &mut dyn RandomSource,
    ) -> TurnReport {
        let CombatState::Engaged { enemy, at } = &mut self.state else {
            return TurnReport::new(TurnOutcome::Idle);
        };
        let at = *at;
        let mut report = TurnReport::new(TurnOutcome::Continuing);

        // Hero strike
        let strike = player.attack_power + rng.roll_range(0, DAMAGE_SPREAD);
        enemy.take_damage(strike);
        report.log(format!(
            "You strike the {} for {} damage.",
            enemy.name, strike
        ));

        if !enemy.is_alive() {
            let name = enemy.name.clone();
            let xp = enemy.xp_reward;
            self.state = CombatState::Idle;
            Self::claim_victory(&mut report, &name, xp, at, player, map, rng);
            return report;
        }

        // Enemy counter-strike
        let mut damage = enemy.attack + rng.roll_range(0, DAMAGE_SPREAD);
        match enemy.special {
            Some(SpecialAbility::Fire) => {
                if rng.chance(FIRE_CHANCE) {
                    damage += FIRE_BONUS_DAMAGE;
                    report.log(format!("The {} breathes fire!", enemy.name));
                }
            }
            Some(SpecialAbility::StoneRegen) => {
                if rng.chance(STONE_REGEN_CHANCE) {
                    enemy.regenerate(STONE_REGEN_HP);
                    report.log(format!(
                        "The {} regenerates stone fragments! (+{} HP)",
                        enemy.name, STONE_REGEN_HP
                    ));
                }
            }
            None => {}
        }

        report.log(format!(
            "The {} strikes you for {} damage.",
            enemy.name, damage
        ));
        debug!(
            "turn: hero dealt {strike}, took {damage}; enemy hp {} hero hp {}",
            enemy.hp,
            player.hp.saturating_sub(damage)
        );

        if player.apply_damage(damage) {
            report.outcome = TurnOutcome::Defeat;
            report.log("You were defeated!".to_string());
            info!("{} was defeated by the {}", player.name, enemy.name);
        }

        report
    }

    fn claim_victory(
        report: &mut TurnReport,
        enemy_name: &str,
        xp: u32,
        at: (i32, i32),
        player: &mut Player,
        map: &mut GameMap,
        rng: &mut dyn RandomSource,
    ) {
        report.outcome = TurnOutcome::Victory;
        report.xp_gained = xp;
        report.log(format!("You defeated the {enemy_name}! Gained {xp} XP."));

        let level_ups = player.award_xp(xp);
        for up in &level_ups {
            report.log(format!(
                "Level up! You are now level {} (HP {}, attack {}).",
                up.level, up.max_hp, up.attack_power
            ));
        }
        report.level_ups = level_ups;

        if rng.chance(POTION_DROP_CHANCE) {
            player.add_item(Item::HealingPotion);
            report.loot = Some(Item::HealingPotion);
            report.log(format!("You found a {}!", Item::HealingPotion));
        }

        player.heal(VICTORY_HEAL_BASE + player.level);

        let (x, y) = at;
        if map.in_bounds(x, y) {
            map.set_tile(x, y, Tile::Empty);
        } else {
            warn!("encounter tile {at:?} is outside the map; nothing to clear");
        }
        info!("{} defeated the {enemy_name} at {at:?}", player.name);
    }
}

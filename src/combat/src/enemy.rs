// src/combat/src/enemy.rs
use log::debug;
use strum::Display;

use crate::rng::RandomSource;

/// 敌人缩放常量
mod scaling {
    pub const HP_PER_LEVEL: u32 = 6;
    /// Attack grows by floor(level * 0.9).
    pub const ATTACK_PER_LEVEL_NUM: u32 = 9;
    pub const ATTACK_PER_LEVEL_DEN: u32 = 10;
    /// Catalog entries unlocked at level 0; one more per two levels.
    pub const BASE_UNLOCKED_INDEX: u32 = 2;
}

/// 敌人特殊能力
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SpecialAbility {
    /// Chance of bonus damage on the counter-strike
    #[strum(to_string = "fire")]
    Fire,
    /// Chance of healing itself each turn
    #[strum(to_string = "stone regeneration")]
    StoneRegen,
}

/// 敌人图鉴条目
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_xp: u32,
    pub special: Option<SpecialAbility>,
}

impl EnemyTemplate {
    pub const fn new(name: &'static str, base_hp: u32, base_attack: u32, base_xp: u32) -> Self {
        Self {
            name,
            base_hp,
            base_attack,
            base_xp,
            special: None,
        }
    }

    pub const fn with_special(self, special: SpecialAbility) -> Self {
        Self {
            special: Some(special),
            ..self
        }
    }
}

/// Enemies in unlock order, weakest first.
pub const ENEMY_CATALOG: [EnemyTemplate; 6] = [
    EnemyTemplate::new("Goblin", 14, 3, 8),
    EnemyTemplate::new("Wolf", 18, 4, 10),
    EnemyTemplate::new("Bandit", 24, 6, 16),
    EnemyTemplate::new("Spider", 20, 5, 12),
    EnemyTemplate::new("Golem", 36, 9, 26).with_special(SpecialAbility::StoneRegen),
    EnemyTemplate::new("Young Dragon", 50, 14, 50).with_special(SpecialAbility::Fire),
];

/// 战斗中的敌人实例，仅存在于一次遭遇战
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: u32,
    pub xp_reward: u32,
    pub special: Option<SpecialAbility>,
}

impl Enemy {
    /// Scale a template to the hero's level.
    pub fn from_template(template: &EnemyTemplate, player_level: u32) -> Self {
        let hp = (template.base_hp + player_level * scaling::HP_PER_LEVEL) as i32;
        let attack = template.base_attack
            + player_level * scaling::ATTACK_PER_LEVEL_NUM / scaling::ATTACK_PER_LEVEL_DEN;
        Self {
            name: template.name.to_string(),
            hp,
            max_hp: hp,
            attack,
            xp_reward: template.base_xp,
            special: template.special,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp -= amount as i32;
    }

    /// Regeneration is not capped at the spawn hp.
    pub fn regenerate(&mut self, amount: u32) {
        self.hp += amount as i32;
    }
}

/// Picks and scales enemies for encounters.
#[derive(Clone, Debug)]
pub struct EnemyFactory {
    catalog: Vec<EnemyTemplate>,
}

impl EnemyFactory {
    /// Returns `None` for an empty catalog.
    pub fn with_catalog(catalog: Vec<EnemyTemplate>) -> Option<Self> {
        if catalog.is_empty() {
            None
        } else {
            Some(Self { catalog })
        }
    }

    /// 根据等级计算可出现的最高图鉴索引
    pub fn max_index(&self, player_level: u32) -> usize {
        let unlocked = (player_level / 2 + scaling::BASE_UNLOCKED_INDEX) as usize;
        unlocked.min(self.catalog.len() - 1)
    }

    /// 生成一个按等级缩放的敌人，所有已解锁条目等概率
    pub fn spawn(&self, player_level: u32, rng: &mut dyn RandomSource) -> Enemy {
        let max_index = self.max_index(player_level);
        let idx = (rng.roll_range(0, max_index as u32) as usize).min(max_index);
        let enemy = Enemy::from_template(&self.catalog[idx], player_level);
        debug!(
            "spawned {} (catalog #{idx} of 0..={max_index}) hp={} atk={}",
            enemy.name, enemy.hp, enemy.attack
        );
        enemy
    }
}

impl Default for EnemyFactory {
    fn default() -> Self {
        Self {
            catalog: ENEMY_CATALOG.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enemy_scaling() {
        let goblin = Enemy::from_template(&ENEMY_CATALOG[0], 1);
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.hp, 20);
        assert_eq!(goblin.max_hp, 20);
        assert_eq!(goblin.attack, 3);
        assert_eq!(goblin.xp_reward, 8);
        assert_eq!(goblin.special, None);

        let dragon = Enemy::from_template(&ENEMY_CATALOG[5], 5);
        assert_eq!(dragon.hp, 80);
        // 14 + floor(4.5)
        assert_eq!(dragon.attack, 18);
        assert_eq!(dragon.special, Some(SpecialAbility::Fire));
    }

    #[test]
    fn test_max_index_grows_with_level() {
        let factory = EnemyFactory::default();
        assert_eq!(factory.max_index(1), 2);
        assert_eq!(factory.max_index(2), 3);
        assert_eq!(factory.max_index(4), 4);
        assert_eq!(factory.max_index(6), 5);
        assert_eq!(factory.max_index(40), 5);
    }

    #[test]
    fn test_spawn_uses_rolled_index() {
        let factory = EnemyFactory::default();
        let mut rng = ScriptedRng::with_rolls([0, 2, 5], []);
        assert_eq!(factory.spawn(1, &mut rng).name, "Goblin");
        assert_eq!(factory.spawn(1, &mut rng).name, "Bandit");
        // roll clamped to the unlocked range at level 1
        assert_eq!(factory.spawn(1, &mut rng).name, "Bandit");
    }

    #[test]
    fn test_spawn_never_exceeds_unlocked_range() {
        let factory = EnemyFactory::default();
        let mut rng = SeededRng::new(99);
        for _ in 0..500 {
            let enemy = factory.spawn(1, &mut rng);
            assert!(["Goblin", "Wolf", "Bandit"].contains(&enemy.name.as_str()));
        }
    }

    #[test]
    fn test_custom_catalog() {
        assert!(EnemyFactory::with_catalog(Vec::new()).is_none());

        let factory =
            EnemyFactory::with_catalog(vec![EnemyTemplate::new("Slime", 1, 1, 1)]).unwrap();
        assert_eq!(factory.max_index(10), 0);
        let mut rng = ScriptedRng::with_rolls([3], []);
        assert_eq!(factory.spawn(10, &mut rng).name, "Slime");
    }

    #[test]
    fn test_special_names() {
        assert_eq!(SpecialAbility::Fire.to_string(), "fire");
        assert_eq!(SpecialAbility::StoneRegen.to_string(), "stone regeneration");
    }
}

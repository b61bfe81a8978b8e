// src/hero/src/core.rs
use items::Item;
use log::info;
use thiserror::Error;

use crate::bag::Bag;
use crate::constants::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeroError {
    #[error("no {0} in the inventory")]
    ItemUnavailable(Item),
}

/// 一次升级带来的属性变化
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub max_hp: u32,
    pub attack_power: u32,
    pub heal_amount: u32,
}

/// 使用物品后的效果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    /// `restored` is the hp actually gained after clamping to max hp.
    Healed { item: Item, restored: u32 },
}

/// 英雄核心数据结构
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack_power: u32,
    pub heal_amount: u32,

    // 成长系统
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,

    pub bag: Bag,
}

impl Player {
    /// 创建初始英雄：位于 (0,0)，携带一瓶治疗药水
    pub fn new(name: impl Into<String>) -> Self {
        let mut bag = Bag::new();
        bag.add(Item::HealingPotion);
        Self {
            name: name.into(),
            x: 0,
            y: 0,
            hp: START_HP,
            max_hp: START_HP,
            attack_power: START_ATTACK,
            heal_amount: START_HEAL,
            level: 1,
            xp: 0,
            xp_to_next: START_XP_TO_NEXT,
            bag,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// 获取经验值，可能连续升级多次
    pub fn award_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.xp = self.xp.saturating_add(amount);

        let mut gained = Vec::new();
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            gained.push(self.level_up());
        }
        gained
    }

    fn level_up(&mut self) -> LevelUp {
        self.level += 1;
        self.xp_to_next = (self.xp_to_next.saturating_mul(XP_GROWTH_NUM) / XP_GROWTH_DEN)
            .saturating_add(self.level * XP_PER_LEVEL);
        self.max_hp += HP_PER_LEVEL;
        self.attack_power += ATTACK_PER_LEVEL;
        self.heal_amount += HEAL_PER_LEVEL;
        self.hp = self.max_hp;

        info!(
            "{} reached level {} (next at {} xp)",
            self.name, self.level, self.xp_to_next
        );

        LevelUp {
            level: self.level,
            max_hp: self.max_hp,
            attack_power: self.attack_power,
            heal_amount: self.heal_amount,
        }
    }

    /// 受到伤害，返回是否被击倒
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.is_defeated()
    }

    /// 治疗，不超过最大生命值。返回实际恢复量
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn add_item(&mut self, item: Item) {
        self.bag.add(item);
    }

    pub fn count_item(&self, item: Item) -> usize {
        self.bag.count(item)
    }

    pub fn inventory(&self) -> &Bag {
        &self.bag
    }

    /// 使用物品；背包中没有时不做任何修改
    pub fn use_item(&mut self, item: Item) -> Result<ItemEffect, HeroError> {
        let item = self.bag.take(item).ok_or(HeroError::ItemUnavailable(item))?;
        match item {
            Item::HealingPotion => {
                let restored = self.heal(self.heal_amount);
                Ok(ItemEffect::Healed { item, restored })
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starting_stats() {
        let hero = Player::default();
        assert_eq!(hero.name, "Hero");
        assert_eq!(hero.position(), (0, 0));
        assert_eq!((hero.hp, hero.max_hp), (30, 30));
        assert_eq!(hero.attack_power, 6);
        assert_eq!(hero.heal_amount, 6);
        assert_eq!((hero.level, hero.xp, hero.xp_to_next), (1, 0, 15));
        assert_eq!(hero.count_item(Item::HealingPotion), 1);
    }

    #[test]
    fn test_single_level_up() {
        let mut hero = Player::default();
        hero.hp = 10;
        let ups = hero.award_xp(20);

        assert_eq!(ups.len(), 1);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.xp, 5);
        // floor(15 * 1.6 + 2 * 8)
        assert_eq!(hero.xp_to_next, 40);
        assert_eq!(hero.max_hp, 38);
        assert_eq!(hero.hp, 38);
        assert_eq!(hero.attack_power, 8);
        assert_eq!(hero.heal_amount, 8);
    }

    #[test]
    fn test_fifty_xp_from_level_one() {
        let mut hero = Player::default();
        hero.award_xp(50);
        assert_eq!(hero.level, 2);
        assert_eq!((hero.xp, hero.xp_to_next), (35, 40));
    }

    #[test]
    fn test_two_levels_from_exact_thresholds() {
        let mut hero = Player::default();
        let ups = hero.award_xp(55);
        assert_eq!(ups.len(), 2);
        assert_eq!(hero.level, 3);
        assert_eq!((hero.xp, hero.xp_to_next), (0, 88));
    }

    #[test]
    fn test_multi_level_up_in_one_award() {
        let mut hero = Player::default();
        // 15 + 40 + 88 crosses three thresholds
        let ups = hero.award_xp(15 + 40 + 88);

        assert_eq!(ups.iter().map(|u| u.level).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(hero.level, 4);
        assert_eq!(hero.xp, 0);
        // floor(88 * 1.6 + 4 * 8) = floor(172.8)
        assert_eq!(hero.xp_to_next, 172);
        assert_eq!(hero.max_hp, 30 + 3 * 8);
        assert_eq!(hero.hp, hero.max_hp);
        assert_eq!(hero.attack_power, 6 + 3 * 2);
    }

    #[test]
    fn test_xp_below_threshold_keeps_level() {
        let mut hero = Player::default();
        assert!(hero.award_xp(14).is_empty());
        assert_eq!((hero.level, hero.xp), (1, 14));
        assert_eq!(hero.award_xp(1).len(), 1);
        assert_eq!((hero.level, hero.xp), (2, 0));
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut hero = Player::default();
        assert!(!hero.apply_damage(29));
        assert_eq!(hero.hp, 1);
        assert!(hero.apply_damage(100));
        assert_eq!(hero.hp, 0);
        assert!(hero.is_defeated());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut hero = Player::default();
        hero.hp = 27;
        assert_eq!(hero.heal(10), 3);
        assert_eq!(hero.hp, 30);
    }

    #[test]
    fn test_use_potion() {
        let mut hero = Player::default();
        hero.hp = 10;
        let effect = hero.use_item(Item::HealingPotion).unwrap();
        assert_eq!(
            effect,
            ItemEffect::Healed {
                item: Item::HealingPotion,
                restored: 6
            }
        );
        assert_eq!(hero.hp, 16);
        assert_eq!(hero.count_item(Item::HealingPotion), 0);
    }

    #[test]
    fn test_use_item_with_empty_bag() {
        let mut hero = Player::default();
        hero.bag.clear();
        hero.hp = 10;
        assert_eq!(
            hero.use_item(Item::HealingPotion),
            Err(HeroError::ItemUnavailable(Item::HealingPotion))
        );
        assert_eq!(hero.hp, 10);
    }

    proptest! {
        #[test]
        fn prop_xp_stays_below_threshold(awards in proptest::collection::vec(0u32..5_000, 1..20)) {
            let mut hero = Player::default();
            let mut last_level = hero.level;
            for amount in awards {
                hero.award_xp(amount);
                prop_assert!(hero.xp < hero.xp_to_next);
                prop_assert!(hero.level >= last_level);
                prop_assert!(hero.hp <= hero.max_hp);
                last_level = hero.level;
            }
        }

        #[test]
        fn prop_hp_stays_in_range(ops in proptest::collection::vec((any::<bool>(), 0u32..100), 0..50)) {
            let mut hero = Player::default();
            for (is_heal, amount) in ops {
                if is_heal {
                    hero.heal(amount);
                } else {
                    hero.apply_damage(amount);
                }
                prop_assert!(hero.hp <= hero.max_hp);
            }
        }
    }
}

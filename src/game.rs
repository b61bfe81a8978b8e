//! Top-level game controller.
//!
//! `Game` owns every piece of mutable state: the hero, the map, the combat
//! engine and the random source. Presentation layers drive it through
//! [`Game::move_player`], [`Game::use_inventory_item`], [`Game::reset_game`]
//! and [`Game::query_inventory`], then redraw from the read accessors
//! whenever [`Game::drain_events`] yields something.

use combat::{CombatEngine, CombatState, EnemyFactory, RandomSource, SeededRng, TurnOutcome, TurnReport};
use dungeon::{GameMap, Tile};
use error::{ActionError, GameError};
use hero::{ItemEffect, Player};
use items::Item;
use log::{debug, info};
use strum::{Display, EnumString};

use crate::config::GameConfig;
use crate::event_log::{EventLog, MessageKind};

/// 四个基本移动方向（每次一格）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (dx, dy) with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Result of an accepted move
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stepped onto an empty tile.
    Moved { to: (i32, i32) },
    /// Stepped onto an enemy and won.
    Won {
        enemy: String,
        at: (i32, i32),
        turns: usize,
    },
    /// The combat loop hit its turn cap; the enemy keeps its tile.
    Retreated { enemy: String, at: (i32, i32) },
}

/// State-change notifications for the presentation layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved { from: (i32, i32), to: (i32, i32) },
    MoveBlocked(ActionError),
    EncounterStarted { enemy: String, at: (i32, i32) },
    TurnResolved(TurnOutcome),
    LevelUp(u32),
    ItemFound(Item),
    ItemUsed(Item),
    ItemUnavailable(Item),
    PlayerDefeated,
    GameReset,
}

pub struct Game {
    config: GameConfig,
    starting_map: GameMap,
    player: Player,
    map: GameMap,
    combat: CombatEngine,
    enemies: EnemyFactory,
    rng: Box<dyn RandomSource>,
    log: EventLog,
    events: Vec<GameEvent>,
    state_version: u64,
}

impl Game {
    /// Start a game seeded from the config, or from entropy without a seed.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        info!("starting game with seed {}", rng.seed());
        Self::with_rng(config, Box::new(rng))
    }

    /// Start a game that draws every roll from `rng`.
    pub fn with_rng(config: GameConfig, rng: Box<dyn RandomSource>) -> Result<Self, GameError> {
        config.validate()?;
        let starting_map = config.starting_map()?;

        let mut game = Self {
            player: Player::new(config.player_name.clone()),
            map: starting_map.clone(),
            starting_map,
            combat: CombatEngine::new(),
            enemies: EnemyFactory::default(),
            rng,
            log: EventLog::new(config.log_capacity),
            events: Vec::new(),
            state_version: 0,
            config,
        };
        game.narrate(
            MessageKind::Info,
            "Game loaded. Use the arrow keys to move and find enemies.",
        );
        Ok(game)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct stat access for scripted scenarios.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn combat(&self) -> &CombatEngine {
        &self.combat
    }

    pub fn combat_state(&self) -> &CombatState {
        self.combat.state()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Bumped on every observable change.
    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    /// Take the notifications published since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// 移动英雄；踩到敌人时自动结算整场战斗
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, ActionError> {
        let from = self.player.position();
        let (dx, dy) = direction.delta();
        let (x, y) = (from.0 + dx, from.1 + dy);

        if !self.map.in_bounds(x, y) {
            return Err(self.reject_move(ActionError::OutOfBounds));
        }
        let tile = self.map.tile_at(x, y);
        if !tile.is_passable() {
            return Err(self.reject_move(ActionError::Obstructed));
        }

        self.player.set_position(x, y);
        debug!("{} moved {direction} to ({x}, {y})", self.player.name);
        self.publish(GameEvent::Moved { from, to: (x, y) });

        if tile == Tile::Enemy {
            return self.run_encounter((x, y));
        }
        Ok(MoveOutcome::Moved { to: (x, y) })
    }

    /// 使用背包中的物品
    pub fn use_inventory_item(&mut self, item: Item) -> Result<ItemEffect, ActionError> {
        match self.player.use_item(item) {
            Ok(effect) => {
                let ItemEffect::Healed { restored, .. } = effect;
                self.narrate(
                    MessageKind::Item,
                    format!("You used a {item}. (+{restored} HP)"),
                );
                self.publish(GameEvent::ItemUsed(item));
                Ok(effect)
            }
            Err(err) => {
                let err = ActionError::from(err);
                self.narrate(MessageKind::Warning, err.to_string());
                self.publish(GameEvent::ItemUnavailable(item));
                Err(err)
            }
        }
    }

    /// Items carried, with counts, in first-acquired order.
    pub fn query_inventory(&self) -> Vec<(Item, usize)> {
        self.player.inventory().summary()
    }

    pub fn inventory_summary(&self) -> String {
        let items = self.query_inventory();
        if items.is_empty() {
            return "Inventory: empty".to_string();
        }
        let listed: Vec<String> = items
            .iter()
            .map(|(item, count)| format!("{item} x{count}"))
            .collect();
        format!("Inventory: {}", listed.join(", "))
    }

    /// Narrate the inventory summary into the event log.
    pub fn report_inventory(&mut self) -> String {
        let summary = self.inventory_summary();
        self.narrate(MessageKind::Item, summary.clone());
        summary
    }

    /// 重新开始：英雄、地图和战斗状态恢复初始值
    pub fn reset_game(&mut self) {
        self.player = Player::new(self.config.player_name.clone());
        self.map = self.starting_map.clone();
        self.combat.disengage();
        info!("game reset");
        self.narrate(MessageKind::Warning, "Game restarted.");
        self.publish(GameEvent::GameReset);
    }

    fn reject_move(&mut self, reason: ActionError) -> ActionError {
        debug!("move rejected: {reason:?}");
        self.narrate(MessageKind::Movement, reason.to_string());
        self.publish(GameEvent::MoveBlocked(reason));
        reason
    }

    fn run_encounter(&mut self, at: (i32, i32)) -> Result<MoveOutcome, ActionError> {
        let enemy = self.enemies.spawn(self.player.level, self.rng.as_mut());
        let name = enemy.name.clone();
        self.narrate(MessageKind::Combat, format!("You encountered a {name}!"));
        self.publish(GameEvent::EncounterStarted {
            enemy: name.clone(),
            at,
        });
        self.combat.engage(enemy, at);

        for turn in 1..=self.config.max_combat_turns {
            let report = self
                .combat
                .resolve_turn(&mut self.player, &mut self.map, self.rng.as_mut());
            self.record_turn(&report);

            match report.outcome {
                TurnOutcome::Continuing => {}
                TurnOutcome::Victory => {
                    return Ok(MoveOutcome::Won {
                        enemy: name,
                        at,
                        turns: turn,
                    });
                }
                TurnOutcome::Defeat => {
                    self.publish(GameEvent::PlayerDefeated);
                    self.reset_game();
                    return Err(ActionError::PlayerDefeated);
                }
                TurnOutcome::Idle => break,
            }
        }

        self.combat.disengage();
        self.narrate(MessageKind::Combat, format!("The {name} retreats."));
        Ok(MoveOutcome::Retreated { enemy: name, at })
    }

    fn record_turn(&mut self, report: &TurnReport) {
        let kind = match report.outcome {
            TurnOutcome::Victory => MessageKind::Progress,
            TurnOutcome::Defeat => MessageKind::Warning,
            _ => MessageKind::Combat,
        };
        for line in &report.logs {
            self.log.push(kind, line.clone());
        }
        for up in &report.level_ups {
            self.events.push(GameEvent::LevelUp(up.level));
        }
        if let Some(item) = report.loot {
            self.events.push(GameEvent::ItemFound(item));
        }
        self.publish(GameEvent::TurnResolved(report.outcome));
    }

    fn narrate(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.log.push(kind, text);
        self.state_version += 1;
    }

    fn publish(&mut self, event: GameEvent) {
        self.events.push(event);
        self.state_version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::ScriptedRng;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn scripted_game(ints: Vec<u32>, chances: Vec<bool>) -> Game {
        Game::with_rng(
            GameConfig::default(),
            Box::new(ScriptedRng::with_rolls(ints, chances)),
        )
        .unwrap()
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_str("UP"), Ok(Direction::Up));
        assert_eq!(Direction::from_str("left"), Ok(Direction::Left));
        assert!(Direction::from_str("diagonal").is_err());
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Up.delta(), (0, -1));
    }

    #[test]
    fn test_new_game_logs_welcome() {
        let game = scripted_game(vec![], vec![]);
        assert_eq!(game.log().len(), 1);
        assert!(game.log().contains("Game loaded"));
        assert_eq!(game.player().position(), (0, 0));
    }

    #[test]
    fn test_blocked_move_publishes_event() {
        let mut game = scripted_game(vec![], vec![]);
        game.drain_events();
        let version = game.state_version();

        assert_eq!(game.move_player(Direction::Up), Err(ActionError::OutOfBounds));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::MoveBlocked(ActionError::OutOfBounds)]
        );
        assert!(game.state_version() > version);
        assert_eq!(game.player().position(), (0, 0));
    }

    #[test]
    fn test_inventory_summary() {
        let mut game = scripted_game(vec![], vec![]);
        assert_eq!(game.inventory_summary(), "Inventory: healing potion x1");
        game.player_mut().add_item(Item::HealingPotion);
        assert_eq!(game.query_inventory(), vec![(Item::HealingPotion, 2)]);

        game.player_mut().bag.clear();
        assert_eq!(game.report_inventory(), "Inventory: empty");
        assert_eq!(game.log().latest().map(|e| e.text.as_str()), Some("Inventory: empty"));
    }

    #[test]
    fn test_turn_cap_makes_enemy_retreat() {
        let config = GameConfig {
            max_combat_turns: 1,
            ..GameConfig::default()
        };
        let mut game = Game::with_rng(config, Box::new(ScriptedRng::new())).unwrap();
        game.player_mut().set_position(5, 0);
        game.player_mut().hp = 100;
        game.player_mut().max_hp = 100;

        let outcome = game.move_player(Direction::Right).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Retreated {
                enemy: "Goblin".to_string(),
                at: (6, 0)
            }
        );
        assert_eq!(*game.combat_state(), CombatState::Idle);
        assert_eq!(game.map().tile_at(6, 0), Tile::Enemy);
        assert!(game.log().contains("retreats"));
    }
}

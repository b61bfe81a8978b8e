//! Game configuration.
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. Every field has a default, so an empty file (or no
//! file) yields the standard 7x7 game.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use dungeon::{GameMap, Tile};
use error::{GameError, handle_error};
use serde::{Deserialize, Serialize};

/// Default size of the narration log
pub const DEFAULT_LOG_CAPACITY: usize = 200;
/// Safety cap on the automatic combat loop
pub const DEFAULT_MAX_COMBAT_TURNS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub player_name: String,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    pub log_capacity: usize,
    pub max_combat_turns: usize,
    /// Where `log` output goes; logging is off without it
    pub log_file: Option<PathBuf>,
    /// Custom starting map in `.`/`#`/`E` rows; the built-in map when absent
    pub map: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: hero::constants::DEFAULT_NAME.to_string(),
            seed: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
            max_combat_turns: DEFAULT_MAX_COMBAT_TURNS,
            log_file: None,
            map: None,
        }
    }
}

impl GameConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.log_capacity == 0 {
            return Err(GameError::InvalidConfig("log_capacity must be at least 1".into()));
        }
        if self.max_combat_turns == 0 {
            return Err(GameError::InvalidConfig("max_combat_turns must be at least 1".into()));
        }
        if self.player_name.trim().is_empty() {
            return Err(GameError::InvalidConfig("player_name must not be empty".into()));
        }
        // 英雄总是从左上角出发
        if self.starting_map()?.tile_at(0, 0) != Tile::Empty {
            return Err(GameError::InvalidConfig(
                "map tile (0, 0) must be empty floor for the hero to start on".into(),
            ));
        }
        Ok(())
    }

    /// The map every new game (and every restart) begins with.
    pub fn starting_map(&self) -> Result<GameMap, GameError> {
        match &self.map {
            Some(rows) => Ok(GameMap::from_rows(rows.as_slice())?),
            None => Ok(GameMap::default()),
        }
    }
}

/// Command-line flags
#[derive(Debug, Parser)]
#[command(name = "grid_quest", version, about = "A tiny tile-grid RPG for the terminal")]
pub struct Cli {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// RNG seed for a reproducible game
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Hero name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Write diagnostic logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, if any, and apply flag overrides.
    pub fn into_config(self) -> Result<GameConfig, GameError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(name) = self.name {
            config.player_name = name;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = Some(log_file);
        }
        config.validate()?;
        Ok(config)
    }

    /// `into_config` with failures described in player-readable terms.
    pub fn resolve(self) -> anyhow::Result<GameConfig> {
        self.into_config().map_err(|err| {
            let message = handle_error(&err);
            anyhow::Error::new(err).context(message)
        })
    }
}

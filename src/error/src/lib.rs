//! Error types shared across the game.
//!
//! [`ActionError`] covers rejected player actions: they are reported to the
//! player and never abort the game. [`GameError`] covers setup failures such
//! as unreadable configuration.

use dungeon::MapError;
use hero::HeroError;
use items::Item;
use thiserror::Error;

/// Why a player action had no effect
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("The edge of the map blocks the way.")]
    OutOfBounds,

    #[error("An obstacle (tree) blocks the way.")]
    Obstructed,

    #[error("You have no {0}!")]
    ItemUnavailable(Item),

    #[error("You were defeated!")]
    PlayerDefeated,
}

impl From<HeroError> for ActionError {
    fn from(err: HeroError) -> Self {
        match err {
            HeroError::ItemUnavailable(item) => ActionError::ItemUnavailable(item),
        }
    }
}

/// 游戏启动过程中可能出现的错误
#[derive(Debug, Error)]
pub enum GameError {
    /// IO操作错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// 配置值无效
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// 地图布局无效
    #[error("Invalid map layout: {0}")]
    InvalidMap(#[from] MapError),
}

/// 将错误转换为玩家可读的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::Io(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Config file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to read the config file".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_messages() {
        assert_eq!(
            ActionError::ItemUnavailable(Item::HealingPotion).to_string(),
            "You have no healing potion!"
        );
        assert_eq!(
            ActionError::from(HeroError::ItemUnavailable(Item::HealingPotion)),
            ActionError::ItemUnavailable(Item::HealingPotion)
        );
    }

    #[test]
    fn test_handle_error() {
        let missing = GameError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(handle_error(&missing), "Config file not found");

        let bad = GameError::InvalidConfig("log_capacity must be positive".into());
        assert_eq!(handle_error(&bad), "Invalid config: log_capacity must be positive");

        let map = GameError::from(MapError::Empty);
        assert!(handle_error(&map).starts_with("Invalid map layout"));
    }
}

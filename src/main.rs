use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use grid_quest::{Cli, Game, GameConfig};
use log::info;

/// 日志写入文件，避免干扰终端画面；未指定文件时不输出
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let config = Cli::parse().resolve()?;
    init_logging(&config)?;

    let mut game = Game::new(config).context("Failed to start game")?;
    grid_quest::tui::run(&mut game)?;

    let player = game.player();
    info!("session ended at level {}", player.level);
    println!(
        "{} reached level {} with {}/{} HP.",
        player.name, player.level, player.hp, player.max_hp
    );
    Ok(())
}

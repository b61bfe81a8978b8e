//! Terminal front end: ratatui drawing plus crossterm key handling.
//!
//! Holds no game rules. Keys become [`Command`]s, commands become calls on
//! [`Game`], and the screen is redrawn from the game's read accessors.

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dungeon::Tile;
use items::Item;
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use scopeguard::defer;

use crate::event_log::MessageKind;
use crate::game::{Direction, Game};

/// One player intent, decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    UseItem(Item),
    ShowInventory,
    Restart,
    Quit,
}

/// 键位映射：方向键/WASD 移动，p 喝药，i 查看背包，r 重开，q/Esc 退出
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('w') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Move(Direction::Right),
        KeyCode::Char('p') => Command::UseItem(Item::HealingPotion),
        KeyCode::Char('i') => Command::ShowInventory,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Front-end state that is not part of the game itself.
#[derive(Debug, Default)]
pub struct App {
    confirm_restart: bool,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn confirming_restart(&self) -> bool {
        self.confirm_restart
    }

    /// Apply one key press to the game.
    pub fn handle_key(&mut self, game: &mut Game, code: KeyCode) {
        if self.confirm_restart {
            self.confirm_restart = false;
            if matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                game.reset_game();
            }
            return;
        }

        let Some(command) = command_for_key(code) else {
            return;
        };
        debug!("command {command:?}");
        match command {
            // Rejections are already narrated in the game log.
            Command::Move(direction) => {
                let _ = game.move_player(direction);
            }
            Command::UseItem(item) => {
                let _ = game.use_inventory_item(item);
            }
            Command::ShowInventory => {
                game.report_inventory();
            }
            Command::Restart => self.confirm_restart = true,
            Command::Quit => self.should_quit = true,
        }
    }
}

/// Draw the whole screen: HUD, map and message log.
pub fn draw(frame: &mut Frame<'_>, game: &Game, app: &App) {
    let map_height = game.map().height() as u16 + 2;
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),          // HUD
            Constraint::Length(map_height), // 地图
            Constraint::Min(3),             // 消息栏
        ])
        .split(frame.area());

    draw_hud(frame, chunks[0], game, app);
    draw_map(frame, chunks[1], game);
    draw_log(frame, chunks[2], game);
}

fn draw_hud(frame: &mut Frame<'_>, area: Rect, game: &Game, app: &App) {
    let player = game.player();
    let line = if app.confirming_restart() {
        Line::from(Span::styled(
            "Restart the game? (y/n)",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!("{} ", player.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("Lv {}  ", player.level)),
            Span::raw(format!("XP {}/{}  ", player.xp, player.xp_to_next)),
            Span::styled(
                format!("HP {}/{}  ", player.hp, player.max_hp),
                Style::default().fg(hp_color(player.hp, player.max_hp)),
            ),
            Span::raw(format!("ATK {}  ", player.attack_power)),
            Span::raw(format!(
                "Potions {}",
                player.count_item(Item::HealingPotion)
            )),
        ])
    };
    let hud = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Grid Quest"));
    frame.render_widget(hud, area);
}

fn hp_color(hp: u32, max_hp: u32) -> Color {
    if hp * 3 <= max_hp {
        Color::Red
    } else if hp * 3 <= max_hp * 2 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn draw_map(frame: &mut Frame<'_>, area: Rect, game: &Game) {
    let (px, py) = game.player().position();
    let lines: Vec<Line> = game
        .map()
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, tile)| {
                    if (x as i32, y as i32) == (px, py) {
                        Span::styled(
                            "@ ",
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(format!("{} ", tile.glyph()), tile_style(*tile))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let map = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Map"));
    frame.render_widget(map, area);
}

fn tile_style(tile: Tile) -> Style {
    match tile {
        Tile::Empty => Style::default().fg(Color::DarkGray),
        Tile::Obstacle => Style::default().fg(Color::Green),
        Tile::Enemy => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn draw_log(frame: &mut Frame<'_>, area: Rect, game: &Game) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = game
        .log()
        .recent(visible)
        .map(|entry| {
            Line::from(Span::styled(
                entry.text.clone(),
                Style::default().fg(kind_color(entry.kind)),
            ))
        })
        .collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
    frame.render_widget(log, area);
}

fn kind_color(kind: MessageKind) -> Color {
    match kind {
        MessageKind::Info => Color::White,
        MessageKind::Movement => Color::Gray,
        MessageKind::Combat => Color::LightRed,
        MessageKind::Item => Color::Cyan,
        MessageKind::Progress => Color::LightGreen,
        MessageKind::Warning => Color::Yellow,
    }
}

/// Run the interactive loop until the player quits.
pub fn run(game: &mut Game) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    defer! {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    let mut app = App::new();
    let mut drawn_version = None;

    while !app.should_quit() {
        if drawn_version != Some(game.state_version()) {
            terminal.draw(|frame| draw(frame, game, &app))?;
            drawn_version = Some(game.state_version());
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let was_confirming = app.confirming_restart();
                app.handle_key(game, key.code);
                for event in game.drain_events() {
                    debug!("game event {event:?}");
                }
                if was_confirming != app.confirming_restart() {
                    drawn_version = None;
                }
            }
            Event::Resize(..) => drawn_version = None,
            _ => {}
        }
    }

    info!("player quit");
    Ok(())
}

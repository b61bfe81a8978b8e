//! Grid Quest: a 7x7 tile-grid RPG for the terminal.
//!
//! Game rules live in the workspace crates (`dungeon`, `hero`, `combat`);
//! this crate wires them into a [`Game`] and a ratatui front end.

pub mod config;
pub mod event_log;
pub mod game;
pub mod tui;

pub use crate::config::{Cli, GameConfig};
pub use crate::event_log::{EventLog, LogEntry, MessageKind};
pub use crate::game::{Direction, Game, GameEvent, MoveOutcome};

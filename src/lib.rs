//! Tombs of the Ancient Kings: a turn-based dungeon crawl.
//!
//! The simulation core (map generation, actors, visibility, combat, items and
//! the turn scheduler) is independent of the terminal. `app` wires it to a
//! bracket-terminal window, or replays a key script headlessly.

pub mod ai;
pub mod app;
pub mod combat;
pub mod config;
pub mod data;
pub mod ecs;
pub mod gamelog;
pub mod input;
pub mod inventory;
pub mod map;
pub mod menu;
pub mod render;
pub mod rng;
pub mod spawner;
pub mod turn;
pub mod visibility;

pub use config::GameConfig;
pub use turn::{GameStatus, PlayerAction, PlayerCommand, Session, TurnReport};

/// Errors surfaced by the crate. Gameplay outcomes are never errors.
#[derive(thiserror::Error, Debug)]
pub enum TombError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A selection menu can only offer one option per letter.
    #[error("cannot build a menu with {options} options (max {max})", max = menu::MAX_OPTIONS)]
    MenuOverflow { options: usize },
}

pub type TombResult<T> = Result<T, TombError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

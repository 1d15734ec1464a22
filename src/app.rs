use std::fmt;

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::{BTerm, GameState, VirtualKeyCode};
use log::{info, warn};

use crate::{
    TombResult,
    config::GameConfig,
    render::{FrameBuffer, draw_actors, draw_map, draw_menu, draw_panel},
    turn::{GameStatus, PlayerAction, PlayerCommand, Session},
};

const USE_HEADER: &str = "Press the key next to an item to use it, or any other key to cancel.";
const DROP_HEADER: &str = "Press the key next to an item to drop it, or any other key to cancel.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuPurpose {
    Use,
    Drop,
}

impl MenuPurpose {
    fn header(self) -> &'static str {
        match self {
            MenuPurpose::Use => USE_HEADER,
            MenuPurpose::Drop => DROP_HEADER,
        }
    }

    fn command(self, slot: usize) -> PlayerCommand {
        match self {
            MenuPurpose::Use => PlayerCommand::UseItem(slot),
            MenuPurpose::Drop => PlayerCommand::DropItem(slot),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Playing,
    Inventory(MenuPurpose),
}

/// Front-end state machine: decodes keys, forwards commands to the session
/// and redraws the frame.
pub struct TombsState {
    session: Session,
    mode: Mode,
    frame: FrameBuffer,
    mouse: Point,
}

impl TombsState {
    pub fn new(session: Session) -> Self {
        let config = session.config();
        let frame = FrameBuffer::new(config.screen_width, config.screen_height);
        Self {
            session,
            mode: Mode::Playing,
            frame,
            mouse: Point::new(0, 0),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn set_mouse(&mut self, mouse: Point) {
        self.mouse = mouse;
    }

    pub fn handle_key(&mut self, key: VirtualKeyCode) -> PlayerAction {
        match self.mode {
            Mode::Playing => self.handle_playing_key(key),
            Mode::Inventory(purpose) => self.handle_menu_key(purpose, key),
        }
    }

    fn handle_playing_key(&mut self, key: VirtualKeyCode) -> PlayerAction {
        let Some(intent) = intent_for_key(key) else {
            return PlayerAction::DidntTakeTurn;
        };
        match intent {
            KeyIntent::Command(command) => self.session.step(command).action,
            // Menus only open while alive; the step itself is never a turn.
            KeyIntent::OpenMenu(purpose) => {
                if self.session.status() == GameStatus::Playing {
                    self.mode = Mode::Inventory(purpose);
                }
                self.session.step(PlayerCommand::OpenInventory).action
            }
        }
    }

    /// A letter in range picks that slot; any other key just closes the menu.
    fn handle_menu_key(&mut self, purpose: MenuPurpose, key: VirtualKeyCode) -> PlayerAction {
        self.mode = Mode::Playing;
        let slot = match self.session.inventory_menu(purpose.header()) {
            Ok(menu) => menu.option_for_key(key),
            Err(err) => {
                warn!("inventory menu unavailable: {err}");
                None
            }
        };
        match slot {
            Some(slot) => self.session.step(purpose.command(slot)).action,
            None => PlayerAction::DidntTakeTurn,
        }
    }

    pub fn render(&mut self) {
        self.frame.clear();
        draw_map(
            &mut self.frame,
            self.session.grid(),
            self.session.visibility(),
        );
        draw_actors(
            &mut self.frame,
            self.session.store(),
            self.session.visibility(),
        );
        draw_panel(&mut self.frame, &self.session, self.mouse);

        if let Mode::Inventory(purpose) = self.mode {
            let config = self.session.config();
            match self.session.inventory_menu(purpose.header()) {
                Ok(menu) => draw_menu(
                    &mut self.frame,
                    &menu,
                    config.inventory_width,
                    config.screen_width,
                    config.screen_height,
                ),
                Err(err) => warn!("inventory menu unavailable: {err}"),
            }
        }
    }
}

impl GameState for TombsState {
    fn tick(&mut self, ctx: &mut BTerm) {
        self.mouse = ctx.mouse_point();
        if let Some(key) = ctx.key {
            if self.handle_key(key) == PlayerAction::Exit {
                info!("quit after {} turns", self.session.turn());
                ctx.quit();
                return;
            }
        }
        self.render();
        ctx.cls();
        self.frame.present(ctx);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    Command(PlayerCommand),
    OpenMenu(MenuPurpose),
}

/// Playing-mode key bindings.
pub fn intent_for_key(key: VirtualKeyCode) -> Option<KeyIntent> {
    let command = match key {
        VirtualKeyCode::Left | VirtualKeyCode::H => PlayerCommand::Move { dx: -1, dy: 0 },
        VirtualKeyCode::Right | VirtualKeyCode::L => PlayerCommand::Move { dx: 1, dy: 0 },
        VirtualKeyCode::Up | VirtualKeyCode::K => PlayerCommand::Move { dx: 0, dy: -1 },
        VirtualKeyCode::Down | VirtualKeyCode::J => PlayerCommand::Move { dx: 0, dy: 1 },
        VirtualKeyCode::G => PlayerCommand::PickUp,
        VirtualKeyCode::Escape | VirtualKeyCode::Q => PlayerCommand::Quit,
        VirtualKeyCode::I => return Some(KeyIntent::OpenMenu(MenuPurpose::Use)),
        VirtualKeyCode::D => return Some(KeyIntent::OpenMenu(MenuPurpose::Drop)),
        _ => return None,
    };
    Some(KeyIntent::Command(command))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaySummary {
    pub keys: usize,
    pub turns: u64,
    pub status: GameStatus,
    pub hp: i32,
    pub max_hp: i32,
    pub inventory: usize,
    pub quit: bool,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} keys, {} turns, {:?}, HP {}/{}, {} items carried{}",
            self.keys,
            self.turns,
            self.status,
            self.hp,
            self.max_hp,
            self.inventory,
            if self.quit { ", quit" } else { "" }
        )
    }
}

/// Drives the same state machine as the window, without one.
pub fn replay<I>(config: GameConfig, keys: I) -> TombResult<(TombsState, ReplaySummary)>
where
    I: IntoIterator<Item = VirtualKeyCode>,
{
    let mut state = TombsState::new(Session::new(config)?);
    let mut consumed = 0;
    let mut quit = false;
    for key in keys {
        consumed += 1;
        if state.handle_key(key) == PlayerAction::Exit {
            quit = true;
            break;
        }
    }
    state.render();

    let session = state.session();
    let (hp, max_hp) = session
        .player_stats()
        .map_or((0, 0), |stats| (stats.hp, stats.max_hp));
    let summary = ReplaySummary {
        keys: consumed,
        turns: session.turn(),
        status: session.status(),
        hp,
        max_hp,
        inventory: session.inventory().len(),
        quit,
    };
    Ok((state, summary))
}

use bracket_geometry::prelude::{Point, Rect};
use bracket_random::prelude::RandomNumberGenerator;
use log::{debug, info};

use crate::{
    TombResult,
    ai::{self, AiContext, AiOutcome},
    combat::{self, AttackOutcome, Death, capitalize},
    config::GameConfig,
    data::{self, WELCOME},
    ecs::{ActorStore, MoveOutcome, components::CombatStats},
    gamelog::MessageLog,
    inventory::Inventory,
    map::{self, GenerationParams, TileGrid},
    menu::Menu,
    render::palette,
    rng::Dice,
    spawner::Populator,
    visibility::{FovOracle, ShadowcastFov, Visibility},
};

pub const EMPTY_INVENTORY: &str = "Inventory is empty.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Dead,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    TookTurn,
    DidntTakeTurn,
    Exit,
}

/// What the player asked for this step, already decoded from keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Move { dx: i32, dy: i32 },
    PickUp,
    OpenInventory,
    UseItem(usize),
    DropItem(usize),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub action: PlayerAction,
    /// Monsters that moved or attacked after the player's turn.
    pub ai_turns: usize,
    /// The player changed cell, so the field of view was recomputed once
    /// the monsters had acted.
    pub refov: bool,
}

impl TurnReport {
    fn idle(action: PlayerAction) -> Self {
        Self {
            action,
            ai_turns: 0,
            refov: false,
        }
    }
}

/// One game from generation to death or quit.
pub struct Session {
    config: GameConfig,
    grid: TileGrid,
    rooms: Vec<Rect>,
    store: ActorStore,
    visibility: Visibility,
    log: MessageLog,
    inventory: Inventory,
    dice: Box<dyn Dice>,
    oracle: Box<dyn FovOracle>,
    status: GameStatus,
    turn: u64,
}

impl Session {
    /// Seeds from `config.seed`, or from entropy when none is given.
    pub fn new(config: GameConfig) -> TombResult<Self> {
        let seed = config
            .seed
            .unwrap_or_else(|| RandomNumberGenerator::new().next_u64());
        info!("seed {seed}");
        Self::with_dice(config, Box::new(RandomNumberGenerator::seeded(seed)))
    }

    pub fn with_dice(config: GameConfig, mut dice: Box<dyn Dice>) -> TombResult<Self> {
        config.validate()?;

        let mut store = ActorStore::new(data::player_spec(Point::new(0, 0)));
        let dungeon = {
            let mut populator = Populator::new(&mut store, &config);
            map::generate(&GenerationParams::from(&config), dice.as_mut(), &mut populator)
        };
        let player = store.player();
        store.place_on_map(player, dungeon.spawn);
        store.send_to_front(player);
        info!(
            "{} actors on the map, player at ({},{})",
            store.on_map_count(),
            dungeon.spawn.x,
            dungeon.spawn.y
        );

        let mut session = Self::from_parts(config, dungeon.grid, store, dice);
        session.rooms = dungeon.rooms;
        Ok(session)
    }

    /// Assembles a session around an existing map and cast. Computes the
    /// first field of view and posts the welcome line.
    pub fn from_parts(
        config: GameConfig,
        grid: TileGrid,
        store: ActorStore,
        dice: Box<dyn Dice>,
    ) -> Self {
        let mut session = Self {
            visibility: Visibility::new(config.fov_radius, config.fov_light_walls),
            log: MessageLog::new(config.message_lines(), config.message_width()),
            inventory: Inventory::new(config.inventory_capacity),
            rooms: Vec::new(),
            oracle: Box::new(ShadowcastFov),
            status: GameStatus::Playing,
            turn: 0,
            config,
            grid,
            store,
            dice,
        };
        session.log.push(WELCOME, palette::GREEN);
        session.refresh_fov();
        session
    }

    pub fn with_oracle(mut self, oracle: Box<dyn FovOracle>) -> Self {
        self.oracle = oracle;
        self.refresh_fov();
        self
    }

    fn refresh_fov(&mut self) {
        let origin = self.store.player_point();
        self.visibility
            .recompute(self.oracle.as_ref(), origin, &mut self.grid);
    }

    pub fn step(&mut self, command: PlayerCommand) -> TurnReport {
        if command == PlayerCommand::Quit {
            return TurnReport::idle(PlayerAction::Exit);
        }
        if self.status == GameStatus::Dead {
            return TurnReport::idle(PlayerAction::DidntTakeTurn);
        }

        let mut refov = false;
        let action = match command {
            PlayerCommand::Move { dx, dy } => {
                refov = self.move_or_attack(dx, dy);
                PlayerAction::TookTurn
            }
            PlayerCommand::PickUp => {
                self.pick_up();
                PlayerAction::DidntTakeTurn
            }
            PlayerCommand::UseItem(slot) => {
                self.inventory.use_item(&mut self.store, &mut self.log, slot);
                PlayerAction::DidntTakeTurn
            }
            PlayerCommand::DropItem(slot) => {
                self.inventory
                    .drop_item(&mut self.store, &mut self.log, slot);
                PlayerAction::DidntTakeTurn
            }
            PlayerCommand::OpenInventory | PlayerCommand::Quit => PlayerAction::DidntTakeTurn,
        };

        if action != PlayerAction::TookTurn {
            return TurnReport::idle(action);
        }
        self.turn += 1;
        // Monsters judge by what the player saw before stepping.
        let ai_turns = self.run_ai();
        if refov {
            self.refresh_fov();
        }
        debug!("turn {}: {ai_turns} monsters acted", self.turn);
        TurnReport {
            action,
            ai_turns,
            refov,
        }
    }

    /// Attacks the first fighter in the target cell, otherwise walks there.
    /// Returns whether the player changed cell.
    fn move_or_attack(&mut self, dx: i32, dy: i32) -> bool {
        let player = self.store.player();
        let from = self.store.player_point();
        let target = Point::new(from.x + dx, from.y + dy);

        let defender = self
            .store
            .combat_target_at(target)
            .filter(|entity| *entity != player);
        if let Some(defender) = defender {
            combat::attack(
                &mut self.store,
                &mut self.log,
                self.dice.as_mut(),
                player,
                defender,
            );
            return false;
        }

        matches!(
            self.store.move_by(player, dx, dy, &self.grid),
            MoveOutcome::Moved(_)
        )
    }

    fn pick_up(&mut self) {
        let here = self.store.player_point();
        if let Some(item) = self.store.item_at(here) {
            self.inventory.pick_up(&mut self.store, &mut self.log, item);
        }
    }

    /// Walks a snapshot of the on-map order; monsters that die or lose their
    /// brain mid-walk are skipped when their turn comes.
    fn run_ai(&mut self) -> usize {
        let mut acted = 0;
        for entity in self.store.handles() {
            if !self.store.capabilities(entity).ai {
                continue;
            }
            let mut ctx = AiContext {
                store: &mut self.store,
                grid: &self.grid,
                visibility: &self.visibility,
                log: &mut self.log,
                dice: self.dice.as_mut(),
            };
            let outcome = ai::take_turn(&mut ctx, entity);
            if let AiOutcome::Attacked(AttackOutcome::Hit {
                death: Some(Death::Player),
                ..
            }) = outcome
            {
                self.status = GameStatus::Dead;
            }
            if outcome.acted() {
                acted += 1;
            }
        }
        acted
    }

    /// Visible actors in `point`, as shown under the mouse.
    pub fn names_at(&self, point: Point) -> String {
        if !self.visibility.can_see(point) {
            return String::new();
        }
        let names: Vec<String> = self
            .store
            .actors_at(point)
            .into_iter()
            .map(|entity| self.store.name(entity))
            .collect();
        capitalize(&names.join(", "))
    }

    pub fn inventory_menu(&self, header: &str) -> TombResult<Menu> {
        if self.inventory.is_empty() {
            return Ok(Menu::placeholder(header, EMPTY_INVENTORY));
        }
        Menu::new(header, self.inventory.names(&self.store))
    }

    pub fn player_stats(&self) -> Option<CombatStats> {
        self.store.combat_stats(self.store.player())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn store(&self) -> &ActorStore {
        &self.store
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}

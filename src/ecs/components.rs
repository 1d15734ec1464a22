use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::RGB;
use specs::prelude::{Component, NullStorage, VecStorage};

/// Present only while the actor is on the map; carried items have none.
#[derive(Clone, Debug)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Renderable {
    pub glyph: char,
    pub color: RGB,
}

impl Component for Renderable {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Named {
    pub name: String,
}

impl Component for Named {
    type Storage = VecStorage<Self>;
}

#[derive(Default)]
pub struct BlocksTile;

impl Component for BlocksTile {
    type Storage = NullStorage<Self>;
}

#[derive(Default)]
pub struct PlayerTag;

impl Component for PlayerTag {
    type Storage = NullStorage<Self>;
}

/// Which death transition runs when hit points run out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathKind {
    Player,
    Monster,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CombatStats {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub on_death: DeathKind,
}

impl CombatStats {
    pub fn new(hp: i32, defense: i32, power: i32, on_death: DeathKind) -> Self {
        Self {
            max_hp: hp,
            hp,
            defense,
            power,
            on_death,
        }
    }

    /// Never raises hp past `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl Component for CombatStats {
    type Storage = VecStorage<Self>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Walk at the player while in view, swing when adjacent.
    ChaseAndMelee,
}

#[derive(Clone, Debug)]
pub struct MonsterBrain {
    pub behavior: Behavior,
}

impl Component for MonsterBrain {
    type Storage = VecStorage<Self>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    Heal { amount: i32 },
}

#[derive(Clone, Debug)]
pub struct Item {
    pub effect: Option<ItemEffect>,
}

impl Component for Item {
    type Storage = VecStorage<Self>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub combat: bool,
    pub ai: bool,
    pub item: bool,
}

use bracket_geometry::prelude::Point;

use crate::{
    ecs::{
        ActorSpec,
        components::{Behavior, CombatStats, DeathKind},
    },
    render::palette::{self, Color},
};

#[derive(Clone, Debug)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub color: Color,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Share of a 0..=100 roll.
    pub weight: i32,
}

pub static BESTIARY: [MonsterTemplate; 4] = [
    MonsterTemplate::new("human", 'h', palette::PINK, 10, 0, 3, 20),
    MonsterTemplate::new("orc", 'o', palette::BLUE, 15, 0, 4, 40),
    MonsterTemplate::new("dragon", 'd', palette::RED, 20, 0, 5, 10),
    MonsterTemplate::new("troll", 'T', palette::DARKER_GREEN, 25, 0, 6, 30),
];

impl MonsterTemplate {
    pub const fn new(
        name: &'static str,
        glyph: char,
        color: Color,
        hp: i32,
        defense: i32,
        power: i32,
        weight: i32,
    ) -> Self {
        Self {
            name,
            glyph,
            color,
            hp,
            defense,
            power,
            weight,
        }
    }

    /// Walks the cumulative weights; rolls past the table land on the last entry.
    pub fn for_roll(roll: i32) -> &'static MonsterTemplate {
        let mut threshold = 0;
        for template in &BESTIARY {
            threshold += template.weight;
            if roll < threshold {
                return template;
            }
        }
        &BESTIARY[BESTIARY.len() - 1]
    }

    pub fn spec(&self, point: Point) -> ActorSpec {
        ActorSpec::new(point, self.glyph, self.color, self.name)
            .blocking()
            .with_combat(CombatStats::new(
                self.hp,
                self.defense,
                self.power,
                DeathKind::Monster,
            ))
            .with_brain(Behavior::ChaseAndMelee)
    }
}

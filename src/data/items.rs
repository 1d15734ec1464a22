use bracket_geometry::prelude::Point;

use crate::{
    ecs::{
        ActorSpec,
        components::{Item, ItemEffect},
    },
    render::palette::{self, Color},
};

#[derive(Clone, Debug)]
pub struct ConsumableTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub color: Color,
    pub effect: Option<ItemEffect>,
}

impl ConsumableTemplate {
    pub const fn new(
        name: &'static str,
        glyph: char,
        color: Color,
        effect: Option<ItemEffect>,
    ) -> Self {
        Self {
            name,
            glyph,
            color,
            effect,
        }
    }

    pub fn healing_potion(amount: i32) -> Self {
        Self::new(
            "healing potion",
            '!',
            palette::VIOLET,
            Some(ItemEffect::Heal { amount }),
        )
    }

    pub fn spec(&self, point: Point) -> ActorSpec {
        ActorSpec::new(point, self.glyph, self.color, self.name).with_item(Item {
            effect: self.effect,
        })
    }
}

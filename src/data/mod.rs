pub mod items;
pub mod monsters;

use bracket_geometry::prelude::Point;

use crate::{
    ecs::{
        ActorSpec,
        components::{CombatStats, DeathKind},
    },
    render::palette,
};

pub const WELCOME: &str = "Welcome stranger! Prepare to perish in the Tombs of the Ancient Kings.";

pub fn player_spec(point: Point) -> ActorSpec {
    ActorSpec::new(point, '@', palette::WHITE, "player")
        .blocking()
        .with_combat(CombatStats::new(30, 2, 5, DeathKind::Player))
}

/// Decorative room label: 'A' for the first accepted room, then onwards.
pub fn room_marker_spec(index: usize, point: Point) -> ActorSpec {
    let glyph = char::from(b'A' + (index % 26) as u8);
    ActorSpec::new(point, glyph, palette::WHITE, "room number")
}

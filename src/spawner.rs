use bracket_geometry::prelude::{Point, Rect};
use log::debug;

use crate::{
    config::GameConfig,
    data::{items::ConsumableTemplate, monsters::MonsterTemplate, room_marker_spec},
    ecs::ActorStore,
    map::{RoomPopulator, TileGrid},
    rng::Dice,
};

/// Seeds monsters and potions into rooms as the generator accepts them.
pub struct Populator<'a> {
    store: &'a mut ActorStore,
    max_monsters: i32,
    max_items: i32,
    heal_amount: i32,
    room_labels: bool,
    /// The first room's center is kept free for the player.
    reserved: Option<Point>,
}

impl<'a> Populator<'a> {
    pub fn new(store: &'a mut ActorStore, config: &GameConfig) -> Self {
        Self {
            store,
            max_monsters: config.max_room_monsters,
            max_items: config.max_room_items,
            heal_amount: config.heal_amount,
            room_labels: config.room_labels,
            reserved: None,
        }
    }

    fn random_interior_point(room: &Rect, rng: &mut dyn Dice) -> Point {
        let x = rng.randint(room.x1 + 1, room.x2 - 1);
        let y = rng.randint(room.y1 + 1, room.y2 - 1);
        Point::new(x, y)
    }

    fn is_free(&self, grid: &TileGrid, point: Point) -> bool {
        Some(point) != self.reserved && !self.store.is_blocked(grid, point)
    }
}

impl RoomPopulator for Populator<'_> {
    fn populate(&mut self, index: usize, room: &Rect, grid: &TileGrid, rng: &mut dyn Dice) {
        if index == 0 {
            self.reserved = Some(room.center());
        }

        let monster_count = rng.randint(0, self.max_monsters);
        for _ in 0..monster_count {
            let point = Self::random_interior_point(room, rng);
            if !self.is_free(grid, point) {
                continue;
            }
            let template = MonsterTemplate::for_roll(rng.randint(0, 100));
            debug!("room {index}: {} at ({},{})", template.name, point.x, point.y);
            self.store.spawn(template.spec(point));
        }

        let potion = ConsumableTemplate::healing_potion(self.heal_amount);
        let item_count = rng.randint(0, self.max_items);
        for _ in 0..item_count {
            let point = Self::random_interior_point(room, rng);
            if !self.is_free(grid, point) {
                continue;
            }
            let item = self.store.spawn(potion.spec(point));
            self.store.send_to_back(item);
        }
    }

    fn mark_room(&mut self, index: usize, center: Point) {
        if self.room_labels {
            let marker = self.store.spawn(room_marker_spec(index, center));
            self.store.send_to_back(marker);
        }
    }
}

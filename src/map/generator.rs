use bracket_geometry::prelude::{Point, Rect};
use log::{debug, info, warn};

use super::TileGrid;
use crate::{config::GameConfig, rng::Dice};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    pub width: i32,
    pub height: i32,
    pub max_rooms: u32,
    pub room_min: i32,
    pub room_max: i32,
}

impl From<&GameConfig> for GenerationParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            width: config.map_width,
            height: config.map_height,
            max_rooms: config.max_rooms,
            room_min: config.room_min_size,
            room_max: config.room_max_size,
        }
    }
}

/// Hook invoked for every accepted room while the map is still being carved.
pub trait RoomPopulator {
    fn populate(&mut self, index: usize, room: &Rect, grid: &TileGrid, rng: &mut dyn Dice);

    fn mark_room(&mut self, _index: usize, _center: Point) {}
}

/// Carves the map and nothing else.
impl RoomPopulator for () {
    fn populate(&mut self, _index: usize, _room: &Rect, _grid: &TileGrid, _rng: &mut dyn Dice) {}
}

#[derive(Clone, Debug)]
pub struct Dungeon {
    pub grid: TileGrid,
    pub rooms: Vec<Rect>,
    pub tunnels: Vec<Vec<Point>>,
    pub spawn: Point,
}

/// Rejection-samples up to `max_rooms` rooms and chains each one to the
/// previously accepted room with an L-shaped tunnel.
pub fn generate(
    params: &GenerationParams,
    rng: &mut dyn Dice,
    populator: &mut dyn RoomPopulator,
) -> Dungeon {
    let mut grid = TileGrid::filled(params.width, params.height);
    let mut rooms: Vec<Rect> = Vec::new();
    let mut tunnels = Vec::new();
    let mut spawn = None;

    for attempt in 0..params.max_rooms {
        let w = rng.randint(params.room_min, params.room_max);
        let h = rng.randint(params.room_min, params.room_max);
        let x = rng.randint(0, params.width - w - 1);
        let y = rng.randint(0, params.height - h - 1);
        let candidate = Rect::with_size(x, y, w, h);

        if rooms.iter().any(|room| room.intersect(&candidate)) {
            debug!("room attempt {attempt} at ({x},{y}) {w}x{h} overlaps, skipped");
            continue;
        }

        let index = rooms.len();
        grid.carve_room(&candidate);
        populator.populate(index, &candidate, &grid, rng);

        let center = candidate.center();
        populator.mark_room(index, center);

        match rooms.last() {
            None => spawn = Some(center),
            Some(previous) => {
                let horizontal_first = rng.coin_flip();
                let path = corridor_path(previous.center(), center, horizontal_first);
                for &point in &path {
                    grid.carve_point(point);
                }
                tunnels.push(path);
            }
        }

        rooms.push(candidate);
    }

    let spawn = spawn.unwrap_or_else(|| {
        warn!(
            "no room fit in {}x{} after {} attempts",
            params.width, params.height, params.max_rooms
        );
        Point::new(params.width / 2, params.height / 2)
    });

    info!(
        "generated {}x{} dungeon: {} rooms from {} attempts, spawn at ({},{})",
        params.width,
        params.height,
        rooms.len(),
        params.max_rooms,
        spawn.x,
        spawn.y
    );

    Dungeon {
        grid,
        rooms,
        tunnels,
        spawn,
    }
}

/// Cells of a one-tile-wide L between two points, both ends included.
fn corridor_path(start: Point, end: Point, horizontal_first: bool) -> Vec<Point> {
    let mut path = vec![start];
    let mut cursor = start;

    if horizontal_first {
        walk_x(&mut cursor, end.x, &mut path);
        walk_y(&mut cursor, end.y, &mut path);
    } else {
        walk_y(&mut cursor, end.y, &mut path);
        walk_x(&mut cursor, end.x, &mut path);
    }

    path
}

fn walk_x(cursor: &mut Point, target: i32, path: &mut Vec<Point>) {
    while cursor.x != target {
        cursor.x += if target > cursor.x { 1 } else { -1 };
        path.push(*cursor);
    }
}

fn walk_y(cursor: &mut Point, target: i32, path: &mut Vec<Point>) {
    while cursor.y != target {
        cursor.y += if target > cursor.y { 1 } else { -1 };
        path.push(*cursor);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bracket_random::prelude::RandomNumberGenerator;
    use proptest::prelude::*;

    use super::*;
    use crate::rng::ScriptedDice;

    fn default_params() -> GenerationParams {
        GenerationParams::from(&GameConfig::default())
    }

    #[derive(Default)]
    struct Recorder {
        populated: Vec<(usize, Rect)>,
        marks: Vec<Point>,
    }

    impl RoomPopulator for Recorder {
        fn populate(&mut self, index: usize, room: &Rect, grid: &TileGrid, _rng: &mut dyn Dice) {
            let inner = Point::new(room.x1 + 1, room.y1 + 1);
            assert!(!grid.is_wall(inner), "room must be carved before population");
            self.populated.push((index, *room));
        }

        fn mark_room(&mut self, _index: usize, center: Point) {
            self.marks.push(center);
        }
    }

    #[test]
    fn single_room_spawns_player_at_center_without_tunnels() {
        let params = GenerationParams {
            max_rooms: 1,
            ..default_params()
        };
        let mut rng = RandomNumberGenerator::seeded(11);
        let dungeon = generate(&params, &mut rng, &mut ());

        assert_eq!(dungeon.rooms.len(), 1);
        assert!(dungeon.tunnels.is_empty());
        assert_eq!(dungeon.spawn, dungeon.rooms[0].center());

        let room = dungeon.rooms[0];
        let interior = ((room.x2 - room.x1 - 1) * (room.y2 - room.y1 - 1)) as usize;
        assert_eq!(dungeon.grid.floor_points().len(), interior);
    }

    #[test]
    fn second_room_is_tunnelled_from_the_first() {
        // 6x6 at (2,2), then 6x6 at (20,20), vertical-then-horizontal.
        let mut dice = ScriptedDice::new([6, 6, 2, 2, 6, 6, 20, 20, 0]);
        let params = GenerationParams {
            max_rooms: 2,
            ..default_params()
        };
        let dungeon = generate(&params, &mut dice, &mut ());

        assert_eq!(dungeon.rooms.len(), 2);
        assert_eq!(dungeon.tunnels.len(), 1);
        let tunnel = &dungeon.tunnels[0];
        assert_eq!(tunnel.first(), Some(&Point::new(5, 5)));
        assert_eq!(tunnel.last(), Some(&Point::new(23, 23)));
        assert!(tunnel.contains(&Point::new(5, 23)), "bend is below the first room");
        assert!(tunnel.iter().all(|p| !dungeon.grid.is_wall(*p)));
    }

    #[test]
    fn overlapping_candidate_is_skipped_not_retried() {
        let mut dice = ScriptedDice::new([6, 6, 2, 2, 6, 6, 4, 4]);
        let params = GenerationParams {
            max_rooms: 2,
            ..default_params()
        };
        let mut recorder = Recorder::default();
        let dungeon = generate(&params, &mut dice, &mut recorder);

        assert_eq!(dungeon.rooms.len(), 1);
        assert_eq!(recorder.populated.len(), 1);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn populator_sees_every_accepted_room_in_order() {
        let mut rng = RandomNumberGenerator::seeded(3);
        let mut recorder = Recorder::default();
        let dungeon = generate(&default_params(), &mut rng, &mut recorder);

        let indexes: Vec<usize> = recorder.populated.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, (0..dungeon.rooms.len()).collect::<Vec<_>>());
        let centers: Vec<Point> = dungeon.rooms.iter().map(Rect::center).collect();
        assert_eq!(recorder.marks, centers);
    }

    #[test]
    fn corridor_legs_follow_bend_order() {
        let h = corridor_path(Point::new(1, 1), Point::new(3, 4), true);
        assert_eq!(h[1], Point::new(2, 1));
        assert_eq!(h.len(), 6);
        let v = corridor_path(Point::new(1, 1), Point::new(3, 4), false);
        assert_eq!(v[1], Point::new(1, 2));
        assert_eq!(v.last(), Some(&Point::new(3, 4)));
        assert_eq!(corridor_path(Point::new(2, 2), Point::new(2, 2), true).len(), 1);
    }

    proptest! {
        #[test]
        fn accepted_rooms_never_intersect(seed in any::<u64>()) {
            let mut rng = RandomNumberGenerator::seeded(seed);
            let dungeon = generate(&default_params(), &mut rng, &mut ());
            prop_assert!(!dungeon.rooms.is_empty());
            for (i, a) in dungeon.rooms.iter().enumerate() {
                for b in dungeon.rooms.iter().skip(i + 1) {
                    prop_assert!(!a.intersect(b));
                }
            }
        }

        #[test]
        fn only_rooms_and_tunnels_are_open(seed in any::<u64>()) {
            let mut rng = RandomNumberGenerator::seeded(seed);
            let dungeon = generate(&default_params(), &mut rng, &mut ());

            let mut carved: HashSet<Point> = dungeon.tunnels.iter().flatten().copied().collect();
            for room in &dungeon.rooms {
                for y in (room.y1 + 1)..room.y2 {
                    for x in (room.x1 + 1)..room.x2 {
                        let point = Point::new(x, y);
                        prop_assert!(!dungeon.grid.is_wall(point));
                        prop_assert!(!dungeon.grid.blocks_sight(point));
                        carved.insert(point);
                    }
                }
            }
            for point in dungeon.grid.points() {
                let tile = dungeon.grid.tile_at(point).unwrap();
                prop_assert_eq!(tile.blocked, tile.blocks_sight);
                prop_assert_eq!(!tile.blocked, carved.contains(&point));
            }
        }
    }
}

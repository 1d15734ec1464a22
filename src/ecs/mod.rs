pub mod components;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::DistanceAlg;
use bracket_terminal::prelude::RGB;
use specs::prelude::{Builder, Entity, Join, World, WorldExt};

use crate::{map::TileGrid, render::palette::Color};

use self::components::{
    Behavior, BlocksTile, Capabilities, CombatStats, Item, MonsterBrain, Named, PlayerTag,
    Position, Renderable,
};

/// Everything needed to put a new actor on the map.
#[derive(Clone, Debug)]
pub struct ActorSpec {
    pub point: Point,
    pub glyph: char,
    pub color: RGB,
    pub name: String,
    pub blocks: bool,
    pub combat: Option<CombatStats>,
    pub brain: Option<MonsterBrain>,
    pub item: Option<Item>,
}

impl ActorSpec {
    pub fn new<S: Into<String>>(point: Point, glyph: char, color: Color, name: S) -> Self {
        Self {
            point,
            glyph,
            color: RGB::named(color),
            name: name.into(),
            blocks: false,
            combat: None,
            brain: None,
            item: None,
        }
    }

    pub fn blocking(mut self) -> Self {
        self.blocks = true;
        self
    }

    pub fn with_combat(mut self, stats: CombatStats) -> Self {
        self.combat = Some(stats);
        self
    }

    pub fn with_brain(mut self, behavior: Behavior) -> Self {
        self.brain = Some(MonsterBrain { behavior });
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Point),
    Blocked,
}

/// Sole owner of every actor. `order` is the on-map draw and turn order;
/// capabilities hold no references back, callers pass `Entity` handles.
pub struct ActorStore {
    world: World,
    order: Vec<Entity>,
    player: Entity,
}

impl ActorStore {
    pub fn new(player: ActorSpec) -> Self {
        let mut world = World::new();
        Self::register_components(&mut world);
        let player = Self::build_actor(&mut world, player);
        let _ = world.write_storage::<PlayerTag>().insert(player, PlayerTag);
        Self {
            world,
            order: vec![player],
            player,
        }
    }

    fn register_components(world: &mut World) {
        world.register::<Position>();
        world.register::<Renderable>();
        world.register::<Named>();
        world.register::<BlocksTile>();
        world.register::<PlayerTag>();
        world.register::<CombatStats>();
        world.register::<MonsterBrain>();
        world.register::<Item>();
    }

    pub fn spawn(&mut self, spec: ActorSpec) -> Entity {
        let entity = Self::build_actor(&mut self.world, spec);
        self.order.push(entity);
        entity
    }

    fn build_actor(world: &mut World, spec: ActorSpec) -> Entity {
        let mut builder = world
            .create_entity()
            .with(Position { point: spec.point })
            .with(Renderable {
                glyph: spec.glyph,
                color: spec.color,
            })
            .with(Named { name: spec.name });
        if spec.blocks {
            builder = builder.with(BlocksTile);
        }
        if let Some(stats) = spec.combat {
            builder = builder.with(stats);
        }
        if let Some(brain) = spec.brain {
            builder = builder.with(brain);
        }
        if let Some(item) = spec.item {
            builder = builder.with(item);
        }
        builder.build()
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_point(&self) -> Point {
        self.position(self.player).unwrap_or(Point::new(0, 0))
    }

    pub fn is_player(&self, entity: Entity) -> bool {
        self.world.read_storage::<PlayerTag>().contains(entity)
    }

    /// On-map actors in draw/turn order, captured so callers can mutate the
    /// store while walking it.
    pub fn handles(&self) -> Vec<Entity> {
        self.order.clone()
    }

    pub fn on_map_count(&self) -> usize {
        self.order.len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.is_alive(entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Point> {
        self.world
            .read_storage::<Position>()
            .get(entity)
            .map(|pos| pos.point)
    }

    pub fn is_on_map(&self, entity: Entity) -> bool {
        self.world.read_storage::<Position>().contains(entity)
    }

    pub fn name(&self, entity: Entity) -> String {
        self.world
            .read_storage::<Named>()
            .get(entity)
            .map(|named| named.name.clone())
            .unwrap_or_else(|| "something".to_string())
    }

    pub fn renderable(&self, entity: Entity) -> Option<Renderable> {
        self.world.read_storage::<Renderable>().get(entity).cloned()
    }

    pub fn capabilities(&self, entity: Entity) -> Capabilities {
        Capabilities {
            combat: self.world.read_storage::<CombatStats>().contains(entity),
            ai: self.world.read_storage::<MonsterBrain>().contains(entity),
            item: self.world.read_storage::<Item>().contains(entity),
        }
    }

    pub fn blocks(&self, entity: Entity) -> bool {
        self.world.read_storage::<BlocksTile>().contains(entity)
    }

    pub fn combat_stats(&self, entity: Entity) -> Option<CombatStats> {
        self.world.read_storage::<CombatStats>().get(entity).cloned()
    }

    pub fn with_combat_mut<R>(
        &mut self,
        entity: Entity,
        f: impl FnOnce(&mut CombatStats) -> R,
    ) -> Option<R> {
        self.world
            .write_storage::<CombatStats>()
            .get_mut(entity)
            .map(f)
    }

    pub fn behavior(&self, entity: Entity) -> Option<Behavior> {
        self.world
            .read_storage::<MonsterBrain>()
            .get(entity)
            .map(|brain| brain.behavior)
    }

    pub fn item(&self, entity: Entity) -> Option<Item> {
        self.world.read_storage::<Item>().get(entity).cloned()
    }

    /// Tile walls and blocking actors both count.
    pub fn is_blocked(&self, grid: &TileGrid, point: Point) -> bool {
        if grid.is_wall(point) {
            return true;
        }
        let positions = self.world.read_storage::<Position>();
        let blockers = self.world.read_storage::<BlocksTile>();
        (&positions, &blockers)
            .join()
            .any(|(pos, _)| pos.point == point)
    }

    /// Moving into a wall or another creature is a no-op, not an error.
    pub fn move_by(&mut self, entity: Entity, dx: i32, dy: i32, grid: &TileGrid) -> MoveOutcome {
        let Some(from) = self.position(entity) else {
            return MoveOutcome::Blocked;
        };
        let target = Point::new(from.x + dx, from.y + dy);
        if self.is_blocked(grid, target) {
            return MoveOutcome::Blocked;
        }
        if let Some(pos) = self.world.write_storage::<Position>().get_mut(entity) {
            pos.point = target;
        }
        MoveOutcome::Moved(target)
    }

    /// One step along the straight line to `target`, each axis rounded.
    pub fn move_towards(&mut self, entity: Entity, target: Point, grid: &TileGrid) -> MoveOutcome {
        let Some(from) = self.position(entity) else {
            return MoveOutcome::Blocked;
        };
        let distance = DistanceAlg::Pythagoras.distance2d(from, target);
        if distance == 0.0 {
            return MoveOutcome::Blocked;
        }
        let dx = ((target.x - from.x) as f32 / distance).round() as i32;
        let dy = ((target.y - from.y) as f32 / distance).round() as i32;
        self.move_by(entity, dx, dy, grid)
    }

    pub fn distance(&self, a: Entity, b: Entity) -> Option<f32> {
        let from = self.position(a)?;
        let to = self.position(b)?;
        Some(DistanceAlg::Pythagoras.distance2d(from, to))
    }

    pub fn actors_at(&self, point: Point) -> Vec<Entity> {
        let positions = self.world.read_storage::<Position>();
        self.order
            .iter()
            .copied()
            .filter(|entity| positions.get(*entity).is_some_and(|pos| pos.point == point))
            .collect()
    }

    pub fn combat_target_at(&self, point: Point) -> Option<Entity> {
        let stats = self.world.read_storage::<CombatStats>();
        self.actors_at(point)
            .into_iter()
            .find(|entity| stats.contains(*entity))
    }

    pub fn item_at(&self, point: Point) -> Option<Entity> {
        let items = self.world.read_storage::<Item>();
        self.actors_at(point)
            .into_iter()
            .find(|entity| items.contains(*entity))
    }

    /// Draws beneath everything sharing its cell.
    pub fn send_to_back(&mut self, entity: Entity) {
        if let Some(idx) = self.order.iter().position(|e| *e == entity) {
            let entity = self.order.remove(idx);
            self.order.insert(0, entity);
        }
    }

    pub fn send_to_front(&mut self, entity: Entity) {
        if let Some(idx) = self.order.iter().position(|e| *e == entity) {
            let entity = self.order.remove(idx);
            self.order.push(entity);
        }
    }

    pub fn each_renderable<F>(&self, mut f: F)
    where
        F: FnMut(Entity, Point, &Renderable),
    {
        let positions = self.world.read_storage::<Position>();
        let renderables = self.world.read_storage::<Renderable>();
        for &entity in &self.order {
            if let (Some(pos), Some(render)) = (positions.get(entity), renderables.get(entity)) {
                f(entity, pos.point, render);
            }
        }
    }

    pub fn rename<S: Into<String>>(&mut self, entity: Entity, name: S) {
        let _ = self
            .world
            .write_storage::<Named>()
            .insert(entity, Named { name: name.into() });
    }

    pub fn reskin(&mut self, entity: Entity, glyph: char, color: Color) {
        let _ = self.world.write_storage::<Renderable>().insert(
            entity,
            Renderable {
                glyph,
                color: RGB::named(color),
            },
        );
    }

    pub fn set_blocks(&mut self, entity: Entity, blocks: bool) {
        let mut storage = self.world.write_storage::<BlocksTile>();
        if blocks {
            let _ = storage.insert(entity, BlocksTile);
        } else {
            storage.remove(entity);
        }
    }

    pub fn remove_combat(&mut self, entity: Entity) -> Option<CombatStats> {
        self.world.write_storage::<CombatStats>().remove(entity)
    }

    pub fn remove_brain(&mut self, entity: Entity) -> Option<MonsterBrain> {
        self.world.write_storage::<MonsterBrain>().remove(entity)
    }

    /// Lifts an actor off the map; it stays alive for whoever holds it now.
    pub fn take_from_map(&mut self, entity: Entity) {
        self.world.write_storage::<Position>().remove(entity);
        self.order.retain(|e| *e != entity);
    }

    pub fn place_on_map(&mut self, entity: Entity, point: Point) {
        let _ = self
            .world
            .write_storage::<Position>()
            .insert(entity, Position { point });
        if !self.order.contains(&entity) {
            self.order.push(entity);
        }
    }

    pub fn destroy(&mut self, entity: Entity) {
        self.order.retain(|e| *e != entity);
        let _ = self.world.delete_entity(entity);
    }
}

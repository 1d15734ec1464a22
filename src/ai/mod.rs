use log::debug;
use specs::prelude::Entity;

use crate::{
    combat::{self, AttackOutcome},
    ecs::{ActorStore, MoveOutcome, components::Behavior},
    gamelog::MessageLog,
    map::TileGrid,
    rng::Dice,
    visibility::Visibility,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiOutcome {
    /// Out of sight, brainless, or next to a dead player.
    Idle,
    Moved,
    Blocked,
    Attacked(AttackOutcome),
}

impl AiOutcome {
    pub fn acted(self) -> bool {
        matches!(self, AiOutcome::Moved | AiOutcome::Attacked(_))
    }
}

/// Everything a monster may read or change during its turn.
pub struct AiContext<'a> {
    pub store: &'a mut ActorStore,
    pub grid: &'a TileGrid,
    pub visibility: &'a Visibility,
    pub log: &'a mut MessageLog,
    pub dice: &'a mut dyn Dice,
}

pub fn take_turn(ctx: &mut AiContext, monster: Entity) -> AiOutcome {
    match ctx.store.behavior(monster) {
        Some(Behavior::ChaseAndMelee) => chase_and_melee(ctx, monster),
        None => AiOutcome::Idle,
    }
}

/// Symmetric with the player's view: a monster the player cannot see does
/// not act.
fn chase_and_melee(ctx: &mut AiContext, monster: Entity) -> AiOutcome {
    let Some(point) = ctx.store.position(monster) else {
        return AiOutcome::Idle;
    };
    if !ctx.visibility.can_see(point) {
        return AiOutcome::Idle;
    }

    let player = ctx.store.player();
    let Some(distance) = ctx.store.distance(monster, player) else {
        return AiOutcome::Idle;
    };

    if distance >= 2.0 {
        let target = ctx.store.player_point();
        return match ctx.store.move_towards(monster, target, ctx.grid) {
            MoveOutcome::Moved(to) => {
                debug!("{} steps to ({},{})", ctx.store.name(monster), to.x, to.y);
                AiOutcome::Moved
            }
            MoveOutcome::Blocked => AiOutcome::Blocked,
        };
    }

    let player_alive = ctx
        .store
        .combat_stats(player)
        .is_some_and(|stats| stats.is_alive());
    if !player_alive {
        return AiOutcome::Idle;
    }
    AiOutcome::Attacked(combat::attack(
        ctx.store, ctx.log, ctx.dice, monster, player,
    ))
}

#[cfg(test)]
mod tests {
    use bracket_geometry::prelude::{Point, Rect};

    use super::*;
    use crate::{
        data::{monsters::BESTIARY, player_spec},
        rng::ScriptedDice,
        visibility::ShadowcastFov,
    };

    struct Arena {
        store: ActorStore,
        grid: TileGrid,
        visibility: Visibility,
        log: MessageLog,
        dice: ScriptedDice,
    }

    impl Arena {
        fn new(player: Point) -> Self {
            let mut grid = TileGrid::filled(30, 20);
            grid.carve_room(&Rect::with_size(0, 0, 29, 19));
            let mut visibility = Visibility::new(10, true);
            visibility.recompute(&ShadowcastFov, player, &mut grid);
            Self {
                store: ActorStore::new(player_spec(player)),
                grid,
                visibility,
                log: MessageLog::new(6, 58),
                dice: ScriptedDice::default(),
            }
        }

        fn turn(&mut self, monster: Entity) -> AiOutcome {
            let mut ctx = AiContext {
                store: &mut self.store,
                grid: &self.grid,
                visibility: &self.visibility,
                log: &mut self.log,
                dice: &mut self.dice,
            };
            take_turn(&mut ctx, monster)
        }
    }

    #[test]
    fn visible_monster_closes_in() {
        let mut arena = Arena::new(Point::new(5, 5));
        let orc = arena.store.spawn(BESTIARY[1].spec(Point::new(9, 5)));
        assert_eq!(arena.turn(orc), AiOutcome::Moved);
        assert_eq!(arena.store.position(orc), Some(Point::new(8, 5)));
    }

    #[test]
    fn adjacent_monster_attacks() {
        let mut arena = Arena::new(Point::new(5, 5));
        let troll = arena.store.spawn(BESTIARY[3].spec(Point::new(6, 6)));
        let outcome = arena.turn(troll);
        assert_eq!(
            outcome,
            AiOutcome::Attacked(AttackOutcome::Hit {
                damage: 4,
                death: None
            })
        );
        assert_eq!(arena.store.combat_stats(arena.store.player()).map(|s| s.hp), Some(26));
    }

    #[test]
    fn unseen_monster_stays_put() {
        let mut arena = Arena::new(Point::new(2, 2));
        let orc = arena.store.spawn(BESTIARY[1].spec(Point::new(25, 15)));
        assert!(!arena.visibility.can_see(Point::new(25, 15)));
        assert_eq!(arena.turn(orc), AiOutcome::Idle);
        assert_eq!(arena.store.position(orc), Some(Point::new(25, 15)));
    }

    #[test]
    fn dead_player_is_left_alone() {
        let mut arena = Arena::new(Point::new(5, 5));
        let player = arena.store.player();
        arena.store.with_combat_mut(player, |stats| stats.hp = 0);
        let orc = arena.store.spawn(BESTIARY[1].spec(Point::new(6, 5)));
        assert_eq!(arena.turn(orc), AiOutcome::Idle);
        assert!(arena.log.is_empty());
    }

    #[test]
    fn remains_have_no_turn() {
        let mut arena = Arena::new(Point::new(5, 5));
        let orc = arena.store.spawn(BESTIARY[1].spec(Point::new(6, 5)));
        arena.store.remove_brain(orc);
        assert_eq!(arena.turn(orc), AiOutcome::Idle);
    }
}

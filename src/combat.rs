use log::info;
use specs::prelude::Entity;

use crate::{
    ecs::{ActorStore, components::DeathKind},
    gamelog::MessageLog,
    render::palette::{self, Color},
    rng::Dice,
};

/// Flavor only; every verb deals the same damage.
const ATTACK_VERBS: [(&str, Color); 5] = [
    ("attacks", palette::LIGHT_GREY),
    ("swings", palette::GREY),
    ("bashes", palette::DARK_GREY),
    ("clobbers", palette::DARKER_GREY),
    ("smashes", palette::SEPIA),
];

pub const CORPSE_GLYPH: char = '%';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Death {
    Player,
    Monster,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// One side has no combat stats (e.g. a corpse).
    NoTarget,
    NoEffect,
    Hit { damage: i32, death: Option<Death> },
}

pub fn attack(
    store: &mut ActorStore,
    log: &mut MessageLog,
    dice: &mut dyn Dice,
    attacker: Entity,
    defender: Entity,
) -> AttackOutcome {
    let (Some(offense), Some(defense)) = (store.combat_stats(attacker), store.combat_stats(defender))
    else {
        return AttackOutcome::NoTarget;
    };

    let attacker_name = capitalize(&store.name(attacker));
    let defender_name = store.name(defender);
    let damage = offense.power - defense.defense;

    if damage <= 0 {
        log.info(format!(
            "{attacker_name} attacks {defender_name} but it has no effect!"
        ));
        return AttackOutcome::NoEffect;
    }

    let (verb, color) = ATTACK_VERBS[dice.randint(0, ATTACK_VERBS.len() as i32 - 1) as usize];
    log.push(
        format!("{attacker_name} {verb} {defender_name} for {damage} hit points."),
        color,
    );

    let death = take_damage(store, log, defender, damage);
    AttackOutcome::Hit { damage, death }
}

/// Applies damage and fires the death transition on the hit that crosses
/// zero. Later hits on an already-dead player change hp but fire nothing.
pub fn take_damage(
    store: &mut ActorStore,
    log: &mut MessageLog,
    target: Entity,
    damage: i32,
) -> Option<Death> {
    if damage <= 0 {
        return None;
    }
    let (was_alive, now_alive, on_death) = store.with_combat_mut(target, |stats| {
        let was_alive = stats.is_alive();
        stats.hp -= damage;
        (was_alive, stats.is_alive(), stats.on_death)
    })?;

    if !was_alive || now_alive {
        return None;
    }

    Some(match on_death {
        DeathKind::Player => {
            player_death(store, log, target);
            Death::Player
        }
        DeathKind::Monster => {
            monster_death(store, log, target);
            Death::Monster
        }
    })
}

fn player_death(store: &mut ActorStore, log: &mut MessageLog, player: Entity) {
    info!("player died");
    log.push("You died!", palette::RED);
    store.reskin(player, CORPSE_GLYPH, palette::DARK_RED);
}

/// The monster stays in the store as scenery: no blocking, no stats, no brain.
fn monster_death(store: &mut ActorStore, log: &mut MessageLog, monster: Entity) {
    let name = store.name(monster);
    info!("{name} died");
    log.push(format!("{} is dead.", capitalize(&name)), palette::ORANGE);
    store.reskin(monster, CORPSE_GLYPH, palette::DARK_RED);
    store.set_blocks(monster, false);
    store.remove_combat(monster);
    store.remove_brain(monster);
    store.rename(monster, format!("remains of {name}"));
    store.send_to_back(monster);
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

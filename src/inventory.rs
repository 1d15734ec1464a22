use log::debug;
use specs::prelude::Entity;

use crate::{
    ecs::{ActorStore, components::ItemEffect},
    gamelog::MessageLog,
    menu::MAX_OPTIONS,
    render::palette,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickupOutcome {
    Full,
    PickedUp(Entity),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    NoSuchSlot,
    NotUsable,
    /// The effect declined to run; the item stays in the pack.
    Cancelled,
    Consumed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    NoSuchSlot,
    Dropped(Entity),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    Applied,
    Cancelled,
}

/// The player's pack. Items in here have no position and are not part of
/// the on-map order, but they stay alive in the store.
#[derive(Clone, Debug)]
pub struct Inventory {
    items: Vec<Entity>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(MAX_OPTIONS)
    }
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: capacity.min(MAX_OPTIONS),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn get(&self, slot: usize) -> Option<Entity> {
        self.items.get(slot).copied()
    }

    pub fn names(&self, store: &ActorStore) -> Vec<String> {
        self.items.iter().map(|item| store.name(*item)).collect()
    }

    pub fn pick_up(
        &mut self,
        store: &mut ActorStore,
        log: &mut MessageLog,
        item: Entity,
    ) -> PickupOutcome {
        let name = store.name(item);
        if self.is_full() {
            log.push(
                format!("Your inventory is full, cannot pick up {name}."),
                palette::RED,
            );
            return PickupOutcome::Full;
        }
        store.take_from_map(item);
        self.items.push(item);
        log.push(format!("You picked up a {name}!"), palette::GREEN);
        PickupOutcome::PickedUp(item)
    }

    /// Consumed items leave the pack and the store exactly once.
    pub fn use_item(
        &mut self,
        store: &mut ActorStore,
        log: &mut MessageLog,
        slot: usize,
    ) -> UseOutcome {
        let Some(item) = self.get(slot) else {
            return UseOutcome::NoSuchSlot;
        };
        let Some(effect) = store.item(item).and_then(|item| item.effect) else {
            log.info(format!("The {} cannot be used.", store.name(item)));
            return UseOutcome::NotUsable;
        };

        match apply_effect(store, log, effect) {
            EffectOutcome::Cancelled => UseOutcome::Cancelled,
            EffectOutcome::Applied => {
                self.items.remove(slot);
                debug!("consumed {}", store.name(item));
                store.destroy(item);
                UseOutcome::Consumed
            }
        }
    }

    /// Puts the item back under the player's feet, beneath everything else.
    pub fn drop_item(
        &mut self,
        store: &mut ActorStore,
        log: &mut MessageLog,
        slot: usize,
    ) -> DropOutcome {
        if slot >= self.items.len() {
            return DropOutcome::NoSuchSlot;
        }
        let item = self.items.remove(slot);
        store.place_on_map(item, store.player_point());
        store.send_to_back(item);
        log.push(format!("You dropped a {}.", store.name(item)), palette::YELLOW);
        DropOutcome::Dropped(item)
    }
}

fn apply_effect(store: &mut ActorStore, log: &mut MessageLog, effect: ItemEffect) -> EffectOutcome {
    match effect {
        ItemEffect::Heal { amount } => cast_heal(store, log, amount),
    }
}

pub fn cast_heal(store: &mut ActorStore, log: &mut MessageLog, amount: i32) -> EffectOutcome {
    let player = store.player();
    let healed = store.with_combat_mut(player, |stats| {
        if stats.hp >= stats.max_hp {
            false
        } else {
            stats.heal(amount);
            true
        }
    });

    match healed {
        Some(true) => {
            log.push("Your wounds start to feel better!", palette::LIGHT_VIOLET);
            EffectOutcome::Applied
        }
        _ => {
            log.push("You are already at full health.", palette::RED);
            EffectOutcome::Cancelled
        }
    }
}

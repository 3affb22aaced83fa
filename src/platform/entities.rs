//! Typed registry of the visual elements the game shows and hides

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STEP, SLOT_COUNT};
use crate::sim::Heading;

/// Dense handle the renderer uses to address a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

/// A named visual element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// Player turtle sprite, one per facing
    Turtle(Heading),
    TargetTurtle,
    Splot,
    SuccessBanner,
    FailureBanner,
    /// Number card showing `value` in `slot`
    Number { slot: usize, value: u8 },
    /// Highlighted number card for the slot being walked
    GlowNumber { slot: usize, value: u8 },
}

const FIXED: usize = 8;
const CARDS: usize = SLOT_COUNT * MAX_STEP as usize;

/// Bidirectional mapping between `Entity` and `EntityHandle`.
///
/// Handles are assigned in a fixed order so they are stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        let mut entities = Vec::with_capacity(FIXED + 2 * CARDS);
        entities.extend(Heading::ALL.map(Entity::Turtle));
        entities.extend([
            Entity::TargetTurtle,
            Entity::Splot,
            Entity::SuccessBanner,
            Entity::FailureBanner,
        ]);
        for slot in 0..SLOT_COUNT {
            for value in 1..=MAX_STEP {
                entities.push(Entity::Number { slot, value });
            }
        }
        for slot in 0..SLOT_COUNT {
            for value in 1..=MAX_STEP {
                entities.push(Entity::GlowNumber { slot, value });
            }
        }
        Self { entities }
    }

    pub fn handle(&self, entity: Entity) -> EntityHandle {
        let card = |slot: usize, value: u8| {
            (slot % SLOT_COUNT) * MAX_STEP as usize + (value.clamp(1, MAX_STEP) - 1) as usize
        };
        let index = match entity {
            Entity::Turtle(h) => h.index(),
            Entity::TargetTurtle => 4,
            Entity::Splot => 5,
            Entity::SuccessBanner => 6,
            Entity::FailureBanner => 7,
            Entity::Number { slot, value } => FIXED + card(slot, value),
            Entity::GlowNumber { slot, value } => FIXED + CARDS + card(slot, value),
        };
        EntityHandle(index as u32)
    }

    /// Reverse lookup, e.g. for click hit-testing
    pub fn entity(&self, handle: EntityHandle) -> Option<Entity> {
        self.entities.get(handle.0 as usize).copied()
    }

    pub fn number(&self, slot: usize, value: u8) -> EntityHandle {
        self.handle(Entity::Number { slot, value })
    }

    pub fn glow(&self, slot: usize, value: u8) -> EntityHandle {
        self.handle(Entity::GlowNumber { slot, value })
    }

    pub fn turtle(&self, heading: Heading) -> EntityHandle {
        self.handle(Entity::Turtle(heading))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, Entity)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityHandle(i as u32), *e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

//! World events and the per-level subscription list
//!
//! Events are delivered synchronously by [`crate::world::World::publish`]
//! while the action that caused them is still running.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::geom::{LevelId, Position};
use crate::object::Item;
use crate::world::DestroyAction;

/// Something that happened on a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Items landed on a cell (dropped, thrown, or left by a corpse)
    ItemsAppeared {
        position: Position,
        items: Vec<Item>,
    },
    /// A creature took items from the cell it stands on
    ItemsPickedUp {
        creature: CreatureId,
        position: Position,
        items: Vec<Item>,
    },
    /// A creature put items down on the cell it stands on
    ItemsDropped {
        creature: CreatureId,
        position: Position,
        items: Vec<Item>,
    },
    CreatureKilled {
        victim: CreatureId,
        attacker: Option<CreatureId>,
        position: Position,
    },
    FurnitureDestroyed {
        position: Position,
        action: DestroyAction,
    },
}

impl GameEvent {
    pub fn position(&self) -> Position {
        match self {
            GameEvent::ItemsAppeared { position, .. }
            | GameEvent::ItemsPickedUp { position, .. }
            | GameEvent::ItemsDropped { position, .. }
            | GameEvent::CreatureKilled { position, .. }
            | GameEvent::FurnitureDestroyed { position, .. } => *position,
        }
    }

    pub fn level(&self) -> LevelId {
        self.position().level
    }
}

/// Listeners keyed by the level they watch, in subscription order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBus {
    listeners: HashMap<LevelId, Vec<CreatureId>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events on `level`. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, level: LevelId, listener: CreatureId) {
        let list = self.listeners.entry(level).or_default();
        if !list.contains(&listener) {
            list.push(listener);
        }
    }

    pub fn unsubscribe(&mut self, level: LevelId, listener: CreatureId) {
        if let Some(list) = self.listeners.get_mut(&level) {
            list.retain(|l| *l != listener);
        }
    }

    /// Remove a listener from every level
    pub fn unsubscribe_all(&mut self, listener: CreatureId) {
        for list in self.listeners.values_mut() {
            list.retain(|l| *l != listener);
        }
    }

    pub fn listeners(&self, level: LevelId) -> &[CreatureId] {
        self.listeners.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_subscribed(&self, level: LevelId, listener: CreatureId) -> bool {
        self.listeners(level).contains(&listener)
    }
}

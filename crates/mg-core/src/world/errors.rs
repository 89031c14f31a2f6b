//! Error types for world, factory and configuration operations

use thiserror::Error;

use crate::creature::CreatureId;
use crate::geom::{LevelId, Position};
use crate::object::ItemId;

/// Structural failures of world operations.
///
/// Controllers never surface these; they turn a failed move into a crash or
/// a wait.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Unknown level {0:?}")]
    UnknownLevel(LevelId),

    #[error("Unknown creature {0:?}")]
    UnknownCreature(CreatureId),

    #[error("Creature {0:?} is dead")]
    Dead(CreatureId),

    #[error("Position ({}, {}) is outside the level", .0.coord.x, .0.coord.y)]
    OutOfBounds(Position),

    #[error("Position ({}, {}) is occupied", .0.coord.x, .0.coord.y)]
    Occupied(Position),

    #[error("Position ({}, {}) cannot be entered", .0.coord.x, .0.coord.y)]
    Blocked(Position),

    #[error("Creature {creature:?} is held by {holder:?}")]
    Held {
        creature: CreatureId,
        holder: CreatureId,
    },

    #[error("Item {0:?} not found")]
    UnknownItem(ItemId),
}

/// Failures turning a symbolic creature id into a creature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("Unknown creature id: {0}")]
    UnknownCreature(String),
}

/// Failures loading engine options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid option {name}: {reason}")]
    Invalid { name: String, reason: String },
}

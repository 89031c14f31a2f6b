//! mg-core: creature definitions and special controllers for a roguelike
//!
//! The [`factory`] turns symbolic creature kinds into fully equipped
//! creatures. Each creature carries one [`controller::Controller`] that the
//! [`world::World`] scheduler drives once per tick. Special monsters (rolling
//! and sokoban boulders, the multi-segment kraken, the shopkeeper and
//! illusions) have bespoke controllers; everything else runs the generic
//! [`controller::MonsterAi`].
//!
//! The crate has no I/O besides loading [`config::EngineOptions`].

pub mod config;
pub mod consts;
pub mod controller;
pub mod creature;
pub mod events;
pub mod factory;
pub mod geom;
pub mod object;
pub mod rng;
pub mod world;

pub use config::EngineOptions;
pub use consts::*;
pub use controller::{AiAction, Controller};
pub use creature::{Creature, CreatureId, TribeId};
pub use events::{EventBus, GameEvent};
pub use factory::{CreatureFactory, CreatureKind};
pub use geom::{Dir4, LevelId, Position, Rect, Vec2};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use world::{DropType, GameTime, Level, World};

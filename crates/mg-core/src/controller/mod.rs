//! Creature controllers
//!
//! Each creature owns exactly one [`Controller`]. The scheduler calls
//! [`Controller::make_move`] once per tick; the world calls
//! [`Controller::on_killed`] when the creature dies, [`Controller::on_event`]
//! for events on a level the creature subscribed to, and
//! [`Controller::on_items_given`] when someone hands it items.

mod boulder;
mod illusion;
mod kraken;
mod monster;
mod shopkeeper;

pub use boulder::{BoulderController, PushResult, SokobanController, push_sokoban_boulder};
pub use illusion::IllusionController;
pub use kraken::KrakenController;
pub use monster::MonsterAi;
pub use shopkeeper::ShopkeeperController;

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::events::GameEvent;
use crate::geom::Vec2;
use crate::object::Item;
use crate::rng::RandomSource;
use crate::world::World;

/// What a controller did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Nothing happened (creature gone or had no controller)
    None,
    /// Moved to new coordinates
    Moved(Vec2),
    /// Attacked a creature
    Attacked(CreatureId),
    /// Waited/rested
    Waited,
    /// The creature died on its own turn
    Died,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Monster(MonsterAi),
    Boulder(BoulderController),
    Sokoban(SokobanController),
    Kraken(KrakenController),
    Shopkeeper(ShopkeeperController),
    Illusion(IllusionController),
}

impl Controller {
    pub fn make_move(
        &mut self,
        me: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> AiAction {
        match self {
            Controller::Monster(ai) => ai.make_move(me, world, rng),
            Controller::Boulder(c) => c.make_move(me, world),
            Controller::Sokoban(c) => c.make_move(me, world),
            Controller::Kraken(c) => c.make_move(me, world, rng),
            Controller::Shopkeeper(c) => c.make_move(me, world, rng),
            Controller::Illusion(c) => c.make_move(me, world),
        }
    }

    pub fn on_killed(&mut self, me: CreatureId, attacker: Option<CreatureId>, world: &mut World) {
        match self {
            Controller::Kraken(c) => c.on_killed(me, attacker, world),
            Controller::Illusion(c) => c.on_killed(me, attacker, world),
            Controller::Monster(_)
            | Controller::Boulder(_)
            | Controller::Sokoban(_)
            | Controller::Shopkeeper(_) => {}
        }
    }

    pub fn on_event(&mut self, me: CreatureId, event: &GameEvent, world: &mut World) {
        if let Controller::Shopkeeper(c) = self {
            c.on_event(me, event, world);
        }
    }

    pub fn on_items_given(
        &mut self,
        me: CreatureId,
        items: &[Item],
        from: CreatureId,
        world: &mut World,
    ) {
        if let Controller::Shopkeeper(c) = self {
            c.on_items_given(me, items, from, world);
        }
    }

    pub fn as_kraken(&self) -> Option<&KrakenController> {
        match self {
            Controller::Kraken(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_boulder(&self) -> Option<&BoulderController> {
        match self {
            Controller::Boulder(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_shopkeeper(&self) -> Option<&ShopkeeperController> {
        match self {
            Controller::Shopkeeper(c) => Some(c),
            _ => None,
        }
    }
}

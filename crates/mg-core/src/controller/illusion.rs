//! Illusory doubles that vanish after a few ticks

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::world::{DropType, GameTime, World};

use super::AiAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllusionController {
    death_time: GameTime,
}

impl IllusionController {
    pub fn new(death_time: GameTime) -> Self {
        Self { death_time }
    }

    pub fn death_time(&self) -> GameTime {
        self.death_time
    }

    pub fn make_move(&mut self, me: CreatureId, world: &mut World) -> AiAction {
        if !world.is_alive(me) {
            return AiAction::None;
        }
        if world.time() >= self.death_time {
            world.creature_message(me, "The illusion disappears.");
            world.kill(me, None, DropType::Nothing);
            return AiAction::Died;
        }
        AiAction::Waited
    }

    pub fn on_killed(&mut self, _me: CreatureId, attacker: Option<CreatureId>, world: &mut World) {
        if let Some(attacker) = attacker {
            world.private_message(attacker, "It was just an illusion!");
        }
    }
}

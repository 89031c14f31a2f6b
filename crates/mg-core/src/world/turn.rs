//! Turn scheduling
//!
//! One tick gives every creature that is alive at the start of the tick a
//! single controller call, in arena order. Creatures killed mid-tick are
//! skipped and swept at the end.

use crate::controller::AiAction;
use crate::creature::CreatureId;
use crate::rng::RandomSource;

use super::World;

impl World {
    /// Run one creature's controller
    pub fn run_controller(&mut self, id: CreatureId, rng: &mut dyn RandomSource) -> AiAction {
        if !self.is_alive(id) {
            return AiAction::None;
        }
        let Some(mut controller) = self.take_controller(id) else {
            log::warn!("creature {:?} has no controller", id);
            return AiAction::None;
        };
        let action = controller.make_move(id, self, rng);
        self.restore_controller(id, controller);
        action
    }

    /// Advance the world by one tick
    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> Vec<(CreatureId, AiAction)> {
        let mut actions = Vec::new();
        for id in self.living_ids() {
            if self.is_alive(id) {
                let action = self.run_controller(id, rng);
                actions.push((id, action));
            }
        }
        self.remove_dead();
        self.time.advance();
        actions
    }

    /// Run `ticks` ticks
    pub fn run(&mut self, ticks: u64, rng: &mut dyn RandomSource) {
        for _ in 0..ticks {
            self.tick(rng);
        }
    }
}

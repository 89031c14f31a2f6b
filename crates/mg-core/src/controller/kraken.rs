//! Kraken: a head that grows a chain of tentacle segments toward prey
//!
//! Segments reference their father and children by [`CreatureId`] only. A
//! segment whose father can no longer be found retracts; children that died
//! are pruned one per turn.

use serde::{Deserialize, Serialize};

use crate::consts::{KRAKEN_SIGHT_RADIUS, MAX_KRAKEN_LENGTH};
use crate::creature::{Creature, CreatureId, ViewId};
use crate::factory::CreatureFactory;
use crate::geom::{Position, Rect};
use crate::rng::RandomSource;
use crate::world::{DropType, MovementTraits, MsgType, World};

use super::{AiAction, Controller};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KrakenController {
    /// `None` for the head
    father: Option<CreatureId>,
    /// Distance from the head
    length: u32,
    spawns: Vec<CreatureId>,
}

impl KrakenController {
    /// Controller for a kraken head
    pub fn head() -> Self {
        Self::default()
    }

    /// Controller for a tentacle segment grown by `father`
    pub fn segment(father: CreatureId, length: u32) -> Self {
        Self {
            father: Some(father),
            length,
            spawns: Vec::new(),
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    pub fn father(&self) -> Option<CreatureId> {
        self.father
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn spawns(&self) -> &[CreatureId] {
        &self.spawns
    }

    pub fn is_head(&self) -> bool {
        self.father.is_none()
    }

    pub fn make_move(
        &mut self,
        me: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> AiAction {
        if !world.is_alive(me) {
            return AiAction::None;
        }
        if let Some(father) = self.father {
            if !world.is_alive(father) {
                log::debug!("tentacle {:?} lost its father, retracting", me);
                world.kill(me, None, DropType::Nothing);
                return AiAction::Died;
            }
        }

        if let Some(i) = self.spawns.iter().position(|s| !world.is_alive(*s)) {
            self.spawns.remove(i);
        }

        if self.spawns.is_empty() {
            if let Some(held) = held_creature(world, me) {
                self.pull_enemy(me, held, world, rng);
                if !world.is_alive(me) {
                    return AiAction::Died;
                }
            } else if let Some(enemy) = self.visible_enemy(me, world) {
                self.consider_attacking(me, enemy, world, rng);
            } else if self.father.is_some() && rng.one_in(5) {
                log::debug!("tentacle {:?} retracts", me);
                world.kill(me, None, DropType::Nothing);
                return AiAction::Died;
            }
        }
        AiAction::Waited
    }

    pub fn on_killed(&mut self, _me: CreatureId, attacker: Option<CreatureId>, world: &mut World) {
        if let Some(attacker) = attacker {
            let text = if self.father.is_some() {
                "You cut the kraken's tentacle"
            } else {
                "You kill the kraken!"
            };
            world.second_person(attacker, text);
        }
        for spawn in self.spawns.clone() {
            if world.is_alive(spawn) {
                world.kill(spawn, None, DropType::Everything);
            }
        }
    }

    fn pull_enemy(
        &mut self,
        me: CreatureId,
        held: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) {
        if !rng.one_in(3) {
            return;
        }
        let (Some(my_pos), Some(held_pos), Some(the)) = (
            world.creature(me).map(|c| c.position),
            world.creature(held).map(|c| c.position),
            world.creature(me).map(|c| c.the()),
        ) else {
            return;
        };
        world.you(held, MsgType::HappensTo, &format!("{} pulls", the));
        match self.father {
            Some(father) => {
                world.set_held(held, Some(father));
                let pull_dir = held_pos.dir_to(&my_pos);
                world.kill(me, None, DropType::Nothing);
                world.displace(held, pull_dir);
            }
            None => {
                world.you(held, MsgType::Are, &format!("eaten by {}", the));
                world.kill(held, None, DropType::Everything);
            }
        }
    }

    /// Nearest visible enemy of another kind that nothing holds yet
    fn visible_enemy(&self, me: CreatureId, world: &World) -> Option<CreatureId> {
        let creature = world.creature(me)?;
        let my_pos = creature.position;
        let my_kind = creature.kind();
        let mut best: Option<(CreatureId, i32)> = None;
        for coord in Rect::centered(my_pos.coord, KRAKEN_SIGHT_RADIUS).iter() {
            let Some(other) = world.creature_at(Position::new(my_pos.level, coord)) else {
                continue;
            };
            let Some(other_creature) = world.creature(other) else {
                continue;
            };
            if other == me || (my_kind.is_some() && other_creature.kind() == my_kind) {
                continue;
            }
            let distance = my_pos.coord.dist8(coord);
            if best.is_some_and(|(_, d)| d <= distance) {
                continue;
            }
            if world.can_see(me, Position::new(my_pos.level, coord))
                && world.is_enemy(me, other)
                && world.holder_of(other).is_none()
            {
                best = Some((other, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    fn consider_attacking(
        &mut self,
        me: CreatureId,
        enemy: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) {
        let (Some(me_c), Some(enemy_pos)) = (
            world.creature(me),
            world.creature(enemy).map(|c| c.position),
        ) else {
            return;
        };
        let my_pos = me_c.position;
        let the = me_c.the();
        let tribe = me_c.tribe;
        let v = my_pos.dir_to(&enemy_pos);

        if v.length8() == 1 {
            world.you(enemy, MsgType::HappensTo, &format!("{} swings itself around", the));
            world.set_held(enemy, Some(me));
            return;
        }
        if self.length >= MAX_KRAKEN_LENGTH || !rng.one_in(2) {
            return;
        }

        let moves: Vec<_> = v
            .approx_l1()
            .into_iter()
            .filter(|d| {
                world.can_enter_with(my_pos.plus(*d), MovementTraits::WALK | MovementTraits::SWIM)
            })
            .collect();
        let Some(i) = rng.choose_index(moves.len()) else {
            return;
        };
        let target = my_pos.plus(moves[i]);
        let view_id = if world.can_enter_with(target, MovementTraits::SWIM) {
            ViewId::KrakenWater
        } else {
            ViewId::KrakenLand
        };
        let spawn = Creature::new(
            tribe,
            CreatureFactory::kraken_attributes(view_id, "kraken tentacle"),
            Controller::Kraken(KrakenController::segment(me, self.length + 1)),
        );
        match world.add_creature(spawn, target) {
            Ok(id) => {
                log::debug!("kraken {:?} grows segment {:?} at depth {}", me, id, self.length + 1);
                self.spawns.push(id);
            }
            Err(err) => log::warn!("kraken {:?} failed to grow: {}", me, err),
        }
    }
}

/// Adjacent creature this one is holding
fn held_creature(world: &World, me: CreatureId) -> Option<CreatureId> {
    let pos = world.creature(me)?.position;
    pos.coord
        .neighbors8()
        .filter_map(|v| world.creature_at(Position::new(pos.level, v)))
        .find(|other| world.holder_of(*other) == Some(me))
}

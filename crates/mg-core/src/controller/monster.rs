//! Default monster AI
//!
//! Greedy chase toward the nearest visible enemy with diagonal fallbacks,
//! random wandering, and a leash variant that keeps a creature inside a
//! rectangle.

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::geom::{DIRECTIONS8, Position, Rect, Vec2};
use crate::rng::RandomSource;
use crate::world::World;

use super::AiAction;

/// How far a hunting monster looks for prey
const HUNT_RADIUS: i32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonsterAi {
    /// Never moves
    Idle,
    /// Hunts enemies, wanders otherwise
    Monster,
    /// Hunts or wanders but never leaves the area
    StayInLocation(Rect),
    /// Wanders aimlessly
    Wander,
}

impl MonsterAi {
    pub fn make_move(
        &self,
        me: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> AiAction {
        if !world.is_alive(me) {
            return AiAction::None;
        }
        match self {
            MonsterAi::Idle => AiAction::Waited,
            MonsterAi::Monster => match nearest_enemy(world, me, HUNT_RADIUS) {
                Some(enemy) => chase(world, me, enemy, None, rng),
                None => wander_randomly(world, me, None, rng),
            },
            MonsterAi::StayInLocation(area) => {
                let Some(pos) = world.creature(me).map(|c| c.position) else {
                    return AiAction::None;
                };
                if !area.contains(pos.coord) {
                    let center = Vec2::new((area.x1 + area.x2) / 2, (area.y1 + area.y2) / 2);
                    return move_towards(world, me, Position::new(pos.level, center), None, rng);
                }
                match nearest_enemy(world, me, HUNT_RADIUS) {
                    Some(enemy) => chase(world, me, enemy, Some(area), rng),
                    None => wander_randomly(world, me, Some(area), rng),
                }
            }
            MonsterAi::Wander => wander_randomly(world, me, None, rng),
        }
    }
}

/// Closest visible enemy within `radius`
pub(crate) fn nearest_enemy(world: &World, me: CreatureId, radius: i32) -> Option<CreatureId> {
    let pos = world.creature(me)?.position;
    Rect::centered(pos.coord, radius)
        .iter()
        .filter_map(|v| world.creature_at(Position::new(pos.level, v)))
        .filter(|other| *other != me && world.is_enemy(me, *other))
        .filter(|other| world.can_see_creature(me, *other))
        .min_by_key(|other| {
            world
                .creature(*other)
                .and_then(|c| c.position.dist8(&pos))
                .unwrap_or(i32::MAX)
        })
}

fn chase(
    world: &mut World,
    me: CreatureId,
    enemy: CreatureId,
    area: Option<&Rect>,
    rng: &mut dyn RandomSource,
) -> AiAction {
    let (Some(my_pos), Some(target)) = (
        world.creature(me).map(|c| c.position),
        world.creature(enemy).map(|c| c.position),
    ) else {
        return AiAction::None;
    };
    if my_pos.dist8(&target) == Some(1) {
        let (attacker, victim) = (
            world.creature(me).map(|c| c.the()).unwrap_or_default(),
            world.creature(enemy).map(|c| c.the()).unwrap_or_default(),
        );
        world.global_message(target, format!("{} attacks {}", attacker, victim));
        return AiAction::Attacked(enemy);
    }
    move_towards(world, me, target, area, rng)
}

fn allowed(world: &World, me: CreatureId, to: Position, area: Option<&Rect>) -> bool {
    area.is_none_or(|a| a.contains(to.coord)) && world.can_enter(me, to)
}

fn move_towards(
    world: &mut World,
    me: CreatureId,
    target: Position,
    area: Option<&Rect>,
    rng: &mut dyn RandomSource,
) -> AiAction {
    let Some(pos) = world.creature(me).map(|c| c.position) else {
        return AiAction::None;
    };
    let step = pos.dir_to(&target).signum();
    if step == Vec2::ZERO {
        return AiAction::Waited;
    }
    let to = pos.plus(step);
    if allowed(world, me, to, area) && world.move_creature(me, to).is_ok() {
        return AiAction::Moved(to.coord);
    }
    try_alternative_move(world, me, step, area, rng)
}

fn try_alternative_move(
    world: &mut World,
    me: CreatureId,
    preferred: Vec2,
    area: Option<&Rect>,
    rng: &mut dyn RandomSource,
) -> AiAction {
    let Some(pos) = world.creature(me).map(|c| c.position) else {
        return AiAction::None;
    };

    // Straight moves fall back to diagonals and vice versa
    let mut alternatives = if preferred.x == 0 {
        vec![Vec2::new(1, preferred.y), Vec2::new(-1, preferred.y)]
    } else if preferred.y == 0 {
        vec![Vec2::new(preferred.x, 1), Vec2::new(preferred.x, -1)]
    } else {
        vec![Vec2::new(preferred.x, 0), Vec2::new(0, preferred.y)]
    };
    if rng.one_in(2) {
        alternatives.reverse();
    }

    for step in alternatives {
        let to = pos.plus(step);
        if allowed(world, me, to, area) && world.move_creature(me, to).is_ok() {
            return AiAction::Moved(to.coord);
        }
    }
    AiAction::Waited
}

fn wander_randomly(
    world: &mut World,
    me: CreatureId,
    area: Option<&Rect>,
    rng: &mut dyn RandomSource,
) -> AiAction {
    let Some(pos) = world.creature(me).map(|c| c.position) else {
        return AiAction::None;
    };

    if rng.one_in(2) {
        return AiAction::Waited;
    }

    let Some(i) = rng.choose_index(DIRECTIONS8.len()) else {
        return AiAction::Waited;
    };
    let to = pos.plus(DIRECTIONS8[i]);
    if allowed(world, me, to, area) && world.move_creature(me, to).is_ok() {
        AiAction::Moved(to.coord)
    } else {
        AiAction::Waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::creature::{Creature, CreatureAttributes, TribeId, ViewId};
    use crate::rng::ScriptedRng;
    use crate::world::Level;

    fn spawn(world: &mut World, tribe: TribeId, ai: MonsterAi, x: i32, y: i32) -> CreatureId {
        let level = world.levels()[0].id;
        world
            .add_creature(
                Creature::new(
                    tribe,
                    CreatureAttributes::new(ViewId::Orc, "orc"),
                    Controller::Monster(ai),
                ),
                Position::new(level, Vec2::new(x, y)),
            )
            .unwrap()
    }

    #[test]
    fn test_hunter_steps_toward_enemy() {
        let mut world = World::new();
        world.add_level(Level::walled("room", 12, 12));
        let orc = spawn(&mut world, TribeId::Monster, MonsterAi::Monster, 2, 2);
        spawn(&mut world, TribeId::Player, MonsterAi::Idle, 6, 2);
        let mut rng = ScriptedRng::default();
        let action = world.run_controller(orc, &mut rng);
        assert_eq!(action, AiAction::Moved(Vec2::new(3, 2)));
    }

    #[test]
    fn test_adjacent_enemy_is_attacked() {
        let mut world = World::new();
        world.add_level(Level::walled("room", 12, 12));
        let orc = spawn(&mut world, TribeId::Monster, MonsterAi::Monster, 2, 2);
        let hero = spawn(&mut world, TribeId::Player, MonsterAi::Idle, 3, 3);
        let mut rng = ScriptedRng::default();
        assert_eq!(world.run_controller(orc, &mut rng), AiAction::Attacked(hero));
        assert!(world.messages().contains("attacks"));
    }

    #[test]
    fn test_stay_in_location_never_leaves() {
        let mut world = World::new();
        world.add_level(Level::walled("room", 12, 12));
        let area = Rect::new(2, 2, 4, 4);
        let keeper = spawn(&mut world, TribeId::Peaceful, MonsterAi::StayInLocation(area), 3, 3);
        let mut rng = crate::rng::GameRng::new(5);
        for _ in 0..50 {
            world.tick(&mut rng);
            let coord = world.creature(keeper).map(|c| c.position.coord).unwrap();
            assert!(area.contains(coord), "left the area at {:?}", coord);
        }
    }

    #[test]
    fn test_wander_waits_on_roll() {
        let mut world = World::new();
        world.add_level(Level::walled("room", 12, 12));
        let rat = spawn(&mut world, TribeId::Wildlife, MonsterAi::Wander, 5, 5);
        let mut rng = ScriptedRng::new([0]);
        assert_eq!(world.run_controller(rat, &mut rng), AiAction::Waited);
    }
}

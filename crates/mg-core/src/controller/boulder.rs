//! Rolling boulders and Sokoban boulders

use serde::{Deserialize, Serialize};

use crate::consts::BOULDER_EROSION;
use crate::creature::{AttrType, CreatureId};
use crate::geom::Dir4;
use crate::world::{DestroyAction, DropType, Terrain, World, WorldError, capitalize};

use super::AiAction;

/// A boulder rolling one cell per turn in a fixed direction.
///
/// Health starts at 1.0 and only ever goes down: crushing creatures,
/// smashing furniture and plain erosion all cost health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoulderController {
    direction: Dir4,
    health: f64,
}

impl BoulderController {
    pub fn new(direction: Dir4) -> Self {
        Self {
            direction,
            health: 1.0,
        }
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    pub fn direction(&self) -> Dir4 {
        self.direction
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn make_move(&mut self, me: CreatureId, world: &mut World) -> AiAction {
        let Some(boulder) = world.creature(me).filter(|c| !c.dead) else {
            return AiAction::None;
        };
        let the_boulder = boulder.the();
        let strength = boulder.attr(AttrType::Damage).max(1) as f64;
        let next = boulder.position.plus(self.direction.delta());

        if let Some(other) = world.creature_at(next) {
            let Some((killable, damage, the_other)) = world.creature(other).map(|c| {
                (
                    c.body().is_killed_by_boulder(),
                    c.body().boulder_damage(),
                    c.the(),
                )
            }) else {
                return AiAction::None;
            };
            if !killable {
                if world.can_enter_empty(me, next) && world.swap_position(me, other).is_ok() {
                    return AiAction::Moved(next.coord);
                }
            } else {
                self.health -= damage;
                if self.health <= 0.0 {
                    log::debug!("{} destroyed on {}", the_boulder, the_other);
                    world.global_message(next, format!("{} crashes on {}", the_boulder, the_other));
                    world.unseen_message(next, "You hear a crash");
                    world.kill(me, None, DropType::Everything);
                    return AiAction::Died;
                }
                world.you(other, crate::world::MsgType::KilledBy, &the_boulder);
                world.kill(other, Some(me), DropType::Everything);
            }
        }

        if let Some(furniture) = world.furniture_at(next) {
            if let Some(cost) = furniture.kind.strength(DestroyAction::Boulder) {
                if cost < self.health * strength {
                    self.health -= cost / strength;
                    world.destroy_furniture(next, DestroyAction::Boulder);
                }
            }
        }

        if let Err(err) = world.move_creature(me, next) {
            log::debug!("{} stopped: {}", the_boulder, err);
            let name = world.position_name(next);
            world.global_message(next, format!("{} crashes on the {}", the_boulder, name));
            world.unseen_message(next, "You hear a crash");
            world.kill(me, None, DropType::Everything);
            return AiAction::Died;
        }

        self.health -= BOULDER_EROSION;
        if self.health <= 0.0 && world.is_alive(me) {
            world.kill(me, None, DropType::Everything);
            return AiAction::Died;
        }
        AiAction::Moved(next.coord)
    }
}

/// A boulder that only moves when pushed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SokobanController;

impl SokobanController {
    pub fn new() -> Self {
        Self
    }

    pub fn make_move(&mut self, _me: CreatureId, _world: &mut World) -> AiAction {
        AiAction::Waited
    }
}

/// Outcome of pushing a Sokoban boulder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushResult {
    /// Boulder rolled on; the pusher stepped into its old cell
    Moved,
    /// Boulder sank into water and filled it
    FilledPool,
    /// Boulder did not move
    Blocked,
}

/// Push the Sokoban boulder standing next to `pusher` in `dir`.
pub fn push_sokoban_boulder(
    world: &mut World,
    pusher: CreatureId,
    dir: Dir4,
) -> Result<PushResult, WorldError> {
    let pusher_creature = world
        .creature(pusher)
        .ok_or(WorldError::UnknownCreature(pusher))?;
    let pusher_size = pusher_creature.body().size;
    let boulder_pos = pusher_creature.position.plus(dir.delta());
    let boulder = world
        .creature_at(boulder_pos)
        .filter(|id| world.creature(*id).is_some_and(|c| c.attributes.boulder))
        .ok_or(WorldError::Blocked(boulder_pos))?;
    let min_size = world
        .creature(boulder)
        .and_then(|c| c.body().min_push_size);

    if world.holder_of(pusher).is_some() {
        world.second_person(pusher, "You cannot push the boulder while you are held.");
        return Ok(PushResult::Blocked);
    }
    if min_size.is_some_and(|min| pusher_size < min) {
        world.second_person(pusher, "You are too small to push the boulder.");
        return Ok(PushResult::Blocked);
    }

    let dest = boulder_pos.plus(dir.delta());
    let Some(cell) = world.cell(dest) else {
        world.second_person(pusher, "You try to push the boulder, but it won't budge.");
        return Ok(PushResult::Blocked);
    };
    if cell.creature.is_some() {
        world.second_person(pusher, "There's a monster on the other side.");
        world.second_person(pusher, "Perhaps that's why you cannot move it.");
        return Ok(PushResult::Blocked);
    }
    if cell.terrain == Terrain::Water && !cell.blocks_movement() {
        world.kill(boulder, None, DropType::Nothing);
        if let Some(level) = world.level_mut(dest.level) {
            level.set_terrain(dest.coord, Terrain::Floor);
        }
        world.global_message(dest, "The boulder fills the pool!");
        world.move_creature(pusher, boulder_pos)?;
        return Ok(PushResult::FilledPool);
    }
    if world.move_creature(boulder, dest).is_err() {
        world.second_person(pusher, "You try to push the boulder, but it won't budge.");
        return Ok(PushResult::Blocked);
    }
    world.move_creature(pusher, boulder_pos)?;
    let the = world
        .creature(boulder)
        .map(|c| capitalize(&c.the()))
        .unwrap_or_default();
    log::debug!("{} pushed {}", the, dir);
    Ok(PushResult::Moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, MonsterAi};
    use crate::creature::{Body, BodySize, Creature, CreatureAttributes, TribeId, ViewId};
    use crate::factory::CreatureFactory;
    use crate::geom::{LevelId, Position, Vec2};
    use crate::rng::ScriptedRng;
    use crate::world::{Furniture, FurnitureKind, Level};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(LevelId(0), Vec2::new(x, y))
    }

    fn setup() -> World {
        let mut world = World::new();
        world.add_level(Level::walled("corridor", 12, 5));
        world
    }

    fn add_boulder(world: &mut World, x: i32, health: f64) -> CreatureId {
        let mut boulder = CreatureFactory::new().rolling_boulder(TribeId::Killer, Dir4::East);
        boulder.controller = Some(Controller::Boulder(
            BoulderController::new(Dir4::East).with_health(health),
        ));
        world.add_creature(boulder, pos(x, 2)).unwrap()
    }

    fn add_victim(world: &mut World, x: i32, size: BodySize) -> CreatureId {
        let mut attrs = CreatureAttributes::new(ViewId::Goblin, "goblin");
        attrs.body = Body::humanoid(size);
        world
            .add_creature(
                Creature::new(TribeId::Greenskin, attrs, Controller::Monster(MonsterAi::Idle)),
                pos(x, 2),
            )
            .unwrap()
    }

    fn health(world: &World, id: CreatureId) -> f64 {
        world
            .creature(id)
            .and_then(|c| c.controller())
            .and_then(|c| c.as_boulder())
            .map(|b| b.health())
            .unwrap()
    }

    fn step(world: &mut World, id: CreatureId) -> AiAction {
        world.run_controller(id, &mut ScriptedRng::default())
    }

    // ========================================================================
    // Rolling boulder
    // ========================================================================

    #[test]
    fn test_rolls_and_erodes() {
        let mut world = setup();
        let id = add_boulder(&mut world, 2, 1.0);
        assert_eq!(step(&mut world, id), AiAction::Moved(Vec2::new(3, 2)));
        assert!((health(&world, id) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_crash_into_wall_keeps_health() {
        let mut world = setup();
        let id = add_boulder(&mut world, 10, 1.0);
        assert_eq!(step(&mut world, id), AiAction::Died);
        assert!(!world.is_alive(id));
        assert!(world.messages().contains("The boulder crashes on the wall"));
        assert!(world.messages().contains("You hear a crash"));
        assert_eq!(health(&world, id), 1.0);
    }

    #[test]
    fn test_crushes_creature() {
        let mut world = setup();
        let id = add_boulder(&mut world, 2, 1.0);
        let victim = add_victim(&mut world, 3, BodySize::Large);
        assert_eq!(step(&mut world, id), AiAction::Moved(Vec2::new(3, 2)));
        assert!(!world.is_alive(victim));
        assert!(world.messages().contains("You are killed by the boulder"));
        assert!((health(&world, id) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_worn_boulder_breaks_on_creature() {
        let mut world = setup();
        let id = add_boulder(&mut world, 2, 0.25);
        let victim = add_victim(&mut world, 3, BodySize::Large);
        assert_eq!(step(&mut world, id), AiAction::Died);
        assert!(world.is_alive(victim));
        assert!(world.messages().contains("The boulder crashes on the goblin"));
    }

    #[test]
    fn test_passes_spirits() {
        let mut world = setup();
        let id = add_boulder(&mut world, 2, 1.0);
        let mut attrs = CreatureAttributes::new(ViewId::Ghost, "ghost");
        attrs.body = Body::non_humanoid_spirit(BodySize::Large);
        let ghost = world
            .add_creature(
                Creature::new(TribeId::Monster, attrs, Controller::Monster(MonsterAi::Idle)),
                pos(3, 2),
            )
            .unwrap();
        assert_eq!(step(&mut world, id), AiAction::Moved(Vec2::new(3, 2)));
        assert_eq!(world.creature_at(pos(2, 2)), Some(ghost));
        assert_eq!(health(&world, id), 1.0);
    }

    #[test]
    fn test_spirit_over_water_stops_the_boulder() {
        let mut world = setup();
        if let Some(level) = world.level_mut(LevelId(0)) {
            level.set_terrain(Vec2::new(3, 2), Terrain::Water);
        }
        let id = add_boulder(&mut world, 2, 1.0);
        let mut attrs = CreatureAttributes::new(ViewId::Ghost, "ghost");
        attrs.body = Body::non_humanoid_spirit(BodySize::Large);
        let ghost = world
            .add_creature(
                Creature::new(TribeId::Monster, attrs, Controller::Monster(MonsterAi::Idle)),
                pos(3, 2),
            )
            .unwrap();
        assert_eq!(step(&mut world, id), AiAction::Died);
        assert!(world.is_alive(ghost));
        assert_eq!(world.creature_at(pos(3, 2)), Some(ghost));
        assert!(world.messages().contains("The boulder crashes on the water"));
        assert_eq!(health(&world, id), 1.0);
    }

    #[test]
    fn test_smashes_door() {
        let mut world = setup();
        if let Some(level) = world.level_mut(LevelId(0)) {
            level.set_furniture(Vec2::new(3, 2), Some(Furniture::new(FurnitureKind::Door)));
        }
        let id = add_boulder(&mut world, 2, 1.0);
        assert_eq!(step(&mut world, id), AiAction::Moved(Vec2::new(3, 2)));
        assert_eq!(world.furniture_at(pos(3, 2)), None);
        // 1.0 - 100/250 - 0.2
        assert!((health(&world, id) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_tree_too_strong() {
        let mut world = setup();
        if let Some(level) = world.level_mut(LevelId(0)) {
            level.set_furniture(Vec2::new(3, 2), Some(Furniture::new(FurnitureKind::Tree)));
        }
        let id = add_boulder(&mut world, 2, 1.0);
        assert_eq!(step(&mut world, id), AiAction::Died);
        assert!(world.messages().contains("crashes on the tree"));
    }

    // ========================================================================
    // Sokoban
    // ========================================================================

    fn add_pusher(world: &mut World, x: i32, size: BodySize) -> CreatureId {
        let mut attrs = CreatureAttributes::new(ViewId::Player, "adventurer");
        attrs.body = Body::humanoid(size);
        world
            .add_creature(
                Creature::new(TribeId::Player, attrs, Controller::Monster(MonsterAi::Idle)),
                pos(x, 2),
            )
            .unwrap()
    }

    #[test]
    fn test_sokoban_push() {
        let mut world = setup();
        let boulder = world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        let hero = add_pusher(&mut world, 3, BodySize::Large);
        assert_eq!(push_sokoban_boulder(&mut world, hero, Dir4::East), Ok(PushResult::Moved));
        assert_eq!(world.creature_at(pos(5, 2)), Some(boulder));
        assert_eq!(world.creature_at(pos(4, 2)), Some(hero));
        assert_eq!(step(&mut world, boulder), AiAction::Waited);
    }

    #[test]
    fn test_sokoban_too_small() {
        let mut world = setup();
        world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        let gnome = add_pusher(&mut world, 3, BodySize::Medium);
        assert_eq!(push_sokoban_boulder(&mut world, gnome, Dir4::East), Ok(PushResult::Blocked));
    }

    #[test]
    fn test_sokoban_fills_pool() {
        let mut world = setup();
        if let Some(level) = world.level_mut(LevelId(0)) {
            level.set_terrain(Vec2::new(5, 2), Terrain::Water);
        }
        let boulder = world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        let hero = add_pusher(&mut world, 3, BodySize::Large);
        assert_eq!(
            push_sokoban_boulder(&mut world, hero, Dir4::East),
            Ok(PushResult::FilledPool)
        );
        assert!(!world.is_alive(boulder));
        assert_eq!(world.cell(pos(5, 2)).map(|c| c.terrain), Some(Terrain::Floor));
    }

    #[test]
    fn test_sokoban_blocked_by_monster() {
        let mut world = setup();
        world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        add_victim(&mut world, 5, BodySize::Medium);
        let hero = add_pusher(&mut world, 3, BodySize::Large);
        assert_eq!(push_sokoban_boulder(&mut world, hero, Dir4::East), Ok(PushResult::Blocked));
        assert!(world.messages().contains("There's a monster on the other side."));
    }

    #[test]
    fn test_sokoban_held_pusher_leaves_boulder_alone() {
        let mut world = setup();
        let boulder = world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        let hero = add_pusher(&mut world, 3, BodySize::Large);
        let goblin = add_victim(&mut world, 2, BodySize::Medium);
        world.set_held(hero, Some(goblin));
        assert_eq!(push_sokoban_boulder(&mut world, hero, Dir4::East), Ok(PushResult::Blocked));
        assert_eq!(world.creature_at(pos(4, 2)), Some(boulder));
        assert_eq!(world.creature_at(pos(3, 2)), Some(hero));
        assert_eq!(world.creature_at(pos(5, 2)), None);
    }

    #[test]
    fn test_sokoban_held_pusher_does_not_fill_pool() {
        let mut world = setup();
        if let Some(level) = world.level_mut(LevelId(0)) {
            level.set_terrain(Vec2::new(5, 2), Terrain::Water);
        }
        let boulder = world
            .add_creature(CreatureFactory::new().sokoban_boulder(TribeId::Peaceful), pos(4, 2))
            .unwrap();
        let hero = add_pusher(&mut world, 3, BodySize::Large);
        let goblin = add_victim(&mut world, 2, BodySize::Medium);
        world.set_held(hero, Some(goblin));
        assert_eq!(push_sokoban_boulder(&mut world, hero, Dir4::East), Ok(PushResult::Blocked));
        assert!(world.is_alive(boulder));
        assert_eq!(world.cell(pos(5, 2)).map(|c| c.terrain), Some(Terrain::Water));
    }
}

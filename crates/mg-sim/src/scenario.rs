//! Canned worlds for the runner
//!
//! Each scenario adds one level to the world and populates it through the
//! creature factory. The level id is returned so extra spawns land on it.

use clap::ValueEnum;
use strum::Display;
use thiserror::Error;

use mg_core::controller::{Controller, MonsterAi, push_sokoban_boulder};
use mg_core::creature::{CreatureAttributes, ViewId};
use mg_core::object::{Item, ItemType};
use mg_core::world::{FactoryError, Furniture, FurnitureKind, Terrain, WorldError};
use mg_core::{
    Creature, CreatureFactory, CreatureId, CreatureKind, Dir4, Level, LevelId, Position,
    RandomSource, Rect, TribeId, Vec2, World,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Scenario {
    /// A kraken head reaching for an adventurer
    Kraken,
    /// A customer walking out of a shop with unpaid boots
    Shop,
    /// A rolling boulder down a corridor and a Sokoban puzzle
    Boulder,
    /// An orc, its illusory double and a lost soul
    Illusion,
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error("No free cell left on level {0:?}")]
    Full(LevelId),
}

impl Scenario {
    pub fn build(
        self,
        world: &mut World,
        factory: &mut CreatureFactory,
        rng: &mut dyn RandomSource,
    ) -> Result<LevelId, ScenarioError> {
        log::info!("building scenario {}", self);
        match self {
            Scenario::Kraken => kraken(world, factory, rng),
            Scenario::Shop => shop(world, factory, rng),
            Scenario::Boulder => boulder(world, factory, rng),
            Scenario::Illusion => illusion(world, factory, rng),
        }
    }
}

/// Place a creature built from its string id on the first free floor cell
pub fn spawn(
    world: &mut World,
    factory: &mut CreatureFactory,
    level: LevelId,
    name: &str,
    rng: &mut dyn RandomSource,
) -> Result<CreatureId, ScenarioError> {
    let creature = factory.from_name(name, TribeId::Monster, rng)?;
    let pos = free_cell(world, level).ok_or(ScenarioError::Full(level))?;
    Ok(world.add_creature(creature, pos)?)
}

fn free_cell(world: &World, level: LevelId) -> Option<Position> {
    let lvl = world.level(level)?;
    lvl.bounds()
        .iter()
        .find(|v| {
            lvl.cell(*v).is_some_and(|cell| {
                cell.terrain == Terrain::Floor && cell.creature.is_none() && !cell.blocks_movement()
            })
        })
        .map(|v| Position::new(level, v))
}

fn adventurer() -> Creature {
    Creature::new(
        TribeId::Player,
        CreatureAttributes::new(ViewId::Player, "adventurer"),
        Controller::Monster(MonsterAi::Idle),
    )
}

fn kraken(
    world: &mut World,
    factory: &mut CreatureFactory,
    rng: &mut dyn RandomSource,
) -> Result<LevelId, ScenarioError> {
    let level = world.add_level(Level::walled("sea", 20, 12));
    let at = |x, y| Position::new(level, Vec2::new(x, y));
    let head = factory.from_kind(CreatureKind::Kraken, TribeId::Monster, rng);
    world.add_creature(head, at(2, 5))?;
    world.add_creature(adventurer(), at(6, 5))?;
    Ok(level)
}

fn shop(
    world: &mut World,
    factory: &mut CreatureFactory,
    rng: &mut dyn RandomSource,
) -> Result<LevelId, ScenarioError> {
    let level = world.add_level(Level::walled("market", 20, 10));
    let at = |x, y| Position::new(level, Vec2::new(x, y));
    let keeper = factory.shopkeeper(Rect::new(1, 1, 5, 5), TribeId::Peaceful, rng);
    let keeper = world.add_creature(keeper, at(1, 1))?;
    world.place_items(at(3, 3), vec![Item::new(ItemType::LeatherBoots)]);
    world.place_items(at(2, 4), vec![Item::new(ItemType::Sword)]);
    let customer = world.add_creature(adventurer(), at(3, 3))?;

    // The keeper prices the goods on its first turn
    world.run_controller(keeper, rng);

    let boots: Vec<_> = world.items_at(at(3, 3)).iter().map(|i| i.id).collect();
    world.pick_up(customer, &boots)?;
    world.move_creature(customer, at(12, 3))?;
    Ok(level)
}

fn boulder(
    world: &mut World,
    factory: &mut CreatureFactory,
    rng: &mut dyn RandomSource,
) -> Result<LevelId, ScenarioError> {
    let mut layout = Level::walled("boulder run", 16, 7);
    layout.set_furniture(Vec2::new(6, 2), Some(Furniture::new(FurnitureKind::Door)));
    layout.set_terrain(Vec2::new(6, 5), Terrain::Water);
    let level = world.add_level(layout);
    let at = |x, y| Position::new(level, Vec2::new(x, y));

    world.add_creature(factory.rolling_boulder(TribeId::Killer, Dir4::East), at(2, 2))?;
    let goblin =
        factory.from_kind_with_ai(CreatureKind::Goblin, TribeId::Greenskin, MonsterAi::Idle, rng);
    world.add_creature(goblin, at(5, 2))?;

    world.add_creature(factory.sokoban_boulder(TribeId::Peaceful), at(4, 5))?;
    let hero = world.add_creature(adventurer(), at(3, 5))?;
    for _ in 0..2 {
        let result = push_sokoban_boulder(world, hero, Dir4::East)?;
        log::info!("sokoban push: {:?}", result);
    }
    Ok(level)
}

fn illusion(
    world: &mut World,
    factory: &mut CreatureFactory,
    rng: &mut dyn RandomSource,
) -> Result<LevelId, ScenarioError> {
    let level = world.add_level(Level::walled("hall", 10, 10));
    let at = |x, y| Position::new(level, Vec2::new(x, y));
    let orc = factory.from_kind_with_ai(CreatureKind::Orc, TribeId::Greenskin, MonsterAi::Idle, rng);
    let double = factory.illusion(&orc, world.time(), rng);
    let ghost = factory.ghost(&orc);
    world.add_creature(orc, at(3, 3))?;
    world.add_creature(double, at(5, 5))?;
    world.add_creature(ghost, at(7, 7))?;
    Ok(level)
}

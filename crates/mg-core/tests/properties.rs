//! Invariants checked over generated worlds

use mg_core::controller::{BoulderController, Controller, KrakenController, MonsterAi};
use mg_core::creature::{Body, BodySize, CreatureAttributes, TribeId, ViewId};
use mg_core::object::{Item, ItemType};
use mg_core::{
    Creature, CreatureFactory, CreatureId, Dir4, GameRng, Level, LevelId, MAX_KRAKEN_LENGTH,
    Position, Rect, ScriptedRng, Vec2, World,
};
use proptest::prelude::*;

fn pos(x: i32, y: i32) -> Position {
    Position::new(LevelId(0), Vec2::new(x, y))
}

fn size_from(index: u8) -> BodySize {
    match index % 4 {
        0 => BodySize::Small,
        1 => BodySize::Medium,
        2 => BodySize::Large,
        _ => BodySize::Huge,
    }
}

fn bystander(size: BodySize) -> Creature {
    let mut attrs = CreatureAttributes::new(ViewId::Goblin, "goblin");
    attrs.body = Body::humanoid(size);
    Creature::new(TribeId::Greenskin, attrs, Controller::Monster(MonsterAi::Idle))
}

fn boulder_health(world: &World, id: CreatureId) -> Option<f64> {
    world
        .creature(id)
        .and_then(|c| c.controller())
        .and_then(|c| c.as_boulder())
        .map(BoulderController::health)
}

proptest! {
    #[test]
    fn property_boulder_health_never_rises(
        start in 0.05_f64..1.0,
        victims in prop::collection::vec((3_i32..37, 0_u8..4), 0..12),
    ) {
        let mut world = World::new();
        world.add_level(Level::walled("corridor", 40, 3));
        let mut boulder = CreatureFactory::new().rolling_boulder(TribeId::Killer, Dir4::East);
        boulder.controller = Some(Controller::Boulder(BoulderController::new(Dir4::East).with_health(start)));
        let id = world.add_creature(boulder, pos(1, 1)).unwrap();
        for (x, size) in victims {
            // Occupied cells are simply skipped
            let _ = world.add_creature(bystander(size_from(size)), pos(x, 1));
        }

        let mut rng = ScriptedRng::default();
        let mut last = start;
        for _ in 0..45 {
            world.tick(&mut rng);
            match boulder_health(&world, id) {
                Some(health) => {
                    prop_assert!(health <= last);
                    prop_assert!(health > 0.0);
                    last = health;
                }
                None => break,
            }
        }
        // Erosion alone wears any boulder down within five moves
        prop_assert!(!world.is_alive(id));
    }

    #[test]
    fn property_kraken_chain_stays_short(seed in 0_u64..5_000, start in 0_u32..=15) {
        let mut world = World::new();
        world.add_level(Level::walled("sea", 24, 24));
        let head = Creature::new(
            TribeId::Monster,
            CreatureFactory::kraken_attributes(ViewId::KrakenHead, "kraken"),
            Controller::Kraken(KrakenController::head().with_length(start)),
        );
        world.add_creature(head, pos(3, 12)).unwrap();
        world
            .add_creature(
                Creature::new(
                    TribeId::Player,
                    CreatureAttributes::new(ViewId::Player, "adventurer"),
                    Controller::Monster(MonsterAi::Idle),
                ),
                pos(11, 14),
            )
            .unwrap();

        let mut rng = GameRng::new(seed);
        for _ in 0..40 {
            world.tick(&mut rng);
            for creature in world.creatures() {
                if let Some(kraken) = creature.controller().and_then(|c| c.as_kraken()) {
                    prop_assert!(kraken.length() <= MAX_KRAKEN_LENGTH);
                }
            }
        }
    }

    #[test]
    fn property_debtor_iff_owing(ops in prop::collection::vec(0_u8..3, 1..40)) {
        let mut world = World::new();
        world.add_level(Level::walled("market", 20, 10));
        let mut factory = CreatureFactory::new();
        let mut rng = ScriptedRng::default();
        let keeper = world
            .add_creature(
                factory.shopkeeper(Rect::new(1, 1, 5, 5), TribeId::Peaceful, &mut rng),
                pos(1, 1),
            )
            .unwrap();
        world.place_items(
            pos(3, 3),
            vec![
                Item::new(ItemType::LeatherBoots),
                Item::new(ItemType::Knife),
                Item::new(ItemType::Potion(Default::default())),
            ],
        );
        let mut customer = Creature::new(
            TribeId::Player,
            CreatureAttributes::new(ViewId::Player, "adventurer"),
            Controller::Monster(MonsterAi::Idle),
        );
        for _ in 0..30 {
            customer.take(Item::new(ItemType::GoldPiece));
        }
        let customer = world.add_creature(customer, pos(3, 3)).unwrap();
        world.run_controller(keeper, &mut rng);

        for op in ops {
            let carried = world.creature(customer).unwrap().equipment.clone();
            match op {
                0 => {
                    let ids: Vec<_> = world.items_at(pos(3, 3)).iter().map(|i| i.id).collect();
                    world.pick_up(customer, &ids).unwrap();
                }
                1 => {
                    if let Some(item) = carried.iter().find(|i| !i.is_gold()) {
                        world.drop_items(customer, &[item.id]).unwrap();
                    }
                }
                _ => {
                    if let Some(coin) = carried.iter().find(|i| i.is_gold()) {
                        world.give_items(customer, keeper, &[coin.id]).unwrap();
                    }
                }
            }
            let owed = world.creature(customer).unwrap().debt.amount_owed(keeper);
            let is_debtor = world
                .creature(keeper)
                .and_then(|c| c.controller())
                .and_then(|c| c.as_shopkeeper())
                .is_some_and(|s| s.is_debtor(customer));
            prop_assert_eq!(is_debtor, owed > 0);
        }
    }
}

//! Shopkeeper: tags stock, bills customers who walk off with it, and turns
//! long-absent debtors into thieves.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::consts::{SHOP_SEARCH_RADIUS, THIEF_NAG_LIMIT};
use crate::creature::CreatureId;
use crate::events::GameEvent;
use crate::geom::{LevelId, Position, Rect};
use crate::object::{Item, ItemId};
use crate::rng::RandomSource;
use crate::world::World;

use super::{AiAction, MonsterAi};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopkeeperController {
    shop_area: Rect,
    /// Level the shop is on, recorded on the first move
    level: Option<LevelId>,
    first_move: bool,
    /// Customers inside the shop last turn
    prev_creatures: BTreeSet<CreatureId>,
    debtors: BTreeSet<CreatureId>,
    /// Nags sent to absent debtors
    thief_count: BTreeMap<CreatureId, u32>,
    thieves: BTreeSet<CreatureId>,
}

impl ShopkeeperController {
    pub fn new(shop_area: Rect) -> Self {
        Self {
            shop_area,
            level: None,
            first_move: true,
            prev_creatures: BTreeSet::new(),
            debtors: BTreeSet::new(),
            thief_count: BTreeMap::new(),
            thieves: BTreeSet::new(),
        }
    }

    pub fn shop_area(&self) -> Rect {
        self.shop_area
    }

    pub fn is_debtor(&self, id: CreatureId) -> bool {
        self.debtors.contains(&id)
    }

    pub fn is_thief(&self, id: CreatureId) -> bool {
        self.thieves.contains(&id)
    }

    pub fn debtors(&self) -> impl Iterator<Item = CreatureId> + '_ {
        self.debtors.iter().copied()
    }

    pub fn nag_count(&self, id: CreatureId) -> u32 {
        self.thief_count.get(&id).copied().unwrap_or(0)
    }

    fn in_shop(&self, pos: Position) -> bool {
        self.level == Some(pos.level) && self.shop_area.contains(pos.coord)
    }

    fn add_debtor(&mut self, id: CreatureId) {
        if self.debtors.insert(id) {
            self.thief_count.remove(&id);
        }
    }

    pub fn make_move(
        &mut self,
        me: CreatureId,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> AiAction {
        let Some(my_pos) = world.creature(me).filter(|c| !c.dead).map(|c| c.position) else {
            return AiAction::None;
        };
        if self.first_move {
            self.first_move = false;
            self.open_shop(me, my_pos.level, world);
        }
        let ai = MonsterAi::StayInLocation(self.shop_area);
        if self.level != Some(my_pos.level) {
            return ai.make_move(me, world, rng);
        }

        let present: BTreeSet<CreatureId> = self
            .shop_area
            .iter()
            .filter_map(|v| world.creature_at(Position::new(my_pos.level, v)))
            .filter(|id| *id != me)
            .collect();

        for &customer in present.difference(&self.prev_creatures) {
            if self.thieves.contains(&customer) || world.is_enemy(me, customer) {
                continue;
            }
            if self.debtors.contains(&customer) {
                world.second_person(customer, "\"Pay your debt or... !\"");
                self.thief_count.remove(&customer);
            } else {
                let greeting = world
                    .creature(me)
                    .map(|c| format!("\"Welcome to {}'s shop!\"", c.name().first_or_bare()))
                    .unwrap_or_default();
                world.private_message(customer, greeting);
            }
        }

        let absent: Vec<CreatureId> = self
            .debtors
            .iter()
            .copied()
            .filter(|d| !present.contains(d))
            .collect();
        for debtor in absent {
            let Some(debtor_pos) = world
                .creature(debtor)
                .filter(|c| !c.dead)
                .map(|c| c.position)
            else {
                continue;
            };
            if !my_pos
                .dist8(&debtor_pos)
                .is_some_and(|d| d <= SHOP_SEARCH_RADIUS)
            {
                continue;
            }
            let owed = world
                .creature(debtor)
                .map(|c| c.debt.amount_owed(me))
                .unwrap_or(0);
            world.private_message(debtor, format!("\"Come back, you owe me {} gold!\"", owed));
            let count = self.thief_count.entry(debtor).or_insert(0);
            *count += 1;
            if *count >= THIEF_NAG_LIMIT {
                self.mark_thief(me, debtor, debtor_pos, world);
            }
        }

        self.prev_creatures = present;
        ai.make_move(me, world, rng)
    }

    fn open_shop(&mut self, me: CreatureId, level: LevelId, world: &mut World) {
        self.level = Some(level);
        world.subscribe(level, me);
        let mut tagged = 0;
        for v in self.shop_area.iter() {
            let pos = Position::new(level, v);
            let ids: Vec<ItemId> = world.items_at(pos).iter().map(|i| i.id).collect();
            tagged += ids.len();
            world.tag_items_at(pos, &ids, Some(me));
            if let Some(cell) = world.cell_mut(pos) {
                cell.for_sale = false;
            }
        }
        log::debug!("shopkeeper {:?} opens shop with {} items", me, tagged);
    }

    fn mark_thief(&mut self, me: CreatureId, thief: CreatureId, pos: Position, world: &mut World) {
        log::info!("shopkeeper {:?} declares {:?} a thief", me, thief);
        world.global_message(pos, "\"Thief! Thief!\"");
        if let Some(tribe) = world.creature(me).map(|c| c.tribe) {
            world.tribes_mut().on_items_stolen(tribe, thief);
        }
        self.thief_count.remove(&thief);
        self.debtors.remove(&thief);
        self.thieves.insert(thief);
        if let Some(creature) = world.creature_mut(thief) {
            creature.debt.clear(me);
            for item in creature.equipment.iter_mut() {
                item.set_shopkeeper(None);
            }
        }
    }

    pub fn on_event(&mut self, me: CreatureId, event: &GameEvent, world: &mut World) {
        if !self.in_shop(event.position()) {
            return;
        }
        match event {
            GameEvent::ItemsAppeared { position, items } => {
                let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
                world.tag_items_at(*position, &ids, Some(me));
                if let Some(cell) = world.cell_mut(*position) {
                    cell.for_sale = false;
                }
            }
            GameEvent::ItemsPickedUp {
                creature, items, ..
            } => {
                let owned: Vec<&Item> = items.iter().filter(|i| i.is_shopkeeper(me)).collect();
                if owned.is_empty() {
                    return;
                }
                if self.thieves.contains(creature) {
                    if let Some(thief) = world.creature_mut(*creature) {
                        for item in thief
                            .equipment
                            .iter_mut()
                            .filter(|i| owned.iter().any(|o| o.id == i.id))
                        {
                            item.set_shopkeeper(None);
                        }
                    }
                    return;
                }
                let price: u32 = owned.iter().map(|i| i.price).sum();
                if let Some(customer) = world.creature_mut(*creature) {
                    customer.debt.add(me, i64::from(price));
                }
                self.add_debtor(*creature);
            }
            GameEvent::ItemsDropped {
                creature, items, ..
            } => {
                let price: u32 = items
                    .iter()
                    .filter(|i| i.is_shopkeeper(me))
                    .map(|i| i.price)
                    .sum();
                if price == 0 {
                    return;
                }
                let owed = match world.creature_mut(*creature) {
                    Some(customer) => {
                        customer.debt.add(me, -i64::from(price));
                        customer.debt.amount_owed(me)
                    }
                    None => return,
                };
                if owed == 0 {
                    self.debtors.remove(creature);
                }
            }
            GameEvent::CreatureKilled { .. } | GameEvent::FurnitureDestroyed { .. } => {}
        }
    }

    /// Gold handed over pays one unit of debt per piece
    pub fn on_items_given(
        &mut self,
        me: CreatureId,
        items: &[Item],
        from: CreatureId,
        world: &mut World,
    ) {
        let gold = items.iter().filter(|i| i.is_gold()).count() as i64;
        if gold == 0 {
            return;
        }
        let owed = match world.creature_mut(from) {
            Some(customer) => {
                customer.debt.add(me, -gold);
                customer.debt.amount_owed(me)
            }
            None => return,
        };
        log::debug!("{:?} pays {} gold, owes {}", from, gold, owed);
        if owed == 0 {
            self.debtors.remove(&from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::creature::{Creature, CreatureAttributes, TribeId, ViewId};
    use crate::geom::Vec2;
    use crate::object::ItemType;
    use crate::rng::ScriptedRng;
    use crate::world::{DropType, Level};

    struct Shop {
        world: World,
        keeper: CreatureId,
        customer: CreatureId,
    }

    fn pos(x: i32, y: i32) -> Position {
        Position::new(LevelId(0), Vec2::new(x, y))
    }

    /// A 20x10 room with the shop in its left corner
    fn setup() -> Shop {
        let mut world = World::new();
        world.add_level(Level::walled("market", 20, 10));
        let mut attributes = CreatureAttributes::new(ViewId::Shopkeeper, "shopkeeper");
        attributes.name.set_first("Ulrich");
        let keeper = world
            .add_creature(
                Creature::new(
                    TribeId::Peaceful,
                    attributes,
                    Controller::Shopkeeper(ShopkeeperController::new(Rect::new(1, 1, 5, 5))),
                ),
                pos(1, 1),
            )
            .unwrap();
        let customer = world
            .add_creature(
                Creature::new(
                    TribeId::Player,
                    CreatureAttributes::new(ViewId::Player, "adventurer"),
                    Controller::Monster(MonsterAi::Idle),
                ),
                pos(10, 3),
            )
            .unwrap();
        Shop {
            world,
            keeper,
            customer,
        }
    }

    fn state(shop: &Shop) -> ShopkeeperController {
        shop.world
            .creature(shop.keeper)
            .and_then(|c| c.controller())
            .and_then(|c| c.as_shopkeeper())
            .cloned()
            .unwrap()
    }

    fn owed(shop: &Shop) -> u32 {
        shop.world
            .creature(shop.customer)
            .map(|c| c.debt.amount_owed(shop.keeper))
            .unwrap()
    }

    fn keeper_turn(shop: &mut Shop) {
        let mut rng = ScriptedRng::default();
        shop.world.run_controller(shop.keeper, &mut rng);
    }

    fn walk(shop: &mut Shop, x: i32, y: i32) {
        shop.world.move_creature(shop.customer, pos(x, y)).unwrap();
    }

    // ========================================================================
    // Stock and debt
    // ========================================================================

    #[test]
    fn test_first_move_tags_stock() {
        let mut shop = setup();
        shop.world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword)]);
        if let Some(cell) = shop.world.cell_mut(pos(3, 3)) {
            cell.for_sale = true;
        }
        keeper_turn(&mut shop);
        assert!(shop.world.items_at(pos(3, 3))[0].is_shopkeeper(shop.keeper));
        assert!(!shop.world.cell(pos(3, 3)).unwrap().for_sale);
        assert!(shop.world.events().is_subscribed(LevelId(0), shop.keeper));
    }

    #[test]
    fn test_pickup_then_drop_clears_debt() {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(10)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);

        shop.world.pick_up(shop.customer, &ids).unwrap();
        assert_eq!(owed(&shop), 10);
        assert!(state(&shop).is_debtor(shop.customer));

        shop.world.drop_items(shop.customer, &ids).unwrap();
        assert_eq!(owed(&shop), 0);
        assert!(!state(&shop).is_debtor(shop.customer));
        // back on the shelf and still for sale
        assert!(shop.world.items_at(pos(3, 3))[0].is_shopkeeper(shop.keeper));
    }

    #[test]
    fn test_items_outside_shop_are_free() {
        let mut shop = setup();
        keeper_turn(&mut shop);
        let ids = shop.world.place_items(pos(10, 3), vec![Item::new(ItemType::Club)]);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        assert_eq!(owed(&shop), 0);
        assert!(!state(&shop).is_debtor(shop.customer));
    }

    /// Customer picks up `price` worth of stock, then collects `gold` pieces outside
    fn indebted_with_gold(price: u32, gold: usize) -> (Shop, Vec<ItemId>) {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(price)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        walk(&mut shop, 12, 3);
        let coins = shop
            .world
            .place_items(pos(12, 3), vec![Item::new(ItemType::GoldPiece); gold]);
        shop.world.pick_up(shop.customer, &coins).unwrap();
        (shop, coins)
    }

    #[test]
    fn test_partial_payment() {
        let (mut shop, coins) = indebted_with_gold(5, 2);
        assert_eq!(owed(&shop), 5);
        shop.world.give_items(shop.customer, shop.keeper, &coins).unwrap();
        assert_eq!(owed(&shop), 3);
        assert!(state(&shop).is_debtor(shop.customer));
    }

    #[test]
    fn test_payment_clears_debtor() {
        let (mut shop, coins) = indebted_with_gold(1, 2);
        shop.world.give_items(shop.customer, shop.keeper, &coins).unwrap();
        assert_eq!(owed(&shop), 0);
        assert!(!state(&shop).is_debtor(shop.customer));
    }

    // ========================================================================
    // Greetings and thieves
    // ========================================================================

    #[test]
    fn test_greets_new_customer_once() {
        let mut shop = setup();
        keeper_turn(&mut shop);
        walk(&mut shop, 4, 3);
        keeper_turn(&mut shop);
        keeper_turn(&mut shop);
        let greetings = shop
            .world
            .messages()
            .for_creature(shop.customer)
            .filter(|m| m.text == "\"Welcome to Ulrich's shop!\"")
            .count();
        assert_eq!(greetings, 1);
    }

    #[test]
    fn test_absent_debtor_becomes_thief() {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(10)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        walk(&mut shop, 8, 3);
        let mut other_stock = Item::new(ItemType::Torch);
        other_stock.set_shopkeeper(Some(CreatureId(99)));
        if let Some(customer) = shop.world.creature_mut(shop.customer) {
            customer.take(other_stock);
        }

        for n in 1..THIEF_NAG_LIMIT {
            keeper_turn(&mut shop);
            assert_eq!(state(&shop).nag_count(shop.customer), n);
            assert!(!state(&shop).is_thief(shop.customer));
        }
        assert!(shop.world.messages().contains("\"Come back, you owe me 10 gold!\""));

        keeper_turn(&mut shop);
        let keeper = state(&shop);
        assert!(keeper.is_thief(shop.customer));
        assert!(!keeper.is_debtor(shop.customer));
        assert_eq!(owed(&shop), 0);
        assert!(shop.world.messages().contains("\"Thief! Thief!\""));
        assert!(shop.world.is_enemy(shop.keeper, shop.customer));
        let equipment = shop
            .world
            .creature(shop.customer)
            .map(|c| c.equipment.clone())
            .unwrap();
        assert_eq!(equipment.len(), 2);
        assert!(equipment.iter().all(|i| i.shopkeeper.is_none()));
    }

    /// Customer walks off with stock and is nagged until declared a thief
    fn thief() -> Shop {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(10)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        walk(&mut shop, 8, 3);
        for _ in 0..THIEF_NAG_LIMIT {
            keeper_turn(&mut shop);
        }
        assert!(state(&shop).is_thief(shop.customer));
        shop
    }

    fn free_shop_cell(shop: &Shop) -> Position {
        state(shop)
            .shop_area()
            .iter()
            .map(|v| Position::new(LevelId(0), v))
            .find(|p| shop.world.creature_at(*p).is_none())
            .unwrap()
    }

    #[test]
    fn test_thief_takes_more_stock_unbilled() {
        let mut shop = thief();
        let spot = free_shop_cell(&shop);
        let ids = shop
            .world
            .place_items(spot, vec![Item::new(ItemType::LeatherBoots)]);
        assert!(shop.world.items_at(spot)[0].is_shopkeeper(shop.keeper));

        walk(&mut shop, spot.coord.x, spot.coord.y);
        shop.world.pick_up(shop.customer, &ids).unwrap();

        let keeper = state(&shop);
        assert!(keeper.is_thief(shop.customer));
        assert!(!keeper.is_debtor(shop.customer));
        assert_eq!(owed(&shop), 0);
        let boots = shop
            .world
            .creature(shop.customer)
            .and_then(|c| c.equipment.iter().find(|i| i.id == ids[0]).cloned())
            .unwrap();
        assert_eq!(boots.shopkeeper, None);
    }

    #[test]
    fn test_returning_thief_is_not_greeted() {
        let mut shop = thief();
        let spot = free_shop_cell(&shop);
        walk(&mut shop, spot.coord.x, spot.coord.y);
        keeper_turn(&mut shop);

        let to_customer: Vec<String> = shop
            .world
            .messages()
            .for_creature(shop.customer)
            .map(|m| m.text.clone())
            .collect();
        assert!(!to_customer.iter().any(|t| t.starts_with("\"Welcome")));
        assert!(!to_customer.iter().any(|t| t == "\"Pay your debt or... !\""));
        let keeper = state(&shop);
        assert!(keeper.is_thief(shop.customer));
        assert!(!keeper.is_debtor(shop.customer));
        assert_eq!(keeper.nag_count(shop.customer), 0);
    }

    #[test]
    fn test_off_level_keeper_only_wanders() {
        let mut shop = setup();
        keeper_turn(&mut shop);
        let cellar = shop.world.add_level(Level::walled("cellar", 20, 10));
        shop.world
            .move_creature(shop.keeper, Position::new(cellar, Vec2::new(1, 1)))
            .unwrap();
        shop.world
            .move_creature(shop.customer, Position::new(cellar, Vec2::new(3, 3)))
            .unwrap();

        let mut rng = ScriptedRng::default();
        let action = shop.world.run_controller(shop.keeper, &mut rng);
        assert_eq!(action, AiAction::Waited);
        assert_eq!(shop.world.messages().for_creature(shop.customer).count(), 0);

        let ids = shop.world.place_items(
            Position::new(cellar, Vec2::new(3, 3)),
            vec![Item::new(ItemType::Sword)],
        );
        shop.world.pick_up(shop.customer, &ids).unwrap();
        assert_eq!(owed(&shop), 0);
        assert!(!state(&shop).is_debtor(shop.customer));
        assert!(!shop.world.events().is_subscribed(cellar, shop.keeper));
    }

    #[test]
    fn test_returning_debtor_is_warned_and_reset() {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(10)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        walk(&mut shop, 8, 3);
        keeper_turn(&mut shop);
        keeper_turn(&mut shop);
        assert_eq!(state(&shop).nag_count(shop.customer), 2);

        walk(&mut shop, 4, 3);
        keeper_turn(&mut shop);
        assert_eq!(state(&shop).nag_count(shop.customer), 0);
        assert!(shop.world.messages().contains("\"Pay your debt or... !\""));
        assert!(state(&shop).is_debtor(shop.customer));
    }

    #[test]
    fn test_dead_debtor_is_not_nagged() {
        let mut shop = setup();
        let ids = shop
            .world
            .place_items(pos(3, 3), vec![Item::new(ItemType::Sword).with_price(10)]);
        keeper_turn(&mut shop);
        walk(&mut shop, 3, 3);
        shop.world.pick_up(shop.customer, &ids).unwrap();
        shop.world.kill(shop.customer, None, DropType::Nothing);
        keeper_turn(&mut shop);
        assert_eq!(state(&shop).nag_count(shop.customer), 0);
    }
}

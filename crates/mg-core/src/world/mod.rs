//! The world: levels, the creature arena, time, messages and events
//!
//! Controllers never hold references into the world. They receive the
//! [`World`] and their own [`CreatureId`] on every call and go through the
//! operations below. A creature that cannot be found, or is flagged dead,
//! is treated as already gone.

mod errors;
mod furniture;
mod level;
mod messages;
mod terrain;
mod time;
mod turn;

pub use errors::{ConfigError, FactoryError, WorldError};
pub use furniture::{DestroyAction, Furniture, FurnitureKind};
pub use level::{Cell, Level};
pub use messages::{Message, MessageKind, MessageLog, MsgType, capitalize};
pub use terrain::{MovementTraits, Terrain};
pub use time::GameTime;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VISION_RADIUS;
use crate::controller::Controller;
use crate::creature::{Creature, CreatureId, LastingEffects, Tribes};
use crate::events::{EventBus, GameEvent};
use crate::geom::{LevelId, Position, Vec2};
use crate::object::{Item, ItemId};

/// What a dying creature leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DropType {
    #[default]
    Everything,
    Nothing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    levels: Vec<Level>,
    /// Arena keyed by id; ids are handed out in increasing order, so
    /// iteration follows creation order
    creatures: BTreeMap<CreatureId, Creature>,
    next_creature: CreatureId,
    next_item: ItemId,
    time: GameTime,
    messages: MessageLog,
    events: EventBus,
    tribes: Tribes,
    /// Death hooks for creatures that died while their controller was running
    #[serde(skip)]
    pending_deaths: Vec<(CreatureId, Option<CreatureId>)>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            creatures: BTreeMap::new(),
            next_creature: CreatureId::NONE.next(),
            next_item: ItemId::NONE.next(),
            time: GameTime::default(),
            messages: MessageLog::default(),
            events: EventBus::new(),
            tribes: Tribes::new(),
            pending_deaths: Vec::new(),
        }
    }

    pub fn with_message_limit(limit: usize) -> Self {
        Self {
            messages: MessageLog::new(limit),
            ..Self::new()
        }
    }

    // ========================================================================
    // Levels
    // ========================================================================

    pub fn add_level(&mut self, mut level: Level) -> LevelId {
        let id = LevelId(self.levels.len() as u32);
        level.id = id;
        self.levels.push(level);
        id
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.0 as usize)
    }

    pub fn level_mut(&mut self, id: LevelId) -> Option<&mut Level> {
        self.levels.get_mut(id.0 as usize)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.level(pos.level).and_then(|l| l.cell(pos.coord))
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.level_mut(pos.level).and_then(|l| l.cell_mut(pos.coord))
    }

    pub fn furniture_at(&self, pos: Position) -> Option<Furniture> {
        self.cell(pos).and_then(|c| c.furniture)
    }

    /// Name of whatever occupies a position, for crash messages
    pub fn position_name(&self, pos: Position) -> String {
        self.cell(pos)
            .map(Cell::name)
            .unwrap_or_else(|| "wall".to_string())
    }

    /// Remove furniture and announce it
    pub fn destroy_furniture(&mut self, pos: Position, action: DestroyAction) {
        let Some(cell) = self.cell_mut(pos) else {
            return;
        };
        if let Some(furniture) = cell.furniture.take() {
            log::debug!("{} at {:?} destroyed by {}", furniture.name(), pos.coord, action);
            self.global_message(pos, format!("The {} is destroyed", furniture.name()));
            self.publish(GameEvent::FurnitureDestroyed {
                position: pos,
                action,
            });
        }
    }

    // ========================================================================
    // Time, messages, tribes, events
    // ========================================================================

    pub fn time(&self) -> GameTime {
        self.time
    }

    pub fn set_time(&mut self, time: GameTime) {
        self.time = time;
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    pub fn tribes(&self) -> &Tribes {
        &self.tribes
    }

    pub fn tribes_mut(&mut self) -> &mut Tribes {
        &mut self.tribes
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&mut self, level: LevelId, listener: CreatureId) {
        self.events.subscribe(level, listener);
    }

    pub fn unsubscribe(&mut self, level: LevelId, listener: CreatureId) {
        self.events.unsubscribe(level, listener);
    }

    fn log_message(
        &mut self,
        kind: MessageKind,
        text: String,
        recipient: Option<CreatureId>,
        position: Option<Position>,
    ) {
        let time = self.time;
        self.messages.push(Message {
            kind,
            text,
            recipient,
            position,
            time,
        });
    }

    /// Message for everyone who can see `pos`
    pub fn global_message(&mut self, pos: Position, text: impl Into<String>) {
        self.log_message(MessageKind::Global, capitalize(&text.into()), None, Some(pos));
    }

    /// Message for everyone near `pos` who cannot see it
    pub fn unseen_message(&mut self, pos: Position, text: impl Into<String>) {
        self.log_message(MessageKind::Unseen, text.into(), None, Some(pos));
    }

    /// "You ..." message addressed to one creature
    pub fn second_person(&mut self, id: CreatureId, text: impl Into<String>) {
        let pos = self.creature(id).map(|c| c.position);
        self.log_message(MessageKind::SecondPerson, text.into(), Some(id), pos);
    }

    /// Message only `id` gets to read
    pub fn private_message(&mut self, id: CreatureId, text: impl Into<String>) {
        let pos = self.creature(id).map(|c| c.position);
        self.log_message(MessageKind::Private, text.into(), Some(id), pos);
    }

    /// Message about `id` that onlookers see, e.g. "The illusion disappears."
    pub fn creature_message(&mut self, id: CreatureId, text: impl Into<String>) {
        if let Some(pos) = self.creature(id).map(|c| c.position) {
            self.global_message(pos, text);
        }
    }

    /// Templated message to `id` plus the matching third-person message
    pub fn you(&mut self, id: CreatureId, kind: MsgType, param: &str) {
        let Some((the, pos)) = self.creature(id).map(|c| (c.the(), c.position)) else {
            return;
        };
        self.second_person(id, kind.second_person(param));
        self.log_message(
            MessageKind::Global,
            kind.third_person(&the, param),
            None,
            Some(pos),
        );
    }

    /// Deliver an event to every living listener on its level.
    ///
    /// A listener whose controller is currently running is skipped.
    pub fn publish(&mut self, event: GameEvent) {
        let listeners = self.events.listeners(event.level()).to_vec();
        for listener in listeners {
            if !self.is_alive(listener) {
                continue;
            }
            let Some(mut controller) = self.take_controller(listener) else {
                log::trace!("listener {:?} busy, skipping {:?}", listener, event);
                continue;
            };
            controller.on_event(listener, &event, self);
            self.restore_controller(listener, controller);
        }
    }

    // ========================================================================
    // Creatures
    // ========================================================================

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn is_alive(&self, id: CreatureId) -> bool {
        self.creature(id).is_some_and(|c| !c.dead)
    }

    /// Ids of all living creatures, in arena order
    pub fn living_ids(&self) -> Vec<CreatureId> {
        self.creatures
            .values()
            .filter(|c| !c.dead)
            .map(|c| c.id)
            .collect()
    }

    pub fn creature_at(&self, pos: Position) -> Option<CreatureId> {
        self.level(pos.level).and_then(|l| l.creature_at(pos.coord))
    }

    /// Place a new creature and hand it an id
    pub fn add_creature(
        &mut self,
        mut creature: Creature,
        pos: Position,
    ) -> Result<CreatureId, WorldError> {
        let level = self
            .level(pos.level)
            .ok_or(WorldError::UnknownLevel(pos.level))?;
        let cell = level.cell(pos.coord).ok_or(WorldError::OutOfBounds(pos))?;
        if cell.creature.is_some() {
            return Err(WorldError::Occupied(pos));
        }

        let id = self.next_creature;
        self.next_creature = id.next();
        creature.id = id;
        creature.position = pos;
        creature.dead = false;
        for item in creature.equipment.iter_mut() {
            if item.id == ItemId::NONE {
                item.id = self.next_item;
                self.next_item = self.next_item.next();
            }
        }
        if let Some(cell) = self.cell_mut(pos) {
            cell.creature = Some(id);
        }
        log::debug!("{} {:?} appears at {:?}", creature.the(), id, pos.coord);
        self.creatures.insert(id, creature);
        Ok(id)
    }

    /// Swap the controller of a creature
    pub fn set_controller(&mut self, id: CreatureId, controller: Controller) -> Result<(), WorldError> {
        let creature = self
            .creature_mut(id)
            .ok_or(WorldError::UnknownCreature(id))?;
        creature.controller = Some(controller);
        Ok(())
    }

    pub(crate) fn take_controller(&mut self, id: CreatureId) -> Option<Controller> {
        self.creature_mut(id).and_then(|c| c.controller.take())
    }

    /// Put a controller back and run any death hook that waited for it
    pub(crate) fn restore_controller(&mut self, id: CreatureId, controller: Controller) {
        if let Some(creature) = self.creature_mut(id) {
            creature.controller = Some(controller);
        }
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_deaths)
            .into_iter()
            .partition(|(dead, _)| *dead == id);
        self.pending_deaths = waiting;
        for (dead, attacker) in ready {
            self.run_death_hook(dead, attacker);
        }
    }

    fn run_death_hook(&mut self, id: CreatureId, attacker: Option<CreatureId>) {
        match self.take_controller(id) {
            Some(mut controller) => {
                controller.on_killed(id, attacker, self);
                if let Some(creature) = self.creature_mut(id) {
                    creature.controller = Some(controller);
                }
            }
            None => self.pending_deaths.push((id, attacker)),
        }
    }

    /// Kill a creature. Its controller's death hook runs now, or as soon as
    /// the controller is no longer executing.
    pub fn kill(&mut self, id: CreatureId, attacker: Option<CreatureId>, drop: DropType) {
        let Some(creature) = self.creature_mut(id) else {
            return;
        };
        if creature.dead {
            return;
        }
        creature.dead = true;
        creature.held_by = None;
        let position = creature.position;
        let dropped = match drop {
            DropType::Everything => std::mem::take(&mut creature.equipment),
            DropType::Nothing => Vec::new(),
        };
        log::debug!("{} {:?} dies (attacker {:?})", creature.the(), id, attacker);

        if let Some(cell) = self.cell_mut(position) {
            if cell.creature == Some(id) {
                cell.creature = None;
            }
        }
        for other in self.creatures.values_mut() {
            if other.held_by == Some(id) {
                other.held_by = None;
            }
        }

        self.run_death_hook(id, attacker);

        if !dropped.is_empty() {
            self.place_items(position, dropped);
        }
        self.publish(GameEvent::CreatureKilled {
            victim: id,
            attacker,
            position,
        });
    }

    /// Drop dead creatures from the arena and the event bus
    pub fn remove_dead(&mut self) -> usize {
        let dead: Vec<CreatureId> = self
            .creatures
            .values()
            .filter(|c| c.dead)
            .map(|c| c.id)
            .collect();
        for id in &dead {
            self.events.unsubscribe_all(*id);
        }
        self.creatures.retain(|_, c| !c.dead);
        dead.len()
    }

    // ========================================================================
    // Movement
    // ========================================================================

    fn cell_accepts(&self, pos: Position, traits: MovementTraits, ignore_creatures: bool) -> bool {
        self.cell(pos).is_some_and(|cell| {
            cell.terrain.allows(traits)
                && !cell.blocks_movement()
                && (ignore_creatures || cell.creature.is_none())
        })
    }

    /// Whether something moving with any of `traits` could step into an empty `pos`
    pub fn can_enter_with(&self, pos: Position, traits: MovementTraits) -> bool {
        self.cell_accepts(pos, traits, false)
    }

    /// Whether `id` could step into `pos` right now
    pub fn can_enter(&self, id: CreatureId, pos: Position) -> bool {
        self.creature(id)
            .is_some_and(|c| self.cell_accepts(pos, c.movement_traits(), false))
    }

    /// Whether `id` could step into `pos` if nobody stood there
    pub fn can_enter_empty(&self, id: CreatureId, pos: Position) -> bool {
        self.creature(id)
            .is_some_and(|c| self.cell_accepts(pos, c.movement_traits(), true))
    }

    fn relocate(&mut self, id: CreatureId, from: Position, to: Position) {
        if let Some(cell) = self.cell_mut(from) {
            if cell.creature == Some(id) {
                cell.creature = None;
            }
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.creature = Some(id);
        }
        if let Some(creature) = self.creature_mut(id) {
            creature.position = to;
        }
    }

    fn living(&self, id: CreatureId) -> Result<&Creature, WorldError> {
        let creature = self.creature(id).ok_or(WorldError::UnknownCreature(id))?;
        if creature.dead {
            return Err(WorldError::Dead(id));
        }
        Ok(creature)
    }

    /// Step a creature into `to`. Held creatures cannot move.
    pub fn move_creature(&mut self, id: CreatureId, to: Position) -> Result<(), WorldError> {
        let creature = self.living(id)?;
        let from = creature.position;
        if let Some(holder) = creature.held_by {
            if self.is_alive(holder) {
                return Err(WorldError::Held {
                    creature: id,
                    holder,
                });
            }
        }
        if self.cell(to).is_none() {
            return Err(WorldError::OutOfBounds(to));
        }
        if self.creature_at(to).is_some() {
            return Err(WorldError::Occupied(to));
        }
        if !self.can_enter(id, to) {
            return Err(WorldError::Blocked(to));
        }
        self.relocate(id, from, to);
        Ok(())
    }

    /// Trade places with another creature
    pub fn swap_position(&mut self, id: CreatureId, other: CreatureId) -> Result<(), WorldError> {
        let a = self.living(id)?.position;
        let b = self.living(other)?.position;
        if let Some(cell) = self.cell_mut(a) {
            cell.creature = Some(other);
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.creature = Some(id);
        }
        if let Some(c) = self.creature_mut(id) {
            c.position = b;
        }
        if let Some(c) = self.creature_mut(other) {
            c.position = a;
        }
        Ok(())
    }

    /// Shove a creature one step, ignoring any grip on it. Fails silently.
    pub fn displace(&mut self, id: CreatureId, dir: Vec2) -> bool {
        let Ok(creature) = self.living(id) else {
            return false;
        };
        let from = creature.position;
        let to = from.plus(dir);
        if !self.can_enter(id, to) {
            return false;
        }
        self.relocate(id, from, to);
        true
    }

    pub fn set_held(&mut self, id: CreatureId, holder: Option<CreatureId>) {
        if let Some(creature) = self.creature_mut(id) {
            creature.held_by = holder;
        }
    }

    pub fn holder_of(&self, id: CreatureId) -> Option<CreatureId> {
        self.creature(id)
            .and_then(|c| c.held_by)
            .filter(|h| self.is_alive(*h))
    }

    /// Whether `viewer` can see `pos`
    pub fn can_see(&self, viewer: CreatureId, pos: Position) -> bool {
        let Some(creature) = self.creature(viewer) else {
            return false;
        };
        if creature.dead || creature.attributes.has(LastingEffects::BLIND) {
            return false;
        }
        match creature.position.dist8(&pos) {
            Some(d) if d <= DEFAULT_VISION_RADIUS => self
                .level(pos.level)
                .is_some_and(|l| l.has_line_of_sight(creature.position.coord, pos.coord)),
            _ => false,
        }
    }

    pub fn can_see_creature(&self, viewer: CreatureId, target: CreatureId) -> bool {
        self.creature(target)
            .is_some_and(|t| !t.dead && self.can_see(viewer, t.position))
    }

    pub fn is_enemy(&self, a: CreatureId, b: CreatureId) -> bool {
        match (self.creature(a), self.creature(b)) {
            (Some(ca), Some(cb)) => self.tribes.is_enemy(a, ca.tribe, b, cb.tribe),
            _ => false,
        }
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn register_items(&mut self, items: &mut [Item]) {
        for item in items.iter_mut() {
            if item.id == ItemId::NONE {
                item.id = self.next_item;
                self.next_item = self.next_item.next();
            }
        }
    }

    pub fn items_at(&self, pos: Position) -> &[Item] {
        self.cell(pos).map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    /// Put items on the floor and announce them
    pub fn place_items(&mut self, pos: Position, mut items: Vec<Item>) -> Vec<ItemId> {
        self.register_items(&mut items);
        let ids = items.iter().map(|i| i.id).collect();
        let Some(cell) = self.cell_mut(pos) else {
            log::warn!("items placed outside the map at {:?}", pos);
            return Vec::new();
        };
        cell.items.extend(items.iter().cloned());
        self.publish(GameEvent::ItemsAppeared {
            position: pos,
            items,
        });
        ids
    }

    /// Set or clear the shop tag on items lying at `pos`
    pub fn tag_items_at(&mut self, pos: Position, ids: &[ItemId], shopkeeper: Option<CreatureId>) {
        if let Some(cell) = self.cell_mut(pos) {
            for item in cell.items.iter_mut().filter(|i| ids.contains(&i.id)) {
                item.set_shopkeeper(shopkeeper);
            }
        }
    }

    /// Pick up items from the cell the creature stands on
    pub fn pick_up(&mut self, id: CreatureId, ids: &[ItemId]) -> Result<(), WorldError> {
        let pos = self.living(id)?.position;
        let cell = self.cell_mut(pos).ok_or(WorldError::OutOfBounds(pos))?;
        if let Some(missing) = ids.iter().find(|i| !cell.items.iter().any(|it| it.id == **i)) {
            return Err(WorldError::UnknownItem(*missing));
        }
        let (taken, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut cell.items)
            .into_iter()
            .partition(|it| ids.contains(&it.id));
        cell.items = kept;
        if let Some(creature) = self.creature_mut(id) {
            creature.equipment.extend(taken.iter().cloned());
        }
        self.publish(GameEvent::ItemsPickedUp {
            creature: id,
            position: pos,
            items: taken,
        });
        Ok(())
    }

    /// Drop carried items onto the cell the creature stands on
    pub fn drop_items(&mut self, id: CreatureId, ids: &[ItemId]) -> Result<(), WorldError> {
        let creature = self.living(id)?;
        let pos = creature.position;
        if let Some(missing) = ids
            .iter()
            .find(|i| !creature.equipment.iter().any(|it| it.id == **i))
        {
            return Err(WorldError::UnknownItem(*missing));
        }
        let dropped = self.take_equipment(id, ids);
        self.publish(GameEvent::ItemsDropped {
            creature: id,
            position: pos,
            items: dropped.clone(),
        });
        self.place_items(pos, dropped);
        Ok(())
    }

    /// Hand items from one creature to another
    pub fn give_items(
        &mut self,
        from: CreatureId,
        to: CreatureId,
        ids: &[ItemId],
    ) -> Result<(), WorldError> {
        let giver = self.living(from)?;
        if let Some(missing) = ids
            .iter()
            .find(|i| !giver.equipment.iter().any(|it| it.id == **i))
        {
            return Err(WorldError::UnknownItem(*missing));
        }
        self.living(to)?;
        let items = self.take_equipment(from, ids);
        if let Some(receiver) = self.creature_mut(to) {
            receiver.equipment.extend(items.iter().cloned());
        }
        if let Some(mut controller) = self.take_controller(to) {
            controller.on_items_given(to, &items, from, self);
            self.restore_controller(to, controller);
        }
        Ok(())
    }

    fn take_equipment(&mut self, id: CreatureId, ids: &[ItemId]) -> Vec<Item> {
        let Some(creature) = self.creature_mut(id) else {
            return Vec::new();
        };
        let (taken, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut creature.equipment)
            .into_iter()
            .partition(|it| ids.contains(&it.id));
        creature.equipment = kept;
        taken
    }
}

//! Creatures and their components

mod attributes;
mod debt;
mod tribe;
mod view;

pub use attributes::*;
pub use debt::CreatureDebt;
pub use tribe::{TribeId, Tribes};
pub use view::{SPECIAL_VIEW_IDS, ViewId};

use serde::{Deserialize, Serialize};

use crate::controller::Controller;
use crate::geom::Position;
use crate::object::Item;
use crate::world::MovementTraits;

/// Unique identifier for creatures in the world arena
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CreatureId(pub u32);

impl CreatureId {
    pub const NONE: CreatureId = CreatureId(0);

    pub fn next(self) -> Self {
        CreatureId(self.0 + 1)
    }
}

/// A living (or freshly dead) creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub attributes: CreatureAttributes,
    pub tribe: TribeId,
    pub position: Position,
    /// Taken out while the controller runs
    pub controller: Option<Controller>,
    pub equipment: Vec<Item>,
    pub debt: CreatureDebt,
    /// Creature whose grip keeps this one in place
    pub held_by: Option<CreatureId>,
    pub dead: bool,
}

impl Creature {
    /// Build an unplaced creature. The world assigns its id and position.
    pub fn new(tribe: TribeId, attributes: CreatureAttributes, controller: Controller) -> Self {
        Self {
            id: CreatureId::NONE,
            attributes,
            tribe,
            position: Position::default(),
            controller: Some(controller),
            equipment: Vec::new(),
            debt: CreatureDebt::new(),
            held_by: None,
            dead: false,
        }
    }

    pub fn name(&self) -> &CreatureName {
        &self.attributes.name
    }

    /// "the goblin", or the proper name
    pub fn the(&self) -> String {
        self.attributes.name.the()
    }

    pub fn body(&self) -> &Body {
        &self.attributes.body
    }

    pub fn attr(&self, attr: AttrType) -> i32 {
        self.attributes.attr(attr)
    }

    pub fn kind(&self) -> Option<crate::factory::CreatureKind> {
        self.attributes.kind
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn movement_traits(&self) -> MovementTraits {
        self.attributes.movement_traits()
    }

    pub fn take(&mut self, item: Item) {
        self.equipment.push(item);
    }

    pub fn gold(&self) -> usize {
        self.equipment.iter().filter(|i| i.is_gold()).count()
    }

    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }
}

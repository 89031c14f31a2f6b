//! Creature factory
//!
//! Turns a [`CreatureKind`] (or its string id) into a ready-to-place
//! [`Creature`]: attributes from the kind table, a controller, and the
//! starting inventory. Bespoke creatures (boulders, krakens, shopkeepers,
//! illusions, ghosts, legendary beasts) have their own constructors.

mod inventory;
mod kind;
mod names;
mod special;
mod tables;

pub use inventory::{ItemList, default_inventory};
pub use kind::{CreatureKind, SpecialShape};
pub use names::{NameGenerator, NameGeneratorId};
pub use special::species_name;

use std::str::FromStr;

use hashbrown::HashMap;

use crate::consts::BOULDER_STRENGTH;
use crate::controller::{
    BoulderController, Controller, IllusionController, KrakenController, MonsterAi,
    ShopkeeperController, SokobanController,
};
use crate::creature::{
    AttrValues, Body, BodySize, Creature, CreatureAttributes, LastingEffects, Material, TribeId,
    SPECIAL_VIEW_IDS, ViewId,
};
use crate::geom::{Dir4, Rect};
use crate::object::{ItemSpec, ItemType, PotionEffect};
use crate::rng::RandomSource;
use crate::world::{FactoryError, GameTime};

/// Kraken head or tentacle
pub fn kraken_attributes(view_id: ViewId, name: &str) -> CreatureAttributes {
    let mut attrs = CreatureAttributes::new(view_id, name);
    attrs.kind = Some(CreatureKind::Kraken);
    attrs.body = Body::non_humanoid(BodySize::Large);
    attrs.attr = AttrValues::new(28, 28);
    attrs.effects =
        LastingEffects::POISON_RESISTANT | LastingEffects::NIGHT_VISION | LastingEffects::SWIMMING_SKILL;
    attrs
}

fn boulder_attributes() -> CreatureAttributes {
    let mut attrs = CreatureAttributes::new(ViewId::Boulder, "boulder");
    attrs.body = Body::non_humanoid(BodySize::Huge).with_material(Material::Rock);
    attrs.attr = AttrValues::new(BOULDER_STRENGTH, BOULDER_STRENGTH);
    attrs.effects = LastingEffects::BLIND;
    attrs.boulder = true;
    attrs
}

pub fn sokoban_boulder_attributes() -> CreatureAttributes {
    let mut attrs = boulder_attributes();
    attrs.kind = Some(CreatureKind::SokobanBoulder);
    attrs.body.min_push_size = Some(BodySize::Large);
    attrs
}

/// Builds creatures. Owns the personal-name pools and a view id cache.
#[derive(Debug, Clone, Default)]
pub struct CreatureFactory {
    names: NameGenerator,
    view_ids: HashMap<CreatureKind, ViewId>,
}

impl CreatureFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes for `kind`, with the kind recorded on them
    pub fn attributes(&mut self, kind: CreatureKind, rng: &mut dyn RandomSource) -> CreatureAttributes {
        match kind.special_shape() {
            Some(shape) => {
                let mut attrs = special::special_attributes(shape, &mut self.names, rng);
                attrs.kind = Some(kind);
                attrs
            }
            None => tables::attributes(kind, &mut self.names),
        }
    }

    /// Sprite used for `kind`. Looked up once per kind.
    pub fn view_id(&mut self, kind: CreatureKind) -> ViewId {
        if let Some(view) = self.view_ids.get(&kind) {
            return *view;
        }
        let view = match kind.special_shape() {
            Some(shape) => SPECIAL_VIEW_IDS[shape.index()],
            // Scratch names so a lookup does not shift the real sequence
            None => tables::attributes(kind, &mut NameGenerator::new()).view_id,
        };
        self.view_ids.insert(kind, view);
        view
    }

    /// A creature of `kind` with the default monster AI and kit
    pub fn from_kind(
        &mut self,
        kind: CreatureKind,
        tribe: TribeId,
        rng: &mut dyn RandomSource,
    ) -> Creature {
        self.from_kind_with_ai(kind, tribe, MonsterAi::Monster, rng)
    }

    pub fn from_kind_with_ai(
        &mut self,
        kind: CreatureKind,
        tribe: TribeId,
        ai: MonsterAi,
        rng: &mut dyn RandomSource,
    ) -> Creature {
        self.from_kind_with_inventory(kind, tribe, ai, &[], rng)
    }

    /// A creature carrying `inventory` followed by its default kit
    pub fn from_kind_with_inventory(
        &mut self,
        kind: CreatureKind,
        tribe: TribeId,
        ai: MonsterAi,
        inventory: &[ItemSpec],
        rng: &mut dyn RandomSource,
    ) -> Creature {
        let attrs = self.attributes(kind, rng);
        let controller = match kind {
            CreatureKind::Kraken => Controller::Kraken(KrakenController::head()),
            CreatureKind::SokobanBoulder => Controller::Sokoban(SokobanController::new()),
            _ => Controller::Monster(ai),
        };
        let mut creature = Creature::new(tribe, attrs, controller);
        for spec in inventory {
            creature.take(spec.make(rng));
        }
        let kit = match kind.special_shape() {
            Some(shape) => special::special_items(shape, rng),
            None => default_inventory(kind, rng),
        };
        for item in kit {
            creature.take(item);
        }
        log::trace!("factory built {} for {}", kind, tribe);
        creature
    }

    /// Build from a string id such as `"GNOME_CHIEF"`
    pub fn from_name(
        &mut self,
        name: &str,
        tribe: TribeId,
        rng: &mut dyn RandomSource,
    ) -> Result<Creature, FactoryError> {
        let kind = CreatureKind::from_str(name)
            .map_err(|_| FactoryError::UnknownCreature(name.to_string()))?;
        Ok(self.from_kind(kind, tribe, rng))
    }

    pub fn rolling_boulder(&self, tribe: TribeId, direction: Dir4) -> Creature {
        Creature::new(
            tribe,
            boulder_attributes(),
            Controller::Boulder(BoulderController::new(direction)),
        )
    }

    pub fn sokoban_boulder(&self, tribe: TribeId) -> Creature {
        Creature::new(
            tribe,
            sokoban_boulder_attributes(),
            Controller::Sokoban(SokobanController::new()),
        )
    }

    /// Kraken head attributes; tentacles use other views and names
    pub fn kraken_attributes(view_id: ViewId, name: &str) -> CreatureAttributes {
        kraken_attributes(view_id, name)
    }

    /// Shopkeeper minding `area`, carrying its float and a small kit
    pub fn shopkeeper(&mut self, area: Rect, tribe: TribeId, rng: &mut dyn RandomSource) -> Creature {
        let mut attrs = CreatureAttributes::new(ViewId::Shopkeeper, "shopkeeper");
        attrs.body = Body::humanoid(BodySize::Large);
        attrs.attr = AttrValues::new(17, 20);
        attrs.chat_friendly = Some("complains about high import tax".to_string());
        attrs.chat_hostile = Some("\"Die!\"".to_string());
        attrs.name.set_first(self.names.next(NameGeneratorId::FirstMale));
        let mut creature = Creature::new(
            tribe,
            attrs,
            Controller::Shopkeeper(ShopkeeperController::new(area)),
        );
        let kit = ItemList::new(rng)
            .gold(20, 60)
            .add(ItemType::Sword)
            .add(ItemType::LeatherArmor)
            .add(ItemType::LeatherBoots)
            .add_n(ItemType::Potion(PotionEffect::Heal), 2)
            .build();
        for item in kit {
            creature.take(item);
        }
        creature
    }

    /// A harmless double of `original` that vanishes in 5 to 9 ticks
    pub fn illusion(
        &self,
        original: &Creature,
        now: GameTime,
        rng: &mut dyn RandomSource,
    ) -> Creature {
        let mut attrs = CreatureAttributes::new(ViewId::Rock, original.name().clone());
        attrs.illusion_of = Some(original.attributes.view_id);
        attrs.body = Body::non_humanoid_spirit(BodySize::Large);
        attrs.attr = AttrValues::new(20, 1);
        attrs.effects = LastingEffects::FLYING;
        let lifetime = rng.range(5, 10).max(0) as u64;
        Creature::new(
            original.tribe,
            attrs,
            Controller::Illusion(IllusionController::new(now + lifetime)),
        )
    }

    /// The lost soul left behind by `original`
    pub fn ghost(&mut self, original: &Creature) -> Creature {
        let attrs = tables::attributes(CreatureKind::LostSoul, &mut self.names);
        Creature::new(original.tribe, attrs, Controller::Monster(MonsterAi::Monster))
    }

    /// A legendary creature of the given shape, with its weapons
    pub fn special(
        &mut self,
        tribe: TribeId,
        shape: SpecialShape,
        rng: &mut dyn RandomSource,
    ) -> Creature {
        let attrs = special::special_attributes(shape, &mut self.names, rng);
        let mut creature = Creature::new(tribe, attrs, Controller::Monster(MonsterAi::Monster));
        for item in special::special_items(shape, rng) {
            creature.take(item);
        }
        creature
    }

    /// Idle, hostile stand-in humanoid with a fixed name
    pub fn human_for_tests(&mut self) -> Creature {
        let mut attrs = tables::attributes(CreatureKind::KeeperMage, &mut self.names);
        attrs.name.set_first("keeper");
        attrs.name.full_title = true;
        Creature::new(TribeId::Monster, attrs, Controller::Monster(MonsterAi::Idle))
    }
}

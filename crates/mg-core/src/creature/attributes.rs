//! Creature attributes: stats, body, names and permanent effects

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::factory::CreatureKind;
use crate::world::MovementTraits;

use super::view::ViewId;

/// Numeric attribute kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum AttrType {
    Damage = 0,
    Defense = 1,
    SpellDamage = 2,
    RangedDamage = 3,
}

/// Values for every [`AttrType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttrValues([i32; 4]);

impl AttrValues {
    pub fn new(damage: i32, defense: i32) -> Self {
        Self([damage, defense, 0, 0])
    }

    pub fn with(mut self, attr: AttrType, value: i32) -> Self {
        self.set(attr, value);
        self
    }

    pub fn get(&self, attr: AttrType) -> i32 {
        self.0[attr as usize]
    }

    pub fn set(&mut self, attr: AttrType, value: i32) {
        self.0[attr as usize] = value;
    }

    pub fn add(&mut self, attr: AttrType, delta: i32) {
        self.0[attr as usize] += delta;
    }
}

bitflags! {
    /// Permanent effects a creature is born with
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct LastingEffects: u16 {
        const BLIND = 0x0001;
        const FLYING = 0x0002;
        const SWIMMING_SKILL = 0x0004;
        const NIGHT_VISION = 0x0008;
        const POISON_RESISTANT = 0x0010;
        const MAGIC_RESISTANCE = 0x0020;
        const MELEE_RESISTANCE = 0x0040;
        const RANGED_RESISTANCE = 0x0080;
        const MAGIC_VULNERABILITY = 0x0100;
        const MELEE_VULNERABILITY = 0x0200;
        const RANGED_VULNERABILITY = 0x0400;
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Material {
    #[default]
    Flesh = 0,
    UndeadFlesh = 1,
    Spirit = 2,
    Fire = 3,
    Water = 4,
    Rock = 5,
    Clay = 6,
    Iron = 7,
    Bone = 8,
}

/// Body size, ordered smallest first
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum BodySize {
    Small = 0,
    Medium = 1,
    #[default]
    Large = 2,
    Huge = 3,
}

/// Limb counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BodyParts {
    pub arms: u8,
    pub legs: u8,
    pub wings: u8,
    pub heads: u8,
}

impl BodyParts {
    pub const HUMANOID: BodyParts = BodyParts {
        arms: 2,
        legs: 2,
        wings: 0,
        heads: 1,
    };

    pub const fn new(arms: u8, legs: u8, wings: u8, heads: u8) -> Self {
        Self {
            arms,
            legs,
            wings,
            heads,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum AttackKind {
    Fangs = 0,
    Fists = 1,
    Claws = 2,
    Beak = 3,
    Horn = 4,
    Touch = 5,
}

/// Extra effect carried by a natural attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum AttackEffect {
    Fire = 0,
    Poison = 1,
    Insanity = 2,
}

/// Natural weapon used when no item is wielded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntrinsicAttack {
    pub kind: AttackKind,
    pub damage: i32,
    pub effect: Option<AttackEffect>,
}

impl IntrinsicAttack {
    pub fn new(kind: AttackKind, damage: i32) -> Self {
        Self {
            kind,
            damage,
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Physical makeup of a creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub humanoid: bool,
    pub material: Material,
    pub size: BodySize,
    pub parts: BodyParts,
    pub intrinsic_attack: Option<IntrinsicAttack>,
    /// Smallest creature able to push this one (Sokoban boulders)
    pub min_push_size: Option<BodySize>,
    pub weight: u32,
}

impl Body {
    pub fn new(humanoid: bool, material: Material, size: BodySize) -> Self {
        let parts = if humanoid {
            BodyParts::HUMANOID
        } else {
            BodyParts::default()
        };
        Self {
            humanoid,
            material,
            size,
            parts,
            intrinsic_attack: None,
            min_push_size: None,
            weight: default_weight(size),
        }
    }

    pub fn humanoid(size: BodySize) -> Self {
        Self::new(true, Material::Flesh, size)
    }

    pub fn humanoid_spirit(size: BodySize) -> Self {
        Self::new(true, Material::Spirit, size)
    }

    pub fn non_humanoid(size: BodySize) -> Self {
        Self::new(false, Material::Flesh, size)
    }

    pub fn non_humanoid_spirit(size: BodySize) -> Self {
        Self::new(false, Material::Spirit, size)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_parts(mut self, parts: BodyParts) -> Self {
        self.parts = parts;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_attack(mut self, attack: IntrinsicAttack) -> Self {
        self.intrinsic_attack = Some(attack);
        self
    }

    pub fn add_wings(&mut self) {
        self.parts.wings = 2;
    }

    pub fn is_living(&self) -> bool {
        !matches!(
            self.material,
            Material::Spirit | Material::Fire | Material::Water | Material::Rock
                | Material::Clay | Material::Iron | Material::Bone | Material::UndeadFlesh
        )
    }

    /// Whether a rolling boulder crushes this body instead of passing it by
    pub fn is_killed_by_boulder(&self) -> bool {
        !matches!(self.material, Material::Spirit | Material::Fire | Material::Water)
            && self.size != BodySize::Huge
    }

    /// Health a boulder loses when it crushes this body
    pub fn boulder_damage(&self) -> f64 {
        match self.size {
            BodySize::Small => 0.0,
            BodySize::Medium => 0.15,
            BodySize::Large => 0.3,
            BodySize::Huge => 1.0,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::humanoid(BodySize::Large)
    }
}

fn default_weight(size: BodySize) -> u32 {
    match size {
        BodySize::Small => 5,
        BodySize::Medium => 45,
        BodySize::Large => 90,
        BodySize::Huge => 1000,
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Gender {
    #[default]
    Male = 0,
    Female = 1,
    It = 2,
}

/// A creature's name, optionally with a personal first name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatureName {
    pub bare: String,
    pub plural: Option<String>,
    pub first: Option<String>,
    /// Group noun used by legendary creatures, e.g. "legendary beast"
    pub stack: Option<String>,
    pub full_title: bool,
}

impl CreatureName {
    pub fn new(bare: impl Into<String>) -> Self {
        Self {
            bare: bare.into(),
            ..Default::default()
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn set_first(&mut self, first: impl Into<String>) {
        self.first = Some(first.into());
    }

    pub fn bare(&self) -> &str {
        &self.bare
    }

    /// Definite form: "the boulder". Proper names are left alone.
    pub fn the(&self) -> String {
        if self.bare.starts_with(char::is_uppercase) {
            self.bare.clone()
        } else {
            format!("the {}", self.bare)
        }
    }

    pub fn first_or_bare(&self) -> &str {
        self.first.as_deref().unwrap_or(&self.bare)
    }

    pub fn title(&self) -> String {
        match &self.first {
            Some(first) if self.full_title => format!("{} the {}", first, self.bare),
            Some(first) => first.clone(),
            None => self.bare.clone(),
        }
    }
}

impl From<&str> for CreatureName {
    fn from(bare: &str) -> Self {
        CreatureName::new(bare)
    }
}

/// Everything the factory decides about a creature before it is placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureAttributes {
    pub kind: Option<CreatureKind>,
    pub view_id: ViewId,
    /// Sprite of the creature an illusion imitates
    pub illusion_of: Option<ViewId>,
    pub name: CreatureName,
    pub attr: AttrValues,
    pub body: Body,
    pub effects: LastingEffects,
    pub gender: Gender,
    pub courage: f32,
    pub chat_friendly: Option<String>,
    pub chat_hostile: Option<String>,
    pub boulder: bool,
    pub is_special: bool,
}

impl CreatureAttributes {
    pub fn new(view_id: ViewId, name: impl Into<CreatureName>) -> Self {
        Self {
            kind: None,
            view_id,
            illusion_of: None,
            name: name.into(),
            attr: AttrValues::default(),
            body: Body::default(),
            effects: LastingEffects::empty(),
            gender: Gender::Male,
            courage: 1.0,
            chat_friendly: None,
            chat_hostile: None,
            boulder: false,
            is_special: false,
        }
    }

    pub fn attr(&self, attr: AttrType) -> i32 {
        self.attr.get(attr)
    }

    pub fn has(&self, effect: LastingEffects) -> bool {
        self.effects.contains(effect)
    }

    /// How this creature may move across terrain
    pub fn movement_traits(&self) -> MovementTraits {
        let mut traits = MovementTraits::WALK;
        if self.has(LastingEffects::SWIMMING_SKILL) {
            traits |= MovementTraits::SWIM;
        }
        if self.has(LastingEffects::FLYING) {
            traits |= MovementTraits::FLY;
        }
        traits
    }
}

impl From<String> for CreatureName {
    fn from(bare: String) -> Self {
        CreatureName::new(bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boulder_kill_rules() {
        assert!(Body::humanoid(BodySize::Large).is_killed_by_boulder());
        assert!(!Body::non_humanoid(BodySize::Huge).is_killed_by_boulder());
        assert!(!Body::non_humanoid_spirit(BodySize::Small).is_killed_by_boulder());
        assert!(
            !Body::non_humanoid(BodySize::Large)
                .with_material(Material::Fire)
                .is_killed_by_boulder()
        );
    }

    #[test]
    fn test_boulder_damage_grows_with_size() {
        let sizes = [BodySize::Small, BodySize::Medium, BodySize::Large, BodySize::Huge];
        let damages: Vec<f64> = sizes
            .iter()
            .map(|s| Body::non_humanoid(*s).boulder_damage())
            .collect();
        assert!(damages.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_names() {
        let mut name = CreatureName::new("shopkeeper");
        assert_eq!(name.the(), "the shopkeeper");
        assert_eq!(name.first_or_bare(), "shopkeeper");
        name.set_first("Aldo");
        assert_eq!(name.first_or_bare(), "Aldo");
        assert_eq!(CreatureName::new("Death").the(), "Death");
    }

    #[test]
    fn test_movement_traits() {
        let mut attrs = CreatureAttributes::new(ViewId::KrakenHead, "kraken");
        assert_eq!(attrs.movement_traits(), MovementTraits::WALK);
        attrs.effects |= LastingEffects::SWIMMING_SKILL;
        assert!(attrs.movement_traits().contains(MovementTraits::SWIM));
    }

    #[test]
    fn test_attr_values() {
        let mut attr = AttrValues::new(12, 12).with(AttrType::SpellDamage, 20);
        attr.add(AttrType::Damage, 6);
        assert_eq!(attr.get(AttrType::Damage), 18);
        assert_eq!(attr.get(AttrType::SpellDamage), 20);
        assert_eq!(attr.get(AttrType::RangedDamage), 0);
    }
}

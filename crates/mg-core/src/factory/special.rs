//! Legendary beasts: one creature per humanoid/large/living/winged combination

use crate::creature::{
    AttackEffect, AttackKind, AttrType, AttrValues, Body, BodyParts, BodySize, CreatureAttributes,
    IntrinsicAttack, LastingEffects, Material, SPECIAL_VIEW_IDS,
};
use crate::object::{Item, ItemSpec, ItemType};
use crate::rng::RandomSource;

use super::{NameGenerator, NameGeneratorId, SpecialShape};

const SPECIES_NAMES: [&str; 16] = [
    "devitablex",
    "owlbeast",
    "hellar dra",
    "marilisk",
    "gelaticorn",
    "mant eatur",
    "phanticore",
    "yeth horro",
    "yeth amon",
    "mantic dra",
    "unic cread",
    "under hulk",
    "nightshasa",
    "manananggal",
    "dire spawn",
    "shamander",
];

/// Body parts of the non-humanoid variants
const BEAST_PARTS: [BodyParts; 8] = [
    BodyParts::new(0, 2, 0, 0),
    BodyParts::new(2, 2, 2, 1),
    BodyParts::new(0, 4, 0, 1),
    BodyParts::new(2, 0, 2, 1),
    BodyParts::new(0, 0, 0, 0),
    BodyParts::new(0, 2, 2, 1),
    BodyParts::new(0, 8, 0, 1),
    BodyParts::new(0, 0, 2, 1),
];

fn beast_attack(index: usize) -> IntrinsicAttack {
    let fangs = IntrinsicAttack::new(AttackKind::Fangs, 7);
    let fists = IntrinsicAttack::new(AttackKind::Fists, 7);
    match index {
        1 | 2 => fangs.with_effect(AttackEffect::Fire),
        3 | 7 => fists,
        4 | 6 => fangs.with_effect(AttackEffect::Poison),
        _ => fangs,
    }
}

/// Species name for a shape
pub fn species_name(shape: SpecialShape) -> &'static str {
    SPECIES_NAMES[shape.index()]
}

/// One resistance and a vulnerability of a different kind
fn resistance_and_vulnerability(rng: &mut dyn RandomSource) -> LastingEffects {
    const RESISTANCES: [LastingEffects; 3] = [
        LastingEffects::MAGIC_RESISTANCE,
        LastingEffects::MELEE_RESISTANCE,
        LastingEffects::RANGED_RESISTANCE,
    ];
    const VULNERABILITIES: [LastingEffects; 3] = [
        LastingEffects::MAGIC_VULNERABILITY,
        LastingEffects::MELEE_VULNERABILITY,
        LastingEffects::RANGED_VULNERABILITY,
    ];
    let resisted = rng.rn2(3) as usize;
    let mut vulnerable = rng.rn2(2) as usize;
    if vulnerable >= resisted {
        vulnerable += 1;
    }
    RESISTANCES[resisted] | VULNERABILITIES[vulnerable]
}

pub fn special_attributes(
    shape: SpecialShape,
    names: &mut NameGenerator,
    rng: &mut dyn RandomSource,
) -> CreatureAttributes {
    let material = if shape.living {
        Material::Flesh
    } else {
        Material::Spirit
    };
    let size = if shape.large {
        BodySize::Large
    } else {
        BodySize::Medium
    };
    let mut body = Body::new(shape.humanoid, material, size);
    if shape.wings {
        body.add_wings();
    }
    let name = species_name(shape);
    let mut attrs = CreatureAttributes::new(SPECIAL_VIEW_IDS[shape.index()], name);
    attrs.is_special = true;
    attrs.body = body;

    let damage = rng.range(18, 24);
    let defense = rng.range(18, 24);
    let spell = rng.range(18, 24);
    attrs.attr = AttrValues::new(damage, defense).with(AttrType::SpellDamage, spell);
    attrs.effects |= resistance_and_vulnerability(rng);
    if shape.large {
        attrs.attr.add(AttrType::Damage, 6);
        attrs.attr.add(AttrType::Defense, 2);
        attrs.attr.add(AttrType::SpellDamage, -6);
    }

    if shape.humanoid {
        attrs.chat_friendly = Some(format!("\"I am the mighty {}\"", name));
        attrs.chat_hostile = Some(format!("\"I am the mighty {}. Die!\"", name));
    } else {
        attrs.chat_friendly = Some("snarls.".to_string());
        attrs.chat_hostile = Some("snarls.".to_string());
    }
    attrs.name.stack = Some(
        if shape.humanoid {
            "legendary humanoid"
        } else {
            "legendary beast"
        }
        .to_string(),
    );
    attrs.name.set_first(names.next(NameGeneratorId::Demon));

    if !shape.humanoid {
        let index = shape.beast_index();
        attrs.body.parts = BEAST_PARTS[index];
        attrs.attr.add(AttrType::Damage, 5);
        attrs.attr.add(AttrType::Defense, 5);
        attrs.body.intrinsic_attack = Some(beast_attack(index));
    }
    if rng.one_in(3) {
        attrs.effects |= LastingEffects::SWIMMING_SKILL;
    }
    attrs
}

/// Weapons carried by humanoid legends
pub fn special_items(shape: SpecialShape, rng: &mut dyn RandomSource) -> Vec<Item> {
    let mut items = Vec::new();
    if !shape.humanoid {
        return items;
    }
    if rng.one_in(4) {
        items.push(Item::new(ItemType::Bow));
    }
    const WEAPONS: [ItemType; 3] = [ItemType::Sword, ItemType::BattleAxe, ItemType::WarHammer];
    let weapon = WEAPONS[rng.rn2(3) as usize];
    items.push(ItemSpec::new(weapon).with_prefix_chance(1.0).make(rng));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::ViewId;
    use crate::rng::{GameRng, ScriptedRng};

    fn shape(humanoid: bool, large: bool, living: bool, wings: bool) -> SpecialShape {
        SpecialShape {
            humanoid,
            large,
            living,
            wings,
        }
    }

    #[test]
    fn test_large_living_beast() {
        let mut names = NameGenerator::new();
        // damage, defense, spell, resistance, vulnerability, swim roll
        let mut rng = ScriptedRng::new([0, 1, 2, 0, 0, 1]);
        let attrs = special_attributes(shape(false, true, true, false), &mut names, &mut rng);
        assert_eq!(attrs.name.bare, "devitablex");
        assert_eq!(attrs.view_id, ViewId::SpecialBlbn);
        assert_eq!(attrs.attr(AttrType::Damage), 18 + 6 + 5);
        assert_eq!(attrs.attr(AttrType::Defense), 19 + 2 + 5);
        assert_eq!(attrs.attr(AttrType::SpellDamage), 20 - 6);
        assert!(attrs.has(LastingEffects::MAGIC_RESISTANCE));
        assert!(attrs.has(LastingEffects::MELEE_VULNERABILITY));
        assert!(!attrs.has(LastingEffects::SWIMMING_SKILL));
        assert_eq!(attrs.body.parts, BodyParts::new(0, 2, 0, 0));
        assert_eq!(attrs.chat_hostile.as_deref(), Some("snarls."));
        assert_eq!(attrs.name.stack.as_deref(), Some("legendary beast"));
        assert!(attrs.is_special);
    }

    #[test]
    fn test_resistance_never_matches_vulnerability() {
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let effects = resistance_and_vulnerability(&mut rng);
            assert_eq!(effects.bits().count_ones(), 2);
            for (res, vul) in [
                (LastingEffects::MAGIC_RESISTANCE, LastingEffects::MAGIC_VULNERABILITY),
                (LastingEffects::MELEE_RESISTANCE, LastingEffects::MELEE_VULNERABILITY),
                (LastingEffects::RANGED_RESISTANCE, LastingEffects::RANGED_VULNERABILITY),
            ] {
                assert!(!(effects.contains(res) && effects.contains(vul)));
            }
        }
    }

    #[test]
    fn test_humanoid_legend() {
        let mut names = NameGenerator::new();
        let mut rng = GameRng::new(5);
        let legend = shape(true, false, false, true);
        let attrs = special_attributes(legend, &mut names, &mut rng);
        assert_eq!(attrs.name.bare, "shamander");
        assert_eq!(attrs.body.material, Material::Spirit);
        assert_eq!(attrs.body.size, BodySize::Medium);
        assert_eq!(attrs.body.parts.wings, 2);
        assert_eq!(
            attrs.chat_friendly.as_deref(),
            Some("\"I am the mighty shamander\"")
        );
        assert!(attrs.body.intrinsic_attack.is_none());

        let items = special_items(legend, &mut rng);
        let weapon = items.last().unwrap();
        assert!(weapon.prefix.is_some());
        assert!(matches!(
            weapon.kind,
            ItemType::Sword | ItemType::BattleAxe | ItemType::WarHammer
        ));
    }

    #[test]
    fn test_beasts_carry_nothing() {
        let mut rng = GameRng::new(2);
        assert!(special_items(shape(false, true, false, true), &mut rng).is_empty());
    }
}

//! Per-kind creature attributes

use crate::creature::{
    AttackEffect, AttackKind, AttrType, AttrValues, Body, BodyParts, BodySize, CreatureAttributes,
    Gender, IntrinsicAttack, LastingEffects, Material, ViewId,
};

use super::{
    CreatureKind, NameGenerator, NameGeneratorId, kraken_attributes, sokoban_boulder_attributes,
};

/// Attribute builder used by the kind table
struct Template(CreatureAttributes);

impl Template {
    fn new(view: ViewId, name: &str, body: Body, damage: i32, defense: i32) -> Self {
        let mut attrs = CreatureAttributes::new(view, name);
        attrs.body = body;
        attrs.attr = AttrValues::new(damage, defense);
        Template(attrs)
    }

    fn spell(mut self, value: i32) -> Self {
        self.0.attr.set(AttrType::SpellDamage, value);
        self
    }

    fn ranged(mut self, value: i32) -> Self {
        self.0.attr.set(AttrType::RangedDamage, value);
        self
    }

    fn effects(mut self, effects: LastingEffects) -> Self {
        self.0.effects |= effects;
        self
    }

    fn female(mut self) -> Self {
        self.0.gender = Gender::Female;
        self
    }

    fn plural(mut self, plural: &str) -> Self {
        self.0.name.plural = Some(plural.to_string());
        self
    }

    fn chat(mut self, friendly: &str, hostile: &str) -> Self {
        self.0.chat_friendly = Some(friendly.to_string());
        self.0.chat_hostile = Some(hostile.to_string());
        self
    }

    fn says(self, line: &str) -> Self {
        self.chat(line, line)
    }

    fn courage(mut self, courage: f32) -> Self {
        self.0.courage = courage;
        self
    }

    fn first(mut self, names: &mut NameGenerator, id: NameGeneratorId) -> Self {
        self.0.name.set_first(names.next(id));
        self
    }

    fn first_literal(mut self, first: &str) -> Self {
        self.0.name.set_first(first);
        self
    }

    fn full_title(mut self) -> Self {
        self.0.name.full_title = true;
        self
    }

    fn done(self) -> CreatureAttributes {
        self.0
    }
}

fn fangs(damage: i32) -> IntrinsicAttack {
    IntrinsicAttack::new(AttackKind::Fangs, damage)
}

fn golem(material: Material) -> Body {
    Body::non_humanoid(BodySize::Large)
        .with_parts(BodyParts::HUMANOID)
        .with_material(material)
}

fn undead(size: BodySize) -> Body {
    Body::humanoid(size).with_material(Material::UndeadFlesh)
}

fn winged(mut body: Body) -> Body {
    body.add_wings();
    body
}

/// Attributes for an ordinary (table-driven) kind.
///
/// Legendary beasts are rolled in `special`; here they fall back to a plain
/// large humanoid, and the factory never routes them through this table.
pub fn attributes(
    kind: CreatureKind,
    names: &mut NameGenerator,
) -> CreatureAttributes {
    use BodySize::{Huge, Large, Medium, Small};
    use CreatureKind as K;
    use LastingEffects as E;
    use NameGeneratorId as N;

    let t = match kind {
        K::KeeperMage => Template::new(ViewId::Keeper1, "wizard", Body::humanoid(Large), 12, 12)
            .spell(20)
            .first(names, N::FirstMale)
            .full_title(),
        K::KeeperMageF => Template::new(ViewId::KeeperF1, "wizard", Body::humanoid(Large), 12, 12)
            .spell(20)
            .female()
            .first(names, N::FirstFemale)
            .full_title(),
        K::KeeperKnight => {
            Template::new(ViewId::KeeperKnight1, "knight", Body::humanoid(Large), 20, 16)
                .first(names, N::FirstMale)
                .full_title()
        }
        K::KeeperKnightF => {
            Template::new(ViewId::KeeperKnightF1, "knight", Body::humanoid(Large), 20, 16)
                .female()
                .first(names, N::FirstFemale)
                .full_title()
        }
        K::Adventurer => Template::new(ViewId::Player, "squire", Body::humanoid(Large), 15, 20)
            .first(names, N::FirstMale)
            .full_title(),
        K::AdventurerF => Template::new(ViewId::PlayerF, "squire", Body::humanoid(Large), 15, 20)
            .female()
            .first(names, N::FirstFemale)
            .full_title(),
        K::Unicorn => Template::new(
            ViewId::Unicorn,
            "unicorn",
            Body::non_humanoid(Large)
                .with_parts(BodyParts::new(0, 4, 0, 1))
                .with_weight(500)
                .with_attack(IntrinsicAttack::new(AttackKind::Horn, 5)),
            16,
            20,
        )
        .spell(20)
        .effects(E::MAGIC_RESISTANCE)
        .says("\"mhhhhhrrrr!\"")
        .first(names, N::Deity),
        K::Bandit => Template::new(ViewId::Bandit, "bandit", Body::humanoid(Large), 15, 13)
            .chat("curses all law enforcement", "\"Die!\""),
        K::Ghost => Template::new(ViewId::Ghost, "ghost", Body::non_humanoid_spirit(Large), 0, 35)
            .spell(30)
            .effects(E::FLYING)
            .says("\"Wouuuouuu!!!\""),
        K::Spirit => Template::new(
            ViewId::Spirit,
            "ancient spirit",
            Body::non_humanoid_spirit(Large)
                .with_attack(IntrinsicAttack::new(AttackKind::Touch, 10)),
            0,
            35,
        )
        .spell(30)
        .effects(E::FLYING),
        K::LostSoul => Template::new(
            ViewId::Ghost,
            "ghost",
            Body::non_humanoid_spirit(Large).with_attack(
                IntrinsicAttack::new(AttackKind::Touch, 1).with_effect(AttackEffect::Insanity),
            ),
            0,
            25,
        )
        .spell(5)
        .courage(100.0)
        .effects(E::FLYING)
        .says("\"Wouuuouuu!!!\""),
        K::Witch => Template::new(ViewId::Witch, "witch", Body::humanoid(Medium), 14, 14)
            .spell(20)
            .plural("witches")
            .female()
            .first_literal("Cornelia")
            .says("curses all humans"),
        K::Witchman => Template::new(ViewId::Witchman, "witchman", Body::humanoid(Large), 30, 30)
            .spell(20)
            .plural("witchmen")
            .first(names, N::FirstMale)
            .effects(E::MAGIC_RESISTANCE)
            .says("curses all monsters"),
        K::Cyclops => Template::new(
            ViewId::Cyclops,
            "cyclops",
            Body::humanoid(Large).with_weight(400),
            34,
            40,
        )
        .plural("cyclopes")
        .first(names, N::Cyclops),
        K::DemonDweller => Template::new(
            ViewId::DemonDweller,
            "demon dweller",
            winged(Body::humanoid_spirit(Large)),
            25,
            30,
        )
        .spell(35)
        .effects(E::FLYING | E::MAGIC_RESISTANCE)
        .courage(100.0)
        .chat("\"Kneel before us!\"", "\"Face your death!\"")
        .first(names, N::Demon),
        K::DemonLord => Template::new(
            ViewId::DemonLord,
            "Demon Lord",
            winged(Body::humanoid_spirit(Large)),
            40,
            45,
        )
        .spell(50)
        .effects(E::FLYING | E::MAGIC_RESISTANCE)
        .courage(100.0)
        .chat("\"Kneel before us!\"", "\"Face your death!\"")
        .first(names, N::Demon),
        K::Minotaur => Template::new(
            ViewId::Minotaur,
            "minotaur",
            Body::humanoid(Large).with_weight(400),
            35,
            45,
        ),
        K::Hydra => Template::new(
            ViewId::Hydra,
            "hydra",
            Body::non_humanoid(Large)
                .with_parts(BodyParts::new(0, 4, 0, 5))
                .with_weight(400)
                .with_attack(fangs(8).with_effect(AttackEffect::Poison)),
            27,
            45,
        )
        .effects(E::POISON_RESISTANT | E::SWIMMING_SKILL),
        K::GreenDragon => Template::new(
            ViewId::GreenDragon,
            "green dragon",
            winged(Body::non_humanoid(Huge).with_parts(BodyParts::new(0, 4, 0, 1)))
                .with_attack(fangs(15).with_effect(AttackEffect::Poison)),
            40,
            40,
        )
        .effects(E::POISON_RESISTANT | E::FLYING)
        .first(names, N::Dragon),
        K::RedDragon => Template::new(
            ViewId::RedDragon,
            "red dragon",
            winged(Body::non_humanoid(Huge).with_parts(BodyParts::new(0, 4, 0, 1)))
                .with_attack(fangs(15).with_effect(AttackEffect::Fire)),
            40,
            42,
        )
        .effects(E::FLYING)
        .first(names, N::Dragon),
        K::Knight => Template::new(ViewId::Knight, "knight", Body::humanoid(Large), 36, 28)
            .chat("curses all dungeons", "\"Die!\""),
        K::Duke => {
            let world = names.next(N::World);
            Template::new(
                ViewId::Duke,
                &format!("Duke of {}", world),
                Body::humanoid(Large),
                43,
                32,
            )
            .chat("curses all dungeons", "\"Die!\"")
            .first(names, N::FirstMale)
        }
        K::Archer => Template::new(ViewId::Archer, "archer", Body::humanoid(Large), 17, 22)
            .ranged(30)
            .chat("curses all dungeons", "\"Die!\""),
        K::Priest => Template::new(ViewId::Priest, "priest", Body::humanoid(Large), 15, 15)
            .spell(34)
            .effects(E::MAGIC_RESISTANCE),
        K::Warrior => Template::new(ViewId::Warrior, "warrior", Body::humanoid(Large), 27, 19)
            .first(names, N::FirstMale),
        K::Shaman => Template::new(ViewId::Shaman, "shaman", Body::humanoid(Large), 27, 19)
            .spell(30)
            .effects(E::MAGIC_RESISTANCE)
            .first(names, N::FirstMale),
        K::Peseant => Template::new(ViewId::Peseant, "peasant", Body::humanoid(Large), 14, 12)
            .female()
            .chat("curses all dungeons", "\"Heeelp!\""),
        K::Child => Template::new(ViewId::Child, "child", Body::humanoid(Medium), 8, 8)
            .plural("children")
            .chat("\"plaaaaay!\"", "\"Heeelp!\""),
        K::HalloweenKid => {
            Template::new(ViewId::HalloweenKid, "child", Body::humanoid(Medium), 8, 8)
                .plural("children")
                .says("\"Trick or treat!\"")
        }
        K::ClayGolem => Template::new(ViewId::ClayGolem, "clay golem", golem(Material::Clay), 17, 19),
        K::StoneGolem => {
            Template::new(ViewId::StoneGolem, "stone golem", golem(Material::Rock), 19, 23)
        }
        K::IronGolem => Template::new(ViewId::IronGolem, "iron golem", golem(Material::Iron), 23, 30),
        K::Zombie => Template::new(ViewId::Zombie, "zombie", undead(Large), 14, 17),
        K::Skeleton => Template::new(
            ViewId::Skeleton,
            "skeleton",
            Body::humanoid(Large).with_material(Material::Bone),
            17,
            13,
        )
        .ranged(5),
        K::Vampire => Template::new(ViewId::Vampire, "vampire", undead(Large), 17, 17)
            .spell(17)
            .effects(E::NIGHT_VISION)
            .first(names, N::Vampire),
        K::VampireLord => Template::new(ViewId::VampireLord, "vampire lord", undead(Large), 17, 23)
            .spell(27)
            .effects(E::NIGHT_VISION | E::FLYING)
            .first(names, N::Vampire),
        K::Mummy => Template::new(ViewId::Mummy, "mummy", undead(Large), 15, 14)
            .spell(10)
            .plural("mummies"),
        K::Orc => Template::new(ViewId::Orc, "orc", Body::humanoid(Large), 16, 14)
            .chat("curses all elves", "\"Die!\"")
            .first(names, N::Orc),
        K::Harpy => Template::new(ViewId::Harpy, "harpy", winged(Body::humanoid(Large)), 13, 16)
            .ranged(15)
            .female()
            .plural("harpies")
            .effects(E::FLYING),
        K::Kobold => Template::new(ViewId::Kobold, "kobold", Body::humanoid(Medium), 14, 16)
            .effects(E::SWIMMING_SKILL),
        K::Gnome => Template::new(ViewId::Gnome, "gnome", Body::humanoid(Medium), 12, 13),
        K::GnomeChief => {
            Template::new(ViewId::GnomeBoss, "gnome chieftain", Body::humanoid(Medium), 15, 16)
        }
        K::Goblin => Template::new(ViewId::Goblin, "goblin", Body::humanoid(Medium), 12, 13)
            .chat("curses all elves", "\"Die!\"")
            .first(names, N::Orc),
        K::Imp => Template::new(ViewId::Imp, "imp", Body::humanoid_spirit(Small), 5, 15)
            .courage(100.0),
        K::Ogre => Template::new(
            ViewId::Ogre,
            "ogre",
            Body::humanoid(Large).with_weight(140),
            18,
            18,
        )
        .first(names, N::Orc),
        K::Dwarf => Template::new(ViewId::Dwarf, "dwarf", Body::humanoid(Medium), 21, 25)
            .plural("dwarves")
            .chat("curses all orcs", "\"Die!\"")
            .first(names, N::Dwarf),
        K::DwarfBaron => {
            Template::new(ViewId::DwarfBaron, "dwarf baron", Body::humanoid(Medium), 28, 32)
                .chat("curses all orcs", "\"Die!\"")
                .first(names, N::Dwarf)
        }
        K::Lizardman => Template::new(
            ViewId::Lizardman,
            "lizardman",
            Body::humanoid(Medium).with_attack(fangs(5).with_effect(AttackEffect::Poison)),
            20,
            14,
        )
        .plural("lizardmen"),
        K::Lizardlord => Template::new(
            ViewId::Lizardlord,
            "lizardman chief",
            Body::humanoid(Medium).with_attack(fangs(8).with_effect(AttackEffect::Poison)),
            30,
            16,
        ),
        K::Elf => Template::new(ViewId::Elf, "elf", Body::humanoid(Medium), 14, 6)
            .plural("elves")
            .chat("curses all dwarves", "\"Die!\""),
        K::ElfArcher => {
            Template::new(ViewId::ElfArcher, "elven archer", Body::humanoid(Medium), 18, 12)
                .ranged(25)
                .effects(E::MAGIC_RESISTANCE)
        }
        K::ElfLord => Template::new(ViewId::ElfLord, "elf lord", Body::humanoid(Medium), 22, 14)
            .spell(16)
            .ranged(30)
            .effects(E::MAGIC_RESISTANCE),
        K::DarkElfWarrior => Template::new(
            ViewId::DarkElfWarrior,
            "dark elf",
            Body::humanoid(Medium),
            18,
            12,
        )
        .spell(6)
        .plural("dark elves")
        .effects(E::MAGIC_RESISTANCE | E::NIGHT_VISION),
        K::DarkElfLord => Template::new(
            ViewId::DarkElfLord,
            "dark elf lord",
            Body::humanoid(Medium),
            22,
            14,
        )
        .spell(16)
        .effects(E::MAGIC_RESISTANCE | E::NIGHT_VISION),
        K::Driad => Template::new(ViewId::Driad, "driad", Body::humanoid(Medium), 6, 14)
            .ranged(25)
            .female()
            .effects(E::MAGIC_RESISTANCE),
        K::Jackal => Template::new(
            ViewId::Jackal,
            "jackal",
            Body::non_humanoid(Small)
                .with_parts(BodyParts::new(0, 4, 0, 1))
                .with_attack(fangs(2)),
            15,
            10,
        ),
        K::Rat => Template::new(
            ViewId::Rat,
            "rat",
            Body::non_humanoid(Small)
                .with_parts(BodyParts::new(0, 4, 0, 1))
                .with_attack(fangs(1)),
            2,
            2,
        )
        .effects(E::SWIMMING_SKILL),
        K::Spider => Template::new(
            ViewId::Spider,
            "spider",
            Body::non_humanoid(Small)
                .with_parts(BodyParts::new(0, 8, 0, 1))
                .with_attack(fangs(1).with_effect(AttackEffect::Poison)),
            9,
            13,
        ),
        K::Snake => Template::new(
            ViewId::Snake,
            "snake",
            Body::non_humanoid(Small)
                .with_parts(BodyParts::new(0, 0, 0, 1))
                .with_attack(fangs(1).with_effect(AttackEffect::Poison)),
            14,
            14,
        )
        .effects(E::SWIMMING_SKILL),
        K::Wolf => Template::new(
            ViewId::Wolf,
            "wolf",
            Body::non_humanoid(Medium)
                .with_parts(BodyParts::new(0, 4, 0, 1))
                .with_attack(fangs(8)),
            18,
            11,
        )
        .plural("wolves")
        .effects(E::NIGHT_VISION)
        .first(names, N::Dog),
        K::Elementalist => Template::new(
            ViewId::Elementalist,
            "elementalist",
            Body::humanoid(Large),
            15,
            20,
        )
        .spell(15)
        .female()
        .effects(E::MAGIC_RESISTANCE)
        .first(names, N::FirstFemale),
        K::Angel => Template::new(ViewId::Angel, "angel", Body::non_humanoid_spirit(Large), 0, 22)
            .spell(20),
        K::Bat => Template::new(
            ViewId::Bat,
            "bat",
            winged(Body::non_humanoid(Small).with_parts(BodyParts::new(0, 2, 0, 1)))
                .with_attack(fangs(3)),
            3,
            16,
        )
        .effects(E::NIGHT_VISION | E::FLYING),
        K::Death => Template::new(ViewId::Death, "Death", Body::humanoid_spirit(Large), 0, 35)
            .spell(100)
            .courage(100.0),
        K::Kraken => return kraken_attributes(ViewId::KrakenHead, "kraken"),
        K::SokobanBoulder => return sokoban_boulder_attributes(),
        _ => Template::new(ViewId::Rock, "creature", Body::humanoid(Large), 10, 10),
    };
    let mut attrs = t.done();
    attrs.kind = Some(kind);
    attrs
}

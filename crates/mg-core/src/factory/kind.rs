//! Symbolic creature identifiers

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every creature the factory knows how to build.
///
/// The string form (`"KEEPER_MAGE"`, `"SPECIAL_HLGW"`, ...) is what level
/// data and the command line use.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CreatureKind {
    // Keepers and adventurers
    KeeperMage,
    KeeperMageF,
    KeeperKnight,
    KeeperKnightF,
    Adventurer,
    AdventurerF,

    // Humans
    Bandit,
    Witch,
    Witchman,
    Knight,
    Archer,
    Priest,
    Warrior,
    Shaman,
    Peseant,
    Child,
    HalloweenKid,
    Duke,
    Elementalist,

    // Demons, spirits and the dead
    Ghost,
    Spirit,
    LostSoul,
    DemonDweller,
    DemonLord,
    Angel,
    Death,
    Zombie,
    Skeleton,
    Vampire,
    VampireLord,
    Mummy,

    // Golems
    ClayGolem,
    StoneGolem,
    IronGolem,

    // Greenskins and the underground folk
    Orc,
    Goblin,
    Ogre,
    Harpy,
    Kobold,
    Gnome,
    GnomeChief,
    Imp,
    Dwarf,
    DwarfBaron,
    Lizardman,
    Lizardlord,

    // Elves
    Elf,
    ElfArcher,
    ElfLord,
    DarkElfWarrior,
    DarkElfLord,
    Driad,

    // Beasts
    Unicorn,
    Cyclops,
    Minotaur,
    Hydra,
    GreenDragon,
    RedDragon,
    Kraken,
    Wolf,
    Jackal,
    Rat,
    Snake,
    Spider,
    Bat,

    SokobanBoulder,

    // Legendary beasts: Beast/Humanoid, Large/Medium, Body/Ghost, No wings/Wings
    SpecialBlbn,
    SpecialBlbw,
    SpecialBlgn,
    SpecialBlgw,
    SpecialBmbn,
    SpecialBmbw,
    SpecialBmgn,
    SpecialBmgw,
    SpecialHlbn,
    SpecialHlbw,
    SpecialHlgn,
    SpecialHlgw,
    SpecialHmbn,
    SpecialHmbw,
    SpecialHmgn,
    SpecialHmgw,
}

/// Shape of a legendary beast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecialShape {
    pub humanoid: bool,
    pub large: bool,
    pub living: bool,
    pub wings: bool,
}

impl SpecialShape {
    /// Position in the sixteen-entry special tables
    pub fn index(self) -> usize {
        usize::from(self.humanoid) * 8
            + usize::from(!self.large) * 4
            + usize::from(!self.living) * 2
            + usize::from(self.wings)
    }

    /// Position in the eight-entry beast tables
    pub fn beast_index(self) -> usize {
        self.index() % 8
    }
}

impl CreatureKind {
    /// The legendary-beast shape, for `SPECIAL_*` kinds only
    pub fn special_shape(self) -> Option<SpecialShape> {
        use CreatureKind::*;
        let (humanoid, large, living, wings) = match self {
            SpecialBlbn => (false, true, true, false),
            SpecialBlbw => (false, true, true, true),
            SpecialBlgn => (false, true, false, false),
            SpecialBlgw => (false, true, false, true),
            SpecialBmbn => (false, false, true, false),
            SpecialBmbw => (false, false, true, true),
            SpecialBmgn => (false, false, false, false),
            SpecialBmgw => (false, false, false, true),
            SpecialHlbn => (true, true, true, false),
            SpecialHlbw => (true, true, true, true),
            SpecialHlgn => (true, true, false, false),
            SpecialHlgw => (true, true, false, true),
            SpecialHmbn => (true, false, true, false),
            SpecialHmbw => (true, false, true, true),
            SpecialHmgn => (true, false, false, false),
            SpecialHmgw => (true, false, false, true),
            _ => return None,
        };
        Some(SpecialShape {
            humanoid,
            large,
            living,
            wings,
        })
    }
}

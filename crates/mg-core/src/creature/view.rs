//! Sprite identifiers

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What a renderer should draw for a creature
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewId {
    #[default]
    Rock,
    Keeper1,
    KeeperF1,
    KeeperKnight1,
    KeeperKnightF1,
    Player,
    PlayerF,
    Bandit,
    Ghost,
    Spirit,
    Witch,
    Witchman,
    Cyclops,
    DemonDweller,
    DemonLord,
    Minotaur,
    Hydra,
    GreenDragon,
    RedDragon,
    Knight,
    Archer,
    Priest,
    Warrior,
    Shaman,
    Peseant,
    Child,
    ClayGolem,
    StoneGolem,
    IronGolem,
    Zombie,
    Skeleton,
    Vampire,
    VampireLord,
    Mummy,
    Orc,
    Kobold,
    Gnome,
    GnomeBoss,
    Goblin,
    Dwarf,
    DwarfBaron,
    Elf,
    ElfLord,
    ElfArcher,
    DarkElfWarrior,
    DarkElfLord,
    Wolf,
    Rat,
    Snake,
    Spider,
    Jackal,
    Imp,
    Ogre,
    Lizardman,
    Lizardlord,
    Elementalist,
    Driad,
    Bat,
    Angel,
    Death,
    Duke,
    HalloweenKid,
    Unicorn,
    Harpy,
    KrakenHead,
    KrakenWater,
    KrakenLand,
    Boulder,
    Shopkeeper,
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

/// Special beast sprites, indexed by humanoid / medium / spirit / winged bits
pub const SPECIAL_VIEW_IDS: [ViewId; 16] = [
    ViewId::SpecialBlbn,
    ViewId::SpecialBlbw,
    ViewId::SpecialBlgn,
    ViewId::SpecialBlgw,
    ViewId::SpecialBmbn,
    ViewId::SpecialBmbw,
    ViewId::SpecialBmgn,
    ViewId::SpecialBmgw,
    ViewId::SpecialHlbn,
    ViewId::SpecialHlbw,
    ViewId::SpecialHlgn,
    ViewId::SpecialHlgw,
    ViewId::SpecialHmbn,
    ViewId::SpecialHmbw,
    ViewId::SpecialHmgn,
    ViewId::SpecialHmgw,
];

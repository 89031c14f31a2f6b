//! Items, their prices and the shop ownership tag

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::CreatureId;
use crate::rng::RandomSource;

/// Unique identifier for items in the world
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Not yet registered with a world
    pub const NONE: ItemId = ItemId(0);

    pub fn next(self) -> Self {
        ItemId(self.0 + 1)
    }
}

/// Broad item category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ItemClass {
    Gold = 0,
    Weapon = 1,
    RangedWeapon = 2,
    Armor = 3,
    Potion = 4,
    Scroll = 5,
    Tool = 6,
    #[default]
    Other = 7,
}

/// What drinking a potion does
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum PotionEffect {
    #[default]
    Heal = 0,
    RegrowBodyPart = 1,
    Sleep = 2,
    Slowed = 3,
    Blind = 4,
    Invisible = 5,
    Poison = 6,
    Speed = 7,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ScrollEffect {
    #[default]
    Teleport = 0,
}

/// Magical prefix rolled onto a weapon or robe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ItemPrefix {
    Flaming = 0,
    Poisoned = 1,
    Blessed = 2,
    Vampiric = 3,
    Warding = 4,
}

/// Concrete item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    GoldPiece,
    Sword,
    ElvenSword,
    Knife,
    BattleAxe,
    WarHammer,
    Club,
    HeavyClub,
    Spear,
    Scythe,
    IronStaff,
    Bow,
    ElvenBow,
    LeatherArmor,
    ChainArmor,
    LeatherHelm,
    IronHelm,
    LeatherBoots,
    IronBoots,
    LeatherGloves,
    Robe,
    Torch,
    FirstAidKit,
    BagOfCandies,
    HalloweenCostume,
    Potion(PotionEffect),
    Scroll(ScrollEffect),
}

impl ItemType {
    pub fn class(self) -> ItemClass {
        match self {
            ItemType::GoldPiece => ItemClass::Gold,
            ItemType::Sword
            | ItemType::ElvenSword
            | ItemType::Knife
            | ItemType::BattleAxe
            | ItemType::WarHammer
            | ItemType::Club
            | ItemType::HeavyClub
            | ItemType::Spear
            | ItemType::Scythe
            | ItemType::IronStaff => ItemClass::Weapon,
            ItemType::Bow | ItemType::ElvenBow => ItemClass::RangedWeapon,
            ItemType::LeatherArmor
            | ItemType::ChainArmor
            | ItemType::LeatherHelm
            | ItemType::IronHelm
            | ItemType::LeatherBoots
            | ItemType::IronBoots
            | ItemType::LeatherGloves
            | ItemType::Robe
            | ItemType::HalloweenCostume => ItemClass::Armor,
            ItemType::Potion(_) => ItemClass::Potion,
            ItemType::Scroll(_) => ItemClass::Scroll,
            ItemType::Torch | ItemType::FirstAidKit => ItemClass::Tool,
            ItemType::BagOfCandies => ItemClass::Other,
        }
    }

    /// Base price in gold pieces
    pub fn price(self) -> u32 {
        match self {
            ItemType::GoldPiece => 1,
            ItemType::Sword => 20,
            ItemType::ElvenSword => 40,
            ItemType::Knife => 5,
            ItemType::BattleAxe => 30,
            ItemType::WarHammer => 20,
            ItemType::Club => 2,
            ItemType::HeavyClub => 4,
            ItemType::Spear => 10,
            ItemType::Scythe => 100,
            ItemType::IronStaff => 25,
            ItemType::Bow => 12,
            ItemType::ElvenBow => 50,
            ItemType::LeatherArmor => 20,
            ItemType::ChainArmor => 130,
            ItemType::LeatherHelm => 5,
            ItemType::IronHelm => 30,
            ItemType::LeatherBoots => 10,
            ItemType::IronBoots => 25,
            ItemType::LeatherGloves => 8,
            ItemType::Robe => 50,
            ItemType::Torch => 3,
            ItemType::FirstAidKit => 10,
            ItemType::BagOfCandies => 1,
            ItemType::HalloweenCostume => 5,
            ItemType::Potion(PotionEffect::Heal) => 40,
            ItemType::Potion(_) => 60,
            ItemType::Scroll(_) => 15,
        }
    }

    pub fn name(self) -> String {
        match self {
            ItemType::GoldPiece => "gold piece".to_string(),
            ItemType::Sword => "sword".to_string(),
            ItemType::ElvenSword => "elven sword".to_string(),
            ItemType::Knife => "knife".to_string(),
            ItemType::BattleAxe => "battle axe".to_string(),
            ItemType::WarHammer => "war hammer".to_string(),
            ItemType::Club => "club".to_string(),
            ItemType::HeavyClub => "heavy club".to_string(),
            ItemType::Spear => "spear".to_string(),
            ItemType::Scythe => "scythe".to_string(),
            ItemType::IronStaff => "iron staff".to_string(),
            ItemType::Bow => "short bow".to_string(),
            ItemType::ElvenBow => "elven bow".to_string(),
            ItemType::LeatherArmor => "leather armor".to_string(),
            ItemType::ChainArmor => "chain mail".to_string(),
            ItemType::LeatherHelm => "leather helm".to_string(),
            ItemType::IronHelm => "iron helm".to_string(),
            ItemType::LeatherBoots => "leather boots".to_string(),
            ItemType::IronBoots => "iron boots".to_string(),
            ItemType::LeatherGloves => "leather gloves".to_string(),
            ItemType::Robe => "robe".to_string(),
            ItemType::Torch => "torch".to_string(),
            ItemType::FirstAidKit => "first aid kit".to_string(),
            ItemType::BagOfCandies => "bag of candies".to_string(),
            ItemType::HalloweenCostume => "halloween costume".to_string(),
            ItemType::Potion(effect) => format!("potion of {}", effect.to_string().replace('_', " ")),
            ItemType::Scroll(effect) => format!("scroll of {}", effect),
        }
    }
}

/// A single item instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemType,
    pub prefix: Option<ItemPrefix>,
    /// Shopkeeper that owns this item while it is for sale
    pub shopkeeper: Option<CreatureId>,
    pub price: u32,
}

impl Item {
    pub fn new(kind: ItemType) -> Self {
        let price = kind.price();
        Self {
            id: ItemId::NONE,
            kind,
            prefix: None,
            shopkeeper: None,
            price,
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn class(&self) -> ItemClass {
        self.kind.class()
    }

    pub fn is_gold(&self) -> bool {
        self.class() == ItemClass::Gold
    }

    pub fn set_shopkeeper(&mut self, shopkeeper: Option<CreatureId>) {
        self.shopkeeper = shopkeeper;
    }

    pub fn is_shopkeeper(&self, id: CreatureId) -> bool {
        self.shopkeeper == Some(id)
    }

    pub fn name(&self) -> String {
        match self.prefix {
            Some(prefix) => format!("{} {}", prefix, self.kind.name()),
            None => self.kind.name(),
        }
    }
}

/// Recipe for an item: kind plus the chance of a magical prefix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub kind: ItemType,
    pub prefix_chance: f64,
}

impl ItemSpec {
    pub fn new(kind: ItemType) -> Self {
        Self {
            kind,
            prefix_chance: 0.0,
        }
    }

    pub fn with_prefix_chance(mut self, chance: f64) -> Self {
        self.prefix_chance = chance;
        self
    }

    pub fn make(&self, rng: &mut dyn RandomSource) -> Item {
        let mut item = Item::new(self.kind);
        if self.prefix_chance > 0.0 && rng.chance(self.prefix_chance) {
            const PREFIXES: [ItemPrefix; 5] = [
                ItemPrefix::Flaming,
                ItemPrefix::Poisoned,
                ItemPrefix::Blessed,
                ItemPrefix::Vampiric,
                ItemPrefix::Warding,
            ];
            if let Some(i) = rng.choose_index(PREFIXES.len()) {
                item.prefix = Some(PREFIXES[i]);
                item.price *= 3;
            }
        }
        item
    }
}

impl From<ItemType> for ItemSpec {
    fn from(kind: ItemType) -> Self {
        ItemSpec::new(kind)
    }
}

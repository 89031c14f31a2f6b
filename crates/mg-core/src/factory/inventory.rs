//! Starting equipment

use crate::object::{Item, ItemSpec, ItemType, PotionEffect, ScrollEffect};
use crate::rng::RandomSource;

use super::CreatureKind;

/// Chained item builder that rolls as it goes
pub struct ItemList<'a> {
    rng: &'a mut dyn RandomSource,
    items: Vec<Item>,
}

impl<'a> ItemList<'a> {
    pub fn new(rng: &'a mut dyn RandomSource) -> Self {
        Self {
            rng,
            items: Vec::new(),
        }
    }

    pub fn add(self, spec: impl Into<ItemSpec>) -> Self {
        self.add_n(spec, 1)
    }

    pub fn add_n(mut self, spec: impl Into<ItemSpec>, count: usize) -> Self {
        let spec = spec.into();
        for _ in 0..count {
            let item = spec.make(self.rng);
            self.items.push(item);
        }
        self
    }

    /// Add the item when a unit roll comes in at or under `chance`
    pub fn maybe(self, chance: f64, spec: impl Into<ItemSpec>) -> Self {
        let spec = spec.into();
        if self.rng.unit() <= chance {
            self.add(spec)
        } else {
            self
        }
    }

    /// A pile of `lo..hi` gold pieces
    pub fn gold(self, lo: i32, hi: i32) -> Self {
        let count = self.rng.range(lo, hi).max(0) as usize;
        self.add_n(ItemType::GoldPiece, count)
    }

    /// One of the given items, uniformly
    pub fn choose(self, specs: &[ItemSpec]) -> Self {
        match self.rng.choose_index(specs.len()) {
            Some(i) => self.add(specs[i]),
            None => self,
        }
    }

    pub fn healing(self) -> Self {
        self.add(ItemType::Potion(PotionEffect::Heal))
    }

    /// Escape scroll or healing potion
    pub fn backup(self) -> Self {
        let spec = backup_spec(self.rng);
        self.add(spec)
    }

    pub fn maybe_backup(self, chance: f64) -> Self {
        if self.rng.unit() <= chance {
            self.backup()
        } else {
            self
        }
    }

    /// Leather four times out of five, chain otherwise
    pub fn armor(self) -> Self {
        let spec = if self.rng.rn2(5) < 4 {
            ItemType::LeatherArmor
        } else {
            ItemType::ChainArmor
        };
        self.add(spec)
    }

    pub fn build(self) -> Vec<Item> {
        self.items
    }
}

fn backup_spec(rng: &mut dyn RandomSource) -> ItemType {
    if rng.one_in(2) {
        ItemType::Scroll(ScrollEffect::Teleport)
    } else {
        ItemType::Potion(PotionEffect::Heal)
    }
}

fn prefixed(kind: ItemType) -> ItemSpec {
    ItemSpec::new(kind).with_prefix_chance(1.0)
}

/// What a creature of `kind` carries when it is created
pub fn default_inventory(kind: CreatureKind, rng: &mut dyn RandomSource) -> Vec<Item> {
    use CreatureKind as K;
    use ItemType::*;
    let list = ItemList::new(rng);
    let list = match kind {
        K::KeeperMage | K::KeeperMageF => list.add(Robe),
        K::KeeperKnight | K::KeeperKnightF => list.add(LeatherArmor).add(LeatherHelm).add(Sword),
        K::Cyclops => list.add(HeavyClub).gold(40, 80),
        K::GreenDragon => list.gold(60, 100),
        K::DemonDweller => list.gold(5, 10),
        K::RedDragon => list.gold(120, 200),
        K::DemonLord | K::Angel => list.add(prefixed(Sword)),
        K::Adventurer | K::AdventurerF => list
            .add_n(FirstAidKit, 3)
            .add(Knife)
            .add(Sword)
            .add(LeatherGloves)
            .add(LeatherArmor)
            .add(LeatherHelm)
            .gold(16, 26),
        K::Elementalist => list.add(IronStaff).add(Torch),
        K::Death => list.add(Scythe),
        K::Kobold => list.add(Spear),
        K::Goblin => list.add(Club).maybe(0.3, LeatherBoots),
        K::Warrior => list.add(LeatherArmor).add(Club).gold(2, 5),
        K::Shaman => list.add(LeatherArmor).add(Club).gold(80, 120),
        K::Lizardlord => list
            .add(LeatherArmor)
            .add(Potion(PotionEffect::RegrowBodyPart))
            .gold(50, 90),
        K::Lizardman => list.add(LeatherArmor).gold(2, 4),
        K::Harpy | K::Driad => list.add(Bow),
        K::Archer => list
            .add(Bow)
            .add(Knife)
            .add(LeatherArmor)
            .add(LeatherBoots)
            .maybe(0.3, Torch)
            .healing()
            .gold(4, 10),
        K::Witchman => list
            .add(Sword)
            .add(LeatherArmor)
            .add(LeatherBoots)
            .healing()
            .add_n(Potion(PotionEffect::Speed), 4)
            .gold(60, 80),
        K::Priest => list.add(IronStaff).add(LeatherBoots).add(prefixed(Robe)),
        K::Knight => list
            .add(Sword)
            .add(ChainArmor)
            .add(LeatherBoots)
            .maybe(0.3, Torch)
            .healing()
            .gold(6, 16),
        K::Minotaur => list.add(BattleAxe),
        K::Duke => list
            .add(prefixed(BattleAxe))
            .add(ChainArmor)
            .add(IronHelm)
            .add(IronBoots)
            .add_n(Potion(PotionEffect::Heal), 3)
            .maybe(0.3, Torch)
            .gold(140, 200),
        K::Orc => list.add(Club).add(LeatherArmor),
        K::Ogre => list.add(HeavyClub),
        K::Bandit => list
            .add(Sword)
            .maybe_backup(0.3)
            .maybe(0.3, Torch)
            .maybe(0.05, Bow),
        K::Dwarf => list
            .choose(&[BattleAxe.into(), WarHammer.into()])
            .maybe_backup(0.6)
            .add(ChainArmor)
            .maybe(0.5, IronHelm)
            .maybe(0.3, IronBoots)
            .maybe(0.3, Torch)
            .gold(2, 6),
        K::DwarfBaron => list
            .choose(&[prefixed(BattleAxe), prefixed(WarHammer)])
            .backup()
            .healing()
            .add(ChainArmor)
            .add(IronBoots)
            .add(IronHelm)
            .maybe(0.3, Torch)
            .gold(80, 120),
        K::GnomeChief => list.add(Sword).backup(),
        K::VampireLord => list.add(Robe).add(IronStaff),
        K::ElfLord | K::DarkElfLord => list
            .add(prefixed(ElvenSword))
            .add(LeatherArmor)
            .add(ElvenBow)
            .gold(80, 120)
            .backup(),
        K::DarkElfWarrior => list.add(ElvenSword).add(LeatherArmor).gold(2, 6).backup(),
        K::ElfArcher => list
            .add(ElvenSword)
            .add(LeatherArmor)
            .add(Bow)
            .gold(2, 6)
            .backup(),
        K::Witch => list
            .add(Knife)
            .add(Potion(PotionEffect::Heal))
            .add(Potion(PotionEffect::Sleep))
            .add(Potion(PotionEffect::Slowed))
            .add(Potion(PotionEffect::Blind))
            .add(Potion(PotionEffect::Invisible))
            .add(Potion(PotionEffect::Poison))
            .add(Potion(PotionEffect::Speed)),
        K::HalloweenKid => list.add(BagOfCandies).add(HalloweenCostume),
        _ => list,
    };
    list.build()
}

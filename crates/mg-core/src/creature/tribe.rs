//! Factions and who hates whom

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::CreatureId;

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
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum TribeId {
    Player = 0,
    Keeper = 1,
    Human = 2,
    Elven = 3,
    Dwarven = 4,
    Greenskin = 5,
    #[default]
    Monster = 6,
    Pest = 7,
    Wildlife = 8,
    Peaceful = 9,
    Killer = 10,
}

impl TribeId {
    fn civilized(self) -> bool {
        matches!(
            self,
            TribeId::Player | TribeId::Keeper | TribeId::Human | TribeId::Elven | TribeId::Dwarven
        )
    }

    fn hates(self, other: TribeId) -> bool {
        match self {
            TribeId::Killer => true,
            TribeId::Monster => other.civilized() || other == TribeId::Peaceful,
            TribeId::Pest => other.civilized(),
            TribeId::Greenskin => other.civilized() && other != TribeId::Keeper,
            TribeId::Keeper => other == TribeId::Human,
            _ => false,
        }
    }

    /// Built-in hostility between two factions, symmetric
    pub fn is_hostile(self, other: TribeId) -> bool {
        self != other && (self.hates(other) || other.hates(self))
    }
}

/// Faction state that changes during play
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tribes {
    grudges: BTreeMap<TribeId, BTreeSet<CreatureId>>,
}

impl Tribes {
    pub fn new() -> Self {
        Self::default()
    }

    /// A member of `tribe` was robbed by `thief`
    pub fn on_items_stolen(&mut self, tribe: TribeId, thief: CreatureId) {
        log::debug!("tribe {} now holds a grudge against {:?}", tribe, thief);
        self.grudges.entry(tribe).or_default().insert(thief);
    }

    pub fn has_grudge(&self, tribe: TribeId, against: CreatureId) -> bool {
        self.grudges
            .get(&tribe)
            .is_some_and(|set| set.contains(&against))
    }

    /// Whether creature `a` of tribe `ta` treats `b` of tribe `tb` as an enemy
    pub fn is_enemy(&self, a: CreatureId, ta: TribeId, b: CreatureId, tb: TribeId) -> bool {
        if a == b {
            return false;
        }
        ta.is_hostile(tb) || self.has_grudge(ta, b) || self.has_grudge(tb, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostility_is_symmetric() {
        use strum::IntoEnumIterator;
        for a in TribeId::iter() {
            for b in TribeId::iter() {
                assert_eq!(a.is_hostile(b), b.is_hostile(a), "{} vs {}", a, b);
            }
            assert!(!a.is_hostile(a));
        }
    }

    #[test]
    fn test_monsters_hate_players() {
        assert!(TribeId::Monster.is_hostile(TribeId::Player));
        assert!(!TribeId::Peaceful.is_hostile(TribeId::Player));
    }

    #[test]
    fn test_theft_grudge() {
        let mut tribes = Tribes::new();
        let keeper = CreatureId(1);
        let thief = CreatureId(2);
        assert!(!tribes.is_enemy(keeper, TribeId::Peaceful, thief, TribeId::Player));
        tribes.on_items_stolen(TribeId::Peaceful, thief);
        assert!(tribes.is_enemy(keeper, TribeId::Peaceful, thief, TribeId::Player));
        assert!(tribes.is_enemy(thief, TribeId::Player, keeper, TribeId::Peaceful));
    }

    #[test]
    fn test_parse_tribe() {
        assert_eq!("Monster".parse::<TribeId>().unwrap(), TribeId::Monster);
    }
}

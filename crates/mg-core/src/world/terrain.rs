//! Terrain kinds and the movement traits needed to cross them

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

bitflags! {
    /// Ways a creature can get around
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MovementTraits: u8 {
        const WALK = 0x01;
        const SWIM = 0x02;
        const FLY = 0x04;
    }
}

/// Base layer of a map cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Floor = 0,
    Grass = 1,
    Wall = 2,
    Water = 3,
    Lava = 4,
    Chasm = 5,
}

impl Terrain {
    /// Traits any one of which lets a creature enter
    pub fn entry_traits(self) -> MovementTraits {
        match self {
            Terrain::Floor | Terrain::Grass => {
                MovementTraits::WALK | MovementTraits::FLY
            }
            Terrain::Water => MovementTraits::SWIM | MovementTraits::FLY,
            Terrain::Lava | Terrain::Chasm => MovementTraits::FLY,
            Terrain::Wall => MovementTraits::empty(),
        }
    }

    pub fn allows(self, traits: MovementTraits) -> bool {
        self.entry_traits().intersects(traits)
    }

    pub fn blocks_sight(self) -> bool {
        self == Terrain::Wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkers_and_swimmers() {
        assert!(Terrain::Floor.allows(MovementTraits::WALK));
        assert!(!Terrain::Water.allows(MovementTraits::WALK));
        assert!(Terrain::Water.allows(MovementTraits::WALK | MovementTraits::SWIM));
        assert!(!Terrain::Wall.allows(MovementTraits::all()));
        assert!(Terrain::Chasm.allows(MovementTraits::FLY));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Terrain::Wall.to_string(), "wall");
    }
}

//! Furniture: the middle layer of a cell that boulders can smash

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Ways a piece of furniture can be destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum DestroyAction {
    Boulder = 0,
    Bash = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum FurnitureKind {
    Door = 0,
    Barricade = 1,
    Tree = 2,
    Bed = 3,
    Stairs = 4,
    Pillar = 5,
}

impl FurnitureKind {
    pub fn blocks_movement(self) -> bool {
        matches!(
            self,
            FurnitureKind::Door | FurnitureKind::Barricade | FurnitureKind::Tree | FurnitureKind::Pillar
        )
    }

    pub fn blocks_sight(self) -> bool {
        matches!(self, FurnitureKind::Door | FurnitureKind::Tree | FurnitureKind::Pillar)
    }

    /// Effort needed to destroy this furniture, `None` if it cannot be
    pub fn strength(self, action: DestroyAction) -> Option<f64> {
        match (self, action) {
            (FurnitureKind::Door, DestroyAction::Boulder) => Some(100.0),
            (FurnitureKind::Door, DestroyAction::Bash) => Some(60.0),
            (FurnitureKind::Barricade, _) => Some(150.0),
            (FurnitureKind::Tree, DestroyAction::Boulder) => Some(300.0),
            (FurnitureKind::Bed, _) => Some(50.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Furniture {
    pub kind: FurnitureKind,
}

impl Furniture {
    pub fn new(kind: FurnitureKind) -> Self {
        Self { kind }
    }

    pub fn can_destroy(&self, action: DestroyAction) -> bool {
        self.kind.strength(action).is_some()
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}

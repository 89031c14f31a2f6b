//! Global game time

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Ticks since the world was created
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GameTime(pub u64);

impl GameTime {
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl Add<u64> for GameTime {
    type Output = GameTime;

    fn add(self, rhs: u64) -> GameTime {
        GameTime(self.0 + rhs)
    }
}

impl std::fmt::Display for GameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

//! Per-creature record of what it owes to whom

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CreatureId;

/// Amounts owed to creditors. Never negative; a creditor whose balance
/// drops to zero is forgotten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatureDebt {
    owed: BTreeMap<CreatureId, u32>,
}

impl CreatureDebt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the balance owed to `creditor`. Negative amounts pay it down.
    pub fn add(&mut self, creditor: CreatureId, amount: i64) {
        let current = self.amount_owed(creditor) as i64;
        let updated = (current + amount).max(0);
        if updated == 0 {
            self.owed.remove(&creditor);
        } else {
            self.owed.insert(creditor, updated.min(u32::MAX as i64) as u32);
        }
    }

    pub fn amount_owed(&self, creditor: CreatureId) -> u32 {
        self.owed.get(&creditor).copied().unwrap_or(0)
    }

    pub fn clear(&mut self, creditor: CreatureId) {
        self.owed.remove(&creditor);
    }

    pub fn total(&self) -> u64 {
        self.owed.values().map(|v| *v as u64).sum()
    }

    pub fn creditors(&self) -> impl Iterator<Item = CreatureId> + '_ {
        self.owed.keys().copied()
    }
}

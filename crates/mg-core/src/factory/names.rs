//! Personal names handed out to named creatures
//!
//! Each list is walked round-robin so that a fresh factory produces the same
//! sequence of names every run.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum NameGeneratorId {
    FirstMale,
    FirstFemale,
    Dwarf,
    Demon,
    Orc,
    Dog,
    Dragon,
    Vampire,
    Cyclops,
    Deity,
    World,
}

impl NameGeneratorId {
    fn pool(self) -> &'static [&'static str] {
        match self {
            NameGeneratorId::FirstMale => &[
                "Ulrich", "Bernard", "Aldo", "Tomas", "Gerd", "Konrad", "Lorenz", "Piotr",
            ],
            NameGeneratorId::FirstFemale => &[
                "Agnes", "Hilda", "Marta", "Ursula", "Edda", "Irma", "Sabine", "Wanda",
            ],
            NameGeneratorId::Dwarf => &["Durin", "Gror", "Thrain", "Balin", "Nar", "Frerin"],
            NameGeneratorId::Demon => &["Azgul", "Belphor", "Moloch", "Xaphan", "Zagan"],
            NameGeneratorId::Orc => &["Grishnak", "Lugdush", "Ufthak", "Shagrat", "Mauhur"],
            NameGeneratorId::Dog => &["Rex", "Fang", "Grip", "Wolfie", "Shadow"],
            NameGeneratorId::Dragon => &["Smaug", "Ancalagon", "Glaurung", "Scatha"],
            NameGeneratorId::Vampire => &["Vlad", "Carmilla", "Orlok", "Ruthven"],
            NameGeneratorId::Cyclops => &["Polyphemus", "Arges", "Brontes", "Steropes"],
            NameGeneratorId::Deity => &["Lumen", "Astra", "Solis", "Mira"],
            NameGeneratorId::World => &["Ardel", "Kesmar", "Valdor", "Ostrava"],
        }
    }
}

/// Round-robin name source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameGenerator {
    cursors: HashMap<NameGeneratorId, usize>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next name from the given list
    pub fn next(&mut self, id: NameGeneratorId) -> String {
        let pool = id.pool();
        let cursor = self.cursors.entry(id).or_insert(0);
        let name = pool[*cursor % pool.len()];
        *cursor += 1;
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_round_robin() {
        let mut names = NameGenerator::new();
        let first = names.next(NameGeneratorId::Dog);
        for _ in 1..NameGeneratorId::Dog.pool().len() {
            assert_ne!(names.next(NameGeneratorId::Dog), first);
        }
        assert_eq!(names.next(NameGeneratorId::Dog), first);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut names = NameGenerator::new();
        let male = names.next(NameGeneratorId::FirstMale);
        assert_eq!(names.next(NameGeneratorId::FirstFemale), "Agnes");
        assert_eq!(male, "Ulrich");
    }

    #[test]
    fn test_every_pool_nonempty() {
        for id in NameGeneratorId::iter() {
            assert!(!id.pool().is_empty(), "{} has no names", id);
        }
    }
}

//! mg-save: save/restore of a menagerie [`World`]
//!
//! A save file is a JSON document holding a small header (magic, format
//! version, tick, creature count, timestamp) followed by the whole world,
//! controllers included. Loading checks the header before trusting the rest.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mg_core::World;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// World tick at save time
    pub tick: u64,
    /// Creatures in the arena, dead ones included
    pub creatures: usize,
    pub saved_at: DateTime<Utc>,
}

impl SaveHeader {
    const MAGIC: &'static str = "MGRS";

    pub fn new(world: &World) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            tick: world.time().0,
            creatures: world.creatures().count(),
            saved_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub world: World,
}

/// Header-only view used when listing saves
#[derive(Deserialize)]
struct HeaderOnly {
    header: SaveHeader,
}

/// Save a world to a file
pub fn save_world(world: &World, path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let header = SaveHeader::new(world);
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(
        writer,
        &SaveFileRef {
            header: &header,
            world,
        },
    )?;
    log::info!(
        "saved tick {} ({} creatures) to {}",
        header.tick,
        header.creatures,
        path.as_ref().display()
    );
    Ok(header)
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: &'a SaveHeader,
    world: &'a World,
}

/// Load a world from a file
pub fn load_world(path: impl AsRef<Path>) -> Result<World, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;

    save_file.header.validate()?;
    Ok(save_file.world)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: HeaderOnly = serde_json::from_reader(reader)?;
    save_file.header.validate()?;
    Ok(save_file.header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

fn save_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("menagerie");
    path.push("saves");
    path
}

/// Default save path for a named run
pub fn default_save_path(name: &str) -> PathBuf {
    let mut path = save_dir();
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", name));
    path
}

/// List all save files in the default save directory, newest first
pub fn list_saves() -> Result<Vec<(PathBuf, SaveHeader)>, SaveError> {
    let path = save_dir();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "json") {
            if let Ok(header) = load_header(&path) {
                saves.push((path, header));
            }
        }
    }

    saves.sort_by(|a, b| b.1.saved_at.cmp(&a.1.saved_at));
    Ok(saves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::controller::{Controller, ShopkeeperController};
    use mg_core::{
        CreatureFactory, GameTime, Level, LevelId, Position, Rect, ScriptedRng, TribeId, Vec2,
    };

    fn shop_world() -> World {
        let mut world = World::new();
        world.add_level(Level::walled("market", 12, 8));
        let mut factory = CreatureFactory::new();
        let mut rng = ScriptedRng::default();
        let keeper = factory.shopkeeper(Rect::new(1, 1, 4, 4), TribeId::Peaceful, &mut rng);
        world
            .add_creature(keeper, Position::new(LevelId(0), Vec2::new(1, 1)))
            .unwrap();
        world.set_time(GameTime(12));
        world
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("mg_save_test_world.json");

        let world = shop_world();
        let header = save_world(&world, &path).unwrap();
        assert!(save_exists(&path));
        assert_eq!(header.tick, 12);
        assert_eq!(header.creatures, 1);

        let loaded = load_world(&path).unwrap();
        assert_eq!(loaded.time(), GameTime(12));
        let keeper = loaded.creatures().next().unwrap();
        assert!(matches!(
            keeper.controller(),
            Some(Controller::Shopkeeper(s)) if *s == ShopkeeperController::new(Rect::new(1, 1, 4, 4))
        ));
        assert_eq!(load_header(&path).unwrap(), header);

        delete_save(&path).unwrap();
        assert!(!save_exists(&path));
    }

    #[test]
    fn test_header_validation() {
        let header = SaveHeader::new(&World::new());

        assert!(header.validate().is_ok());

        let mut bad_header = header.clone();
        bad_header.magic = "XXXX".to_string();
        assert!(matches!(
            bad_header.validate(),
            Err(SaveError::InvalidHeader)
        ));

        let mut old_header = header;
        old_header.version = 999;
        assert!(matches!(
            old_header.validate(),
            Err(SaveError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_world("/nonexistent/path/save.json");
        assert!(matches!(result, Err(SaveError::NotFound)));
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let path = std::env::temp_dir().join("mg_save_test_garbage.json");
        std::fs::write(&path, "{\"header\": 3}").unwrap();
        assert!(matches!(
            load_header(&path),
            Err(SaveError::Serialization(_))
        ));
        std::fs::remove_file(&path).ok();
    }
}

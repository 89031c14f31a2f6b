//! Engine options
//!
//! Options are read from a JSON file. Missing fields fall back to their
//! defaults, so `{}` is a valid options file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MESSAGE_LIMIT;
use crate::rng::GameRng;
use crate::world::{ConfigError, World};

/// Tunable settings for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// How many messages the world keeps
    pub message_limit: usize,
    /// Ticks to simulate
    pub ticks: u32,
    /// Echo the message log when the run ends
    pub print_messages: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            message_limit: DEFAULT_MESSAGE_LIMIT,
            ticks: 50,
            print_messages: true,
        }
    }
}

impl EngineOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse options from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(contents)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.message_limit == 0 {
            return Err(ConfigError::Invalid {
                name: "message_limit".to_string(),
                reason: "must keep at least one message".to_string(),
            });
        }
        if self.ticks == 0 {
            return Err(ConfigError::Invalid {
                name: "ticks".to_string(),
                reason: "must simulate at least one tick".to_string(),
            });
        }
        Ok(())
    }

    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }

    /// Empty world honoring these options
    pub fn world(&self) -> World {
        World::with_message_limit(self.message_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let options = EngineOptions::from_json("{}").unwrap();
        assert_eq!(options, EngineOptions::default());
    }

    #[test]
    fn test_partial_override() {
        let options = EngineOptions::from_json(r#"{"seed": 7, "ticks": 3}"#).unwrap();
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.ticks, 3);
        assert_eq!(options.message_limit, DEFAULT_MESSAGE_LIMIT);
        assert_eq!(options.rng().seed(), 7);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineOptions::from_json(r#"{"message_limit": 0}"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            EngineOptions::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("mg-core-no-such-options.json");
        assert!(matches!(
            EngineOptions::load_from_file(&path),
            Err(ConfigError::Io(_))
        ));
    }
}

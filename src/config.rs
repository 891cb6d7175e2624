//! Runtime configuration, built from the command line in `main.rs`.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
/// Size of the first-generation catalog.
pub const DEFAULT_MAX_ID: u16 = 151;
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings the reducer needs; stored in state so snapshots carry them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GameConfig {
    /// Identifiers are drawn from `[1, max_id]`.
    pub max_id: u16,
    /// Hide sprite colors until the round is guessed.
    pub silhouette: bool,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_id: DEFAULT_MAX_ID,
            silhouette: false,
            seed: 0,
        }
    }
}

/// Settings for the HTTP client talking to the creature catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Language code whose species name becomes the localized name.
    pub language: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn species_url(&self, id: u16) -> String {
        format!("{}/pokemon-species/{id}", self.base())
    }

    pub fn pokemon_url(&self, id: u16) -> String {
        format!("{}/pokemon/{id}", self.base())
    }

    pub fn index_url(&self, limit: u16) -> String {
        format!("{}/pokemon?limit={limit}", self.base())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

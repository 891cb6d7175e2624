//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::sprite::{self, SpriteData};
use crate::state::{Ability, BaseStats, Creature, CreatureType, Sprites, StatKind};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("sprite decode failed: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    sprites: serde_json::Value,
    stats: Vec<PokemonStatSlot>,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    names: Vec<LocalizedName>,
}

#[derive(Clone, Debug, Deserialize)]
struct LocalizedName {
    name: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

/// Typed access to the creature catalog.
#[derive(Clone, Debug)]
pub struct PokeApi {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl PokeApi {
    pub fn new(config: ProviderConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub async fn fetch_creature(&self, id: u16) -> Result<Creature, ApiError> {
        let response: PokemonResponse = self.fetch_json(&self.config.pokemon_url(id)).await?;
        creature_from_response(response)
    }

    /// Name in the configured language, if the species lists one.
    pub async fn fetch_localized_name(&self, id: u16) -> Result<Option<String>, ApiError> {
        let response: SpeciesResponse = self.fetch_json(&self.config.species_url(id)).await?;
        Ok(localized_name(&response, &self.config.language))
    }

    pub async fn fetch_name_index(&self, limit: u16) -> Result<Vec<String>, ApiError> {
        let response: ListResponse = self.fetch_json(&self.config.index_url(limit)).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| entry.name.to_lowercase())
            .collect())
    }

    pub async fn fetch_sprite(&self, url: &str) -> Result<SpriteData, ApiError> {
        let bytes = self.fetch_bytes(url).await?;
        sprite::decode_sprite(&bytes)
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for PokeApi {
    fn default() -> Self {
        Self {
            config: ProviderConfig::default(),
            client: reqwest::Client::new(),
        }
    }
}

static PROVIDER: OnceLock<PokeApi> = OnceLock::new();

/// Install the configured client. Only the first call wins.
pub fn install(api: PokeApi) {
    if PROVIDER.set(api).is_err() {
        tracing::warn!("provider already installed; keeping the first one");
    }
}

pub fn provider() -> &'static PokeApi {
    PROVIDER.get_or_init(PokeApi::default)
}

fn creature_from_response(response: PokemonResponse) -> Result<Creature, ApiError> {
    let mut stats = BaseStats::default();
    for kind in StatKind::ALL {
        let slot = response
            .stats
            .iter()
            .find(|slot| slot.stat.name == kind.api_name())
            .ok_or_else(|| ApiError::Malformed(format!("missing stat {}", kind.api_name())))?;
        let value = u8::try_from(slot.base_stat).map_err(|_| {
            ApiError::Malformed(format!("{} out of range: {}", kind.api_name(), slot.base_stat))
        })?;
        stats.set(kind, value);
    }

    let types = response
        .types
        .iter()
        .map(|slot| {
            CreatureType::from_name(&slot.kind.name)
                .ok_or_else(|| ApiError::Malformed(format!("unknown type {}", slot.kind.name)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if types.is_empty() {
        return Err(ApiError::Malformed(format!("{} has no types", response.name)));
    }

    let front = pointer_string(&response.sprites, "/front_default")
        .ok_or_else(|| ApiError::Malformed(format!("{} has no front sprite", response.name)))?;

    Ok(Creature {
        id: response.id,
        name: response.name.to_lowercase(),
        localized_name: None,
        sprites: Sprites {
            front,
            back: pointer_string(&response.sprites, "/back_default"),
            shiny: pointer_string(&response.sprites, "/front_shiny"),
        },
        stats,
        types,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| Ability {
                name: slot.ability.name,
                hidden: slot.is_hidden,
            })
            .collect(),
        height: response.height,
        weight: response.weight,
    })
}

fn localized_name(response: &SpeciesResponse, language: &str) -> Option<String> {
    response
        .names
        .iter()
        .find(|entry| entry.language.name == language)
        .map(|entry| entry.name.clone())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

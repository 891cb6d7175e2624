//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::autocomplete::NameIndex;
use crate::config::GameConfig;
use crate::rng::RoundRng;
use crate::sprite::SpriteData;

/// Virtual clock resolution. One `Action::Tick` advances time by this much.
pub const TICK_MS: u64 = 50;
pub const ERROR_FLASH_TICKS: u64 = 600 / TICK_MS;
pub const VICTORY_FLASH_TICKS: u64 = 1500 / TICK_MS;

pub const CORRECT_REWARD: u32 = 100;
pub const SKIP_PENALTY: u32 = 50;

/// The 18 elemental categories a creature can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl CreatureType {
    pub const ALL: [CreatureType; 18] = [
        CreatureType::Normal,
        CreatureType::Fire,
        CreatureType::Water,
        CreatureType::Electric,
        CreatureType::Grass,
        CreatureType::Ice,
        CreatureType::Fighting,
        CreatureType::Poison,
        CreatureType::Ground,
        CreatureType::Flying,
        CreatureType::Psychic,
        CreatureType::Bug,
        CreatureType::Rock,
        CreatureType::Ghost,
        CreatureType::Dragon,
        CreatureType::Dark,
        CreatureType::Steel,
        CreatureType::Fairy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CreatureType::Normal => "normal",
            CreatureType::Fire => "fire",
            CreatureType::Water => "water",
            CreatureType::Electric => "electric",
            CreatureType::Grass => "grass",
            CreatureType::Ice => "ice",
            CreatureType::Fighting => "fighting",
            CreatureType::Poison => "poison",
            CreatureType::Ground => "ground",
            CreatureType::Flying => "flying",
            CreatureType::Psychic => "psychic",
            CreatureType::Bug => "bug",
            CreatureType::Rock => "rock",
            CreatureType::Ghost => "ghost",
            CreatureType::Dragon => "dragon",
            CreatureType::Dark => "dark",
            CreatureType::Steel => "steel",
            CreatureType::Fairy => "fairy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    /// Name used by the provider's `stats[].stat.name` field.
    pub fn api_name(&self) -> &'static str {
        match self {
            StatKind::Hp => "hp",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::SpecialAttack => "special-attack",
            StatKind::SpecialDefense => "special-defense",
            StatKind::Speed => "speed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Atk",
            StatKind::Defense => "Def",
            StatKind::SpecialAttack => "SpA",
            StatKind::SpecialDefense => "SpD",
            StatKind::Speed => "Spe",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u8) {
        match kind {
            StatKind::Hp => self.hp = value,
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::SpecialAttack => self.special_attack = value,
            StatKind::SpecialDefense => self.special_defense = value,
            StatKind::Speed => self.speed = value,
        }
    }

    /// All six stats in display order.
    pub fn entries(&self) -> [(StatKind, u8); 6] {
        StatKind::ALL.map(|kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u16 {
        self.entries().iter().map(|(_, value)| *value as u16).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Sprites {
    pub front: String,
    pub back: Option<String>,
    pub shiny: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

/// A creature as served by the provider, immutable for the round apart from
/// the localized name which arrives from a second request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Creature {
    pub id: u16,
    pub name: String,
    pub localized_name: Option<String>,
    pub sprites: Sprites,
    pub stats: BaseStats,
    pub types: Vec<CreatureType>,
    pub abilities: Vec<Ability>,
    pub height: u16,
    pub weight: u16,
}

impl Creature {
    pub fn display_name(&self) -> &str {
        self.localized_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreState {
    pub score: u32,
    pub streak: u32,
}

impl ScoreState {
    pub fn reward(&mut self) {
        self.score = self.score.saturating_add(CORRECT_REWARD);
        self.streak = self.streak.saturating_add(1);
    }

    /// Skipping costs points (never below zero) and the streak.
    pub fn penalize_skip(&mut self) {
        self.score = self.score.saturating_sub(SKIP_PENALTY);
        self.streak = 0;
    }

    pub fn break_streak(&mut self) {
        self.streak = 0;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputState {
    pub text: String,
    pub candidates: Vec<String>,
    pub highlighted: Option<usize>,
}

impl InputState {
    pub fn clear(&mut self) {
        self.text.clear();
        self.candidates.clear();
        self.highlighted = None;
    }

    pub fn highlighted_candidate(&self) -> Option<&str> {
        self.highlighted
            .and_then(|index| self.candidates.get(index))
            .map(String::as_str)
    }
}

/// Where the current round sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RoundPhase {
    Idle,
    Loading,
    Loaded,
    Guessed,
    Failed,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Config", label = "Game", debug_fmt)]
    pub config: GameConfig,

    /// Creature lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Round", label = "Creature", debug_fmt)]
    pub round: DataResource<Creature>,

    /// Monotonic round counter; async results carry the value they were issued for.
    #[debug(section = "Round", label = "Sequence")]
    pub round_seq: u64,

    /// Rounds drawn so far; retries of a failed round do not count.
    #[debug(section = "Round", label = "Number")]
    pub round_number: u32,

    #[debug(section = "Round", label = "Id", debug_fmt)]
    pub round_id: Option<u16>,

    #[debug(section = "Round", label = "Guessed")]
    pub guessed: bool,

    #[debug(section = "Round", label = "Stats revealed")]
    pub stats_revealed: bool,

    /// Tick at which the incorrect-guess flash ends.
    #[debug(section = "Round", label = "Error until", debug_fmt)]
    pub error_until: Option<u64>,

    /// Tick at which the victory flash ends.
    #[debug(section = "Round", label = "Victory until", debug_fmt)]
    pub victory_until: Option<u64>,

    #[debug(skip)]
    pub sprite: Option<SpriteData>,

    #[debug(section = "Score", label = "Score", debug_fmt)]
    pub score: ScoreState,

    #[debug(skip)]
    pub name_index: DataResource<NameIndex>,

    #[debug(section = "Input", label = "Input", debug_fmt)]
    pub input: InputState,

    #[debug(skip)]
    pub rng: RoundRng,

    #[debug(section = "Round", label = "Tick")]
    pub tick: u64,

    /// Last non-fatal diagnostic shown in the status line.
    #[debug(section = "Round", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        let rng = RoundRng::new(config.seed);
        Self {
            config,
            round: DataResource::Empty,
            round_seq: 0,
            round_number: 0,
            round_id: None,
            guessed: false,
            stats_revealed: false,
            error_until: None,
            victory_until: None,
            sprite: None,
            score: ScoreState::default(),
            name_index: DataResource::Empty,
            input: InputState::default(),
            rng,
            tick: 0,
            message: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        match &self.round {
            DataResource::Empty => RoundPhase::Idle,
            DataResource::Loading => RoundPhase::Loading,
            DataResource::Failed(_) => RoundPhase::Failed,
            DataResource::Loaded(_) if self.guessed => RoundPhase::Guessed,
            DataResource::Loaded(_) => RoundPhase::Loaded,
        }
    }

    pub fn creature(&self) -> Option<&Creature> {
        self.round.data()
    }

    pub fn is_transitioning(&self) -> bool {
        self.round.is_loading()
    }

    pub fn show_error(&self) -> bool {
        self.error_until.is_some()
    }

    pub fn show_victory(&self) -> bool {
        self.victory_until.is_some()
    }

    /// Statistics are only ever shown for a loaded creature.
    pub fn revealed_creature(&self) -> Option<&Creature> {
        if self.stats_revealed {
            self.creature()
        } else {
            None
        }
    }

    pub fn can_skip(&self) -> bool {
        matches!(self.phase(), RoundPhase::Loading | RoundPhase::Loaded)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_penalty_floors_at_zero() {
        let mut score = ScoreState {
            score: 30,
            streak: 4,
        };
        score.penalize_skip();
        assert_eq!(score, ScoreState::default());
    }

    #[test]
    fn test_reward_is_independent_of_streak() {
        for streak in [0, 1, 7, 100] {
            let mut score = ScoreState { score: 250, streak };
            score.reward();
            assert_eq!(score.score, 350);
            assert_eq!(score.streak, streak + 1);
        }
    }

    #[test]
    fn test_creature_type_lookup() {
        assert_eq!(CreatureType::from_name("fire"), Some(CreatureType::Fire));
        assert_eq!(CreatureType::from_name("FAIRY"), Some(CreatureType::Fairy));
        assert_eq!(CreatureType::from_name("stellar"), None);
        assert_eq!(CreatureType::ALL.len(), 18);
    }

    #[test]
    fn test_phase_follows_round_resource() {
        let mut state = AppState::default();
        assert_eq!(state.phase(), RoundPhase::Idle);

        state.round = DataResource::Loading;
        assert_eq!(state.phase(), RoundPhase::Loading);
        assert!(state.is_transitioning());

        state.round = DataResource::Failed("timeout".into());
        assert_eq!(state.phase(), RoundPhase::Failed);
        assert!(!state.can_skip());
    }

    #[test]
    fn test_flash_durations() {
        assert_eq!(ERROR_FLASH_TICKS * TICK_MS, 600);
        assert!(VICTORY_FLASH_TICKS > ERROR_FLASH_TICKS);
    }
}

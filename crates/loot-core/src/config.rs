//! Configuration loading for the reward catalog.
//!
//! All catalog entries and trigger settings are loaded from a TOML
//! configuration file. Every field has a default so partial configs
//! stay valid; validation that can reject an entry (weights, material
//! tokens) happens in the catalog load pass, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::reward::RewardKind;

/// Complete reward configuration: global settings plus one table per
/// reward id under `[rewards.<id>]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    pub settings: SettingsConfig,
    /// Keyed by reward id. BTreeMap keeps load order deterministic.
    pub rewards: BTreeMap<String, RewardEntry>,
}

impl RewardsConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Trigger-side settings: where rewards may fire and how often.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SettingsConfig {
    /// Which zone backend gates triggering.
    pub zone_mode: ZoneMode,
    /// Region name checked when `zone_mode = "region"`.
    pub region: String,
    /// World whitelist for `zone_mode = "world-list"`; empty = allow all.
    pub allowed_worlds: Vec<String>,
    /// Per-actor cooldown between rewarded triggers; 0 disables it.
    pub cooldown_seconds: u64,
    /// Ability key that unlocks gated rewards and the luck bonus.
    pub gated_ability: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            zone_mode: ZoneMode::Region,
            region: "warzone".to_string(),
            allowed_worlds: Vec::new(),
            cooldown_seconds: 0,
            gated_ability: "masked_rewards".to_string(),
        }
    }
}

/// Zone classification backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneMode {
    /// Membership in a named region of an external claim system.
    #[default]
    Region,
    /// Membership in the configured world list.
    WorldList,
    /// No zone gating at all.
    AllowAll,
}

/// One raw reward entry as written in config. The catalog load pass
/// turns this into a [`crate::Reward`] or rejects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RewardEntry {
    pub kind: RewardKind,
    /// Item-type token; required unless `kind = "command"`.
    pub material: String,
    pub display_name: String,
    pub amount: u32,
    pub lore: Vec<String>,
    /// Base selection weight. Entries with a non-positive weight are
    /// skipped at load time.
    pub weight: f64,
    /// Rarity token, parsed case-insensitively; unknown tokens fall
    /// back to COMMON with a warning.
    pub rarity: String,
    pub required_level: u32,
    pub requires_ability: bool,
    pub title: String,
    pub subtitle: String,
    pub sound: String,
    pub sound_pitch: f32,
    pub sound_volume: f32,
    pub commands: Vec<String>,
    pub broadcast: bool,
    pub broadcast_message: String,
}

impl Default for RewardEntry {
    fn default() -> Self {
        Self {
            kind: RewardKind::Item,
            material: String::new(),
            display_name: String::new(),
            amount: 1,
            lore: Vec::new(),
            weight: 1.0,
            rarity: "COMMON".to_string(),
            required_level: 0,
            requires_ability: false,
            title: "&3You found something!".to_string(),
            subtitle: "&b{item}".to_string(),
            sound: "note_pling".to_string(),
            sound_pitch: 1.0,
            sound_volume: 1.0,
            commands: Vec::new(),
            broadcast: false,
            broadcast_message: "&3&l[LOOT] &b{player} &ffound a {rarity_color}{item}&f!"
                .to_string(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug, thiserror::Error)]
#[error("TOML serialize error: {0}")]
pub struct TomlSerializeError(#[source] pub toml::ser::Error);

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Reward configuration

[settings]
zone-mode = "region"        # region | world-list | allow-all
region = "warzone"
allowed-worlds = []
cooldown-seconds = 0
gated-ability = "masked_rewards"

[rewards.raw_fish]
material = "RAW_FISH"
weight = 40.0
rarity = "COMMON"
title = "&3You found something!"
subtitle = "&b{item}"

[rewards.pufferfish]
material = "PUFFERFISH"
display-name = "&aPlump Pufferfish"
weight = 20.0
rarity = "UNCOMMON"

[rewards.prismarine_crystal]
material = "PRISMARINE_CRYSTALS"
display-name = "&3Prismarine Crystal"
weight = 8.0
rarity = "RARE"
lore = ["&7Still humming with sea light."]

[rewards.crate_key]
kind = "command"
display-name = "&5Sunken Crate Key"
weight = 3.0
rarity = "EPIC"
commands = ["crates give {player} sunken 1"]
broadcast = true

[rewards.guardian_idol]
material = "SKULL_ITEM"
kind = "custom"
display-name = "&6Guardian Idol"
weight = 1.0
rarity = "LEGENDARY"
required-level = 10
broadcast = true

[rewards.masked_relic]
material = "SKULL_ITEM"
kind = "custom"
display-name = "&6Masked Relic"
weight = 0.5
rarity = "MASKED"
requires-ability = true
broadcast = true
"#
    .to_string()
}

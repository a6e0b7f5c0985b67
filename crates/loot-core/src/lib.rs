//! Weighted reward distribution for triggered game events.
//!
//! A catalog of rewards is loaded once from configuration; each
//! triggering action runs a zone check and then one weighted draw,
//! with per-actor weight adjustments fed by an optional external
//! progression provider that may not be installed at all.
//!
//! ```text
//! trigger ──▶ ZoneClassifier ──▶ SelectionEngine ──▶ Reward
//!                                       ▲
//!                               CapabilityBridge
//!                            (optional provider, or
//!                             neutral defaults)
//! ```
//!
//! # Modules
//!
//! - [`reward`]: rarity tiers, payload descriptors, the reward value
//! - [`config`]: TOML configuration surface
//! - [`catalog`]: load pass, catalog snapshots, reload handle
//! - [`bridge`]: probe-once adapter over the optional provider
//! - [`engine`]: adjusted weights and the weighted draw
//! - [`zone`]: location eligibility backends
//! - [`trigger`]: the per-event flow tying it all together
//! - [`format`]: pure message formatting helpers

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod format;
pub mod reward;
pub mod trigger;
pub mod zone;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use bridge::{CapabilityBridge, ProgressionProvider, ProviderError};
pub use catalog::{CatalogHandle, LoadError, LoadReport, RewardCatalog};
pub use config::{
    default_config_toml, ConfigError, RewardEntry, RewardsConfig, SettingsConfig, ZoneMode,
};
pub use engine::{
    luck_multiplier, tier_multiplier, ActorState, SelectionEngine, DEFAULT_GATED_ABILITY,
    LEVEL_CAP, PER_LEVEL_BONUS,
};
pub use format::{
    display_item_name, expand_placeholders, format_rarity, rarity_color, strip_color,
};
pub use reward::{Actor, Rarity, Reward, RewardKind, RewardPayload};
pub use trigger::{GrantedReward, TriggerFlow, TriggerOutcome};
pub use zone::{Location, RegionProvider, ZoneClassifier};

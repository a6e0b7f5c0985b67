//! Reward model: rarity tiers, payload descriptors, and the immutable
//! reward value the catalog hands out.

use serde::{Deserialize, Serialize};

/// Rarity tier of a reward.
///
/// Tiers are only a lookup key for weight-multiplier rules; selection
/// never orders by tier. `Masked` is the gated tier: rewards carrying
/// it are unreachable without the gated ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Masked,
}

impl Rarity {
    /// Parses a rarity token case-insensitively. Returns `None` for
    /// unrecognized tokens; the load pass decides the fallback.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "COMMON" => Some(Rarity::Common),
            "UNCOMMON" => Some(Rarity::Uncommon),
            "RARE" => Some(Rarity::Rare),
            "EPIC" => Some(Rarity::Epic),
            "LEGENDARY" => Some(Rarity::Legendary),
            "MASKED" => Some(Rarity::Masked),
            _ => None,
        }
    }

    /// Canonical uppercase name, as it appears in config and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Masked => "MASKED",
        }
    }

    /// All tiers in ascending order.
    pub fn all() -> [Rarity; 6] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Masked,
        ]
    }
}

/// What kind of payload a reward carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RewardKind {
    /// A plain item described by its material token.
    #[default]
    Item,
    /// An item with extra descriptor data (textures, markers).
    Custom,
    /// Side-effect commands only; no item is produced.
    Command,
}

impl RewardKind {
    /// Command-only rewards have no item descriptor to resolve.
    pub fn needs_material(&self) -> bool {
        !matches!(self, RewardKind::Command)
    }
}

/// Everything the engine treats as opaque: the item descriptor,
/// side-effect commands, and display templates. Stored verbatim from
/// config; only the trigger flow and formatting helpers read it.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPayload {
    pub kind: RewardKind,
    pub material: String,
    pub display_name: String,
    pub amount: u32,
    pub lore: Vec<String>,
    pub title: String,
    pub subtitle: String,
    pub sound: String,
    pub sound_pitch: f32,
    pub sound_volume: f32,
    pub commands: Vec<String>,
    pub broadcast: bool,
    pub broadcast_message: String,
}

/// A single catalog entry: base selection weight plus gating rules.
///
/// Immutable after the load pass. Reloads replace the whole catalog
/// snapshot rather than mutating rewards in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub id: String,
    pub base_weight: f64,
    pub rarity: Rarity,
    /// Minimum actor level; 0 means no requirement.
    pub required_level: u32,
    /// Hard gate: without the gated ability this reward cannot be drawn.
    pub requires_ability: bool,
    pub payload: RewardPayload,
}

impl Reward {
    /// Case-insensitive id comparison, the catalog's uniqueness rule.
    pub fn id_matches(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }
}

/// The actor a trigger fires for. Progression data is never stored
/// here; the bridge is queried fresh on every selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_parse_case_insensitive() {
        assert_eq!(Rarity::parse("legendary"), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("Rare"), Some(Rarity::Rare));
        assert_eq!(Rarity::parse("MASKED"), Some(Rarity::Masked));
        assert_eq!(Rarity::parse("mythic"), None);
    }

    #[test]
    fn test_rarity_name_round_trips() {
        for rarity in Rarity::all() {
            assert_eq!(Rarity::parse(rarity.name()), Some(rarity));
        }
    }

    #[test]
    fn test_command_kind_needs_no_material() {
        assert!(RewardKind::Item.needs_material());
        assert!(RewardKind::Custom.needs_material());
        assert!(!RewardKind::Command.needs_material());
    }

    #[test]
    fn test_id_matches_ignores_case() {
        let reward = Reward {
            id: "Elder_Guardian_Head".to_string(),
            base_weight: 1.0,
            rarity: Rarity::Legendary,
            required_level: 0,
            requires_ability: false,
            payload: RewardPayload {
                kind: RewardKind::Item,
                material: "SKULL_ITEM".to_string(),
                display_name: String::new(),
                amount: 1,
                lore: vec![],
                title: String::new(),
                subtitle: String::new(),
                sound: String::new(),
                sound_pitch: 1.0,
                sound_volume: 1.0,
                commands: vec![],
                broadcast: false,
                broadcast_message: String::new(),
            },
        };
        assert!(reward.id_matches("elder_guardian_head"));
        assert!(!reward.id_matches("guardian_head"));
    }
}

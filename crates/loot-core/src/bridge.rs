//! Capability bridge to an optional external progression provider.
//!
//! The provider (if one exists at all) supplies per-actor level,
//! ability possession, and ability bonus data. The bridge probes for
//! it once at construction and degrades to constant neutral answers
//! when it is absent or misbehaving: selection must run identically
//! with or without it, and no query on this boundary ever fails.

use std::fmt;

/// A fault reported by (or on behalf of) an external provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider exists but is not in a usable state.
    #[error("provider unavailable")]
    Unavailable,
    /// The provider answered in a way that violates its contract.
    #[error("provider contract violation: {0}")]
    Contract(String),
}

/// Read-only query surface an external progression system must bind.
///
/// Implementations adapt a concrete external system; test doubles
/// live in [`crate::fixtures`]. Every method is fallible so adapter
/// faults surface as values, to be absorbed by the bridge.
pub trait ProgressionProvider: Send + Sync {
    /// Structural self-check, called once at discovery. An `Err`
    /// permanently disables the bridge built over this provider.
    fn probe(&self) -> Result<(), ProviderError>;

    /// The actor's progression level.
    fn level(&self, actor: &str) -> Result<u32, ProviderError>;

    /// Whether the actor currently holds the named ability.
    fn has_ability(&self, actor: &str, ability: &str) -> Result<bool, ProviderError>;

    /// Percent bonus granted by the named ability, 0 if none.
    fn ability_bonus_percent(&self, actor: &str, ability: &str) -> Result<u32, ProviderError>;
}

/// Bridge over an optional [`ProgressionProvider`].
///
/// Two states for its whole lifetime, fixed at [`discover`] time:
/// `Enabled` (a provider passed its probe) or `Disabled` (no provider,
/// or the probe failed). A fresh discovery requires constructing a new
/// bridge, e.g. on reload. All queries are total:
///
/// - [`level`] is 1 when disabled or on any query fault
/// - [`has_ability`] is `false` when disabled or on any query fault
/// - [`ability_bonus_percent`] is 0 when disabled or on any query fault
///
/// The defaults are the conservative "no bonus, no special access"
/// baseline, so a provider fault can only ever withhold bonuses.
///
/// [`discover`]: CapabilityBridge::discover
/// [`level`]: CapabilityBridge::level
/// [`has_ability`]: CapabilityBridge::has_ability
/// [`ability_bonus_percent`]: CapabilityBridge::ability_bonus_percent
pub struct CapabilityBridge {
    provider: Option<Box<dyn ProgressionProvider>>,
}

impl CapabilityBridge {
    /// A bridge with no provider: every query returns its neutral
    /// default.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Probes the given provider (if any) and binds it only when the
    /// probe succeeds.
    pub fn discover(provider: Option<Box<dyn ProgressionProvider>>) -> Self {
        match provider {
            None => {
                tracing::info!("no progression provider found; level-based luck disabled");
                Self::disabled()
            }
            Some(provider) => match provider.probe() {
                Ok(()) => {
                    tracing::info!("progression provider hooked; level-based luck enabled");
                    Self {
                        provider: Some(provider),
                    }
                }
                Err(err) => {
                    tracing::warn!("progression provider failed probe: {}", err);
                    Self::disabled()
                }
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// The actor's level; 1 ("no information") when disabled or on a
    /// query fault.
    pub fn level(&self, actor: &str) -> u32 {
        match &self.provider {
            Some(provider) => provider.level(actor).unwrap_or(1),
            None => 1,
        }
    }

    /// Whether the actor holds the ability; `false` when disabled or
    /// on a query fault.
    pub fn has_ability(&self, actor: &str, ability: &str) -> bool {
        match &self.provider {
            Some(provider) => provider.has_ability(actor, ability).unwrap_or(false),
            None => false,
        }
    }

    /// The ability's percent bonus; 0 when disabled or on a query
    /// fault.
    pub fn ability_bonus_percent(&self, actor: &str, ability: &str) -> u32 {
        match &self.provider {
            Some(provider) => provider
                .ability_bonus_percent(actor, ability)
                .unwrap_or(0),
            None => 0,
        }
    }
}

impl fmt::Debug for CapabilityBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityBridge")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Default for CapabilityBridge {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HealthyProvider;

    impl ProgressionProvider for HealthyProvider {
        fn probe(&self) -> Result<(), ProviderError> {
            Ok(())
        }
        fn level(&self, _actor: &str) -> Result<u32, ProviderError> {
            Ok(9)
        }
        fn has_ability(&self, _actor: &str, ability: &str) -> Result<bool, ProviderError> {
            Ok(ability == "masked_rewards")
        }
        fn ability_bonus_percent(&self, _actor: &str, _ability: &str) -> Result<u32, ProviderError> {
            Ok(25)
        }
    }

    struct BrokenProbe;

    impl ProgressionProvider for BrokenProbe {
        fn probe(&self) -> Result<(), ProviderError> {
            Err(ProviderError::Unavailable)
        }
        fn level(&self, _actor: &str) -> Result<u32, ProviderError> {
            Ok(99)
        }
        fn has_ability(&self, _actor: &str, _ability: &str) -> Result<bool, ProviderError> {
            Ok(true)
        }
        fn ability_bonus_percent(&self, _actor: &str, _ability: &str) -> Result<u32, ProviderError> {
            Ok(100)
        }
    }

    struct FaultyQueries;

    impl ProgressionProvider for FaultyQueries {
        fn probe(&self) -> Result<(), ProviderError> {
            Ok(())
        }
        fn level(&self, _actor: &str) -> Result<u32, ProviderError> {
            Err(ProviderError::Contract("level lookup exploded".into()))
        }
        fn has_ability(&self, _actor: &str, _ability: &str) -> Result<bool, ProviderError> {
            Err(ProviderError::Unavailable)
        }
        fn ability_bonus_percent(&self, _actor: &str, _ability: &str) -> Result<u32, ProviderError> {
            Err(ProviderError::Unavailable)
        }
    }

    #[test]
    fn test_disabled_bridge_returns_neutral_defaults() {
        let bridge = CapabilityBridge::disabled();

        assert!(!bridge.is_enabled());
        assert_eq!(bridge.level("anyone"), 1);
        assert!(!bridge.has_ability("anyone", "masked_rewards"));
        assert_eq!(bridge.ability_bonus_percent("anyone", "masked_rewards"), 0);
    }

    #[test]
    fn test_discover_without_provider_is_disabled() {
        let bridge = CapabilityBridge::discover(None);
        assert!(!bridge.is_enabled());
    }

    #[test]
    fn test_enabled_bridge_passes_queries_through() {
        let bridge = CapabilityBridge::discover(Some(Box::new(HealthyProvider)));

        assert!(bridge.is_enabled());
        assert_eq!(bridge.level("actor"), 9);
        assert!(bridge.has_ability("actor", "masked_rewards"));
        assert!(!bridge.has_ability("actor", "other"));
        assert_eq!(bridge.ability_bonus_percent("actor", "masked_rewards"), 25);
    }

    #[test]
    fn test_failed_probe_disables_bridge_permanently() {
        let bridge = CapabilityBridge::discover(Some(Box::new(BrokenProbe)));

        assert!(!bridge.is_enabled());
        // The bound provider would have answered 99; disabled wins.
        assert_eq!(bridge.level("actor"), 1);
        assert!(!bridge.has_ability("actor", "masked_rewards"));
    }

    #[test]
    fn test_query_faults_map_to_defaults() {
        let bridge = CapabilityBridge::discover(Some(Box::new(FaultyQueries)));

        assert!(bridge.is_enabled());
        assert_eq!(bridge.level("actor"), 1);
        assert!(!bridge.has_ability("actor", "masked_rewards"));
        assert_eq!(bridge.ability_bonus_percent("actor", "masked_rewards"), 0);
    }
}

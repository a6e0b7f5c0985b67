//! Test doubles for the external-provider seams.
//!
//! Enabled with the `test-fixtures` feature. Used by this crate's own
//! integration tests and by the CLI's simulated draws.

use std::collections::HashSet;

use crate::bridge::{ProgressionProvider, ProviderError};
use crate::zone::{Location, RegionProvider};

/// A progression provider with fixed answers for every actor.
#[derive(Debug, Clone, Default)]
pub struct FixedProvider {
    pub level: u32,
    pub abilities: HashSet<String>,
    pub bonus_percent: u32,
}

impl FixedProvider {
    pub fn with_level(level: u32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn grant_ability(mut self, ability: impl Into<String>, bonus_percent: u32) -> Self {
        self.abilities.insert(ability.into());
        self.bonus_percent = bonus_percent;
        self
    }
}

impl ProgressionProvider for FixedProvider {
    fn probe(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn level(&self, _actor: &str) -> Result<u32, ProviderError> {
        Ok(self.level)
    }

    fn has_ability(&self, _actor: &str, ability: &str) -> Result<bool, ProviderError> {
        Ok(self.abilities.contains(ability))
    }

    fn ability_bonus_percent(&self, _actor: &str, ability: &str) -> Result<u32, ProviderError> {
        Ok(if self.abilities.contains(ability) {
            self.bonus_percent
        } else {
            0
        })
    }
}

/// A provider that passes its probe but fails every query after it.
#[derive(Debug, Clone, Default)]
pub struct FlakyProvider;

impl ProgressionProvider for FlakyProvider {
    fn probe(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn level(&self, _actor: &str) -> Result<u32, ProviderError> {
        Err(ProviderError::Contract("level query failed".into()))
    }

    fn has_ability(&self, _actor: &str, _ability: &str) -> Result<bool, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    fn ability_bonus_percent(&self, _actor: &str, _ability: &str) -> Result<u32, ProviderError> {
        Err(ProviderError::Unavailable)
    }
}

/// A region provider that covers a fixed set of worlds, regardless of
/// the region name asked about.
#[derive(Debug, Clone, Default)]
pub struct FixedRegionProvider {
    pub covered_worlds: HashSet<String>,
}

impl FixedRegionProvider {
    pub fn covering(worlds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            covered_worlds: worlds.into_iter().map(Into::into).collect(),
        }
    }
}

impl RegionProvider for FixedRegionProvider {
    fn covers(&self, _region: &str, location: &Location) -> Result<bool, ProviderError> {
        Ok(self.covered_worlds.contains(&location.world))
    }
}

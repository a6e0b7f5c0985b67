//! Reward catalog: the immutable, weight-sorted snapshot of all
//! loadable rewards, plus the copy-on-write handle used for reloads.
//!
//! Loading is skip-and-count: a malformed entry is rejected, logged,
//! and counted, and never aborts the rest of the load.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::config::{RewardEntry, RewardsConfig};
use crate::reward::{Rarity, Reward, RewardKind, RewardPayload};

/// Why a single config entry was rejected during a load pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("weight {weight} is not positive")]
    NonPositiveWeight { weight: f64 },
    #[error("missing material token for {kind:?} reward")]
    MissingMaterial { kind: RewardKind },
    #[error("duplicate id (case-insensitive)")]
    DuplicateId,
}

/// Outcome of one load pass: how many entries survived and which
/// were skipped, with the reason for each.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<(String, LoadError)>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Immutable collection of rewards with a precomputed total weight.
///
/// Rewards are ordered by ascending base weight. The ordering has no
/// effect on the correctness of a cumulative-sum draw; it is kept as
/// a documented property of the load pass.
#[derive(Debug, Clone, Default)]
pub struct RewardCatalog {
    rewards: Vec<Reward>,
    total_base_weight: f64,
}

impl RewardCatalog {
    /// An empty catalog. Selection over it always yields no reward.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads all entries from a parsed config, skipping malformed
    /// ones. Recomputes the total weight from scratch; it is never
    /// patched incrementally.
    pub fn load(config: &RewardsConfig) -> (Self, LoadReport) {
        Self::from_entries(&config.rewards)
    }

    /// Loads from raw `(id, entry)` pairs. Exposed for callers that
    /// assemble entries without a full config file.
    pub fn from_entries(entries: &BTreeMap<String, RewardEntry>) -> (Self, LoadReport) {
        let mut rewards: Vec<Reward> = Vec::with_capacity(entries.len());
        let mut report = LoadReport::default();

        for (id, entry) in entries {
            match build_reward(id, entry, &rewards) {
                Ok(reward) => {
                    rewards.push(reward);
                    report.loaded += 1;
                }
                Err(err) => {
                    tracing::warn!("skipping reward '{}': {}", id, err);
                    report.skipped.push((id.clone(), err));
                }
            }
        }

        // Ascending-weight order; ties resolved by id for determinism.
        rewards.sort_by(|a, b| {
            a.base_weight
                .total_cmp(&b.base_weight)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total_base_weight = rewards.iter().map(|r| r.base_weight).sum();

        if report.skipped_count() > 0 {
            tracing::warn!(
                "failed to load {} reward(s); check the config",
                report.skipped_count()
            );
        }
        tracing::info!(
            "loaded {} rewards with total weight {:.2}",
            report.loaded,
            total_base_weight
        );

        (
            Self {
                rewards,
                total_base_weight,
            },
            report,
        )
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Exact sum of the base weights of all loaded rewards.
    pub fn total_base_weight(&self) -> f64 {
        self.total_base_weight
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reward> {
        self.rewards.iter()
    }

    pub fn first(&self) -> Option<&Reward> {
        self.rewards.first()
    }

    /// Case-insensitive lookup by id.
    pub fn by_id(&self, id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id_matches(id))
    }

    /// All rewards of one rarity tier, in catalog order.
    pub fn by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Reward> {
        self.rewards.iter().filter(move |r| r.rarity == rarity)
    }
}

impl<'a> IntoIterator for &'a RewardCatalog {
    type Item = &'a Reward;
    type IntoIter = std::slice::Iter<'a, Reward>;

    fn into_iter(self) -> Self::IntoIter {
        self.rewards.iter()
    }
}

fn build_reward(id: &str, entry: &RewardEntry, loaded: &[Reward]) -> Result<Reward, LoadError> {
    if entry.weight <= 0.0 {
        return Err(LoadError::NonPositiveWeight {
            weight: entry.weight,
        });
    }
    if entry.kind.needs_material() && entry.material.trim().is_empty() {
        return Err(LoadError::MissingMaterial { kind: entry.kind });
    }
    if loaded.iter().any(|r| r.id_matches(id)) {
        return Err(LoadError::DuplicateId);
    }

    let rarity = Rarity::parse(&entry.rarity).unwrap_or_else(|| {
        tracing::warn!(
            "unknown rarity '{}' for reward '{}', defaulting to COMMON",
            entry.rarity,
            id
        );
        Rarity::Common
    });

    // The masked tier is ability-gated by definition.
    let requires_ability = entry.requires_ability || rarity == Rarity::Masked;

    Ok(Reward {
        id: id.to_string(),
        base_weight: entry.weight,
        rarity,
        required_level: entry.required_level,
        requires_ability,
        payload: RewardPayload {
            kind: entry.kind,
            material: entry.material.clone(),
            display_name: entry.display_name.clone(),
            amount: entry.amount,
            lore: entry.lore.clone(),
            title: entry.title.clone(),
            subtitle: entry.subtitle.clone(),
            sound: entry.sound.clone(),
            sound_pitch: entry.sound_pitch,
            sound_volume: entry.sound_volume,
            commands: entry.commands.clone(),
            broadcast: entry.broadcast,
            broadcast_message: entry.broadcast_message.clone(),
        },
    })
}

/// Copy-on-write holder for the active catalog.
///
/// A reload builds a fresh [`RewardCatalog`] and publishes it with
/// [`CatalogHandle::replace`]; selections in flight keep the snapshot
/// they already cloned, so they never observe a half-updated catalog.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<RewardCatalog>>>,
}

impl CatalogHandle {
    pub fn new(catalog: RewardCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The current catalog snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<RewardCatalog> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically publishes a new catalog, discarding the old one for
    /// future readers.
    pub fn replace(&self, catalog: RewardCatalog) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(catalog);
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(RewardCatalog::empty())
    }
}

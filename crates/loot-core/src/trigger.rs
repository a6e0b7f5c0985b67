//! Trigger flow: the sequence a single triggering action runs through.
//!
//! Zone check, then cooldown, then one weighted selection, then
//! rendering of the outcome's messages. Presentation and inventory
//! side effects are the caller's problem; the outcome carries
//! everything a presenter needs.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::bridge::CapabilityBridge;
use crate::catalog::CatalogHandle;
use crate::engine::SelectionEngine;
use crate::format::expand_placeholders;
use crate::reward::{Actor, Reward};
use crate::zone::{Location, ZoneClassifier};

/// A selected reward with its messages already rendered for the actor.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantedReward {
    pub reward: Reward,
    pub title: String,
    pub subtitle: String,
    /// Present only when the reward asks to be broadcast.
    pub broadcast: Option<String>,
    /// Side-effect commands with placeholders expanded.
    pub commands: Vec<String>,
}

/// What one triggering action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// The location is outside every eligible zone.
    IneligibleZone,
    /// The actor triggered again too soon.
    OnCooldown { remaining: Duration },
    /// The catalog has no rewards at all.
    EmptyCatalog,
    Rewarded(GrantedReward),
}

/// Drives the zone check, cooldown, selection and message rendering
/// for each triggering action.
pub struct TriggerFlow {
    classifier: ZoneClassifier,
    bridge: CapabilityBridge,
    engine: SelectionEngine,
    catalog: CatalogHandle,
    cooldown: Duration,
    last_trigger: HashMap<String, Instant>,
}

impl TriggerFlow {
    pub fn new(
        classifier: ZoneClassifier,
        bridge: CapabilityBridge,
        engine: SelectionEngine,
        catalog: CatalogHandle,
        cooldown: Duration,
    ) -> Self {
        Self {
            classifier,
            bridge,
            engine,
            catalog,
            cooldown,
            last_trigger: HashMap::new(),
        }
    }

    /// Handles one triggering action at the current instant.
    pub fn trigger<R: Rng>(
        &mut self,
        actor: &Actor,
        location: &Location,
        rng: &mut R,
    ) -> TriggerOutcome {
        self.trigger_at(Instant::now(), actor, location, rng)
    }

    /// Handles one triggering action at an explicit instant. The
    /// instant is injected so cooldown behavior is testable.
    pub fn trigger_at<R: Rng>(
        &mut self,
        now: Instant,
        actor: &Actor,
        location: &Location,
        rng: &mut R,
    ) -> TriggerOutcome {
        if !self.classifier.is_eligible(location) {
            return TriggerOutcome::IneligibleZone;
        }

        if let Some(remaining) = self.cooldown_remaining(now, &actor.id) {
            return TriggerOutcome::OnCooldown { remaining };
        }

        // One consistent snapshot for the whole selection, even if a
        // reload swaps the catalog mid-call.
        let catalog = self.catalog.snapshot();
        let Some(reward) = self.engine.select(&catalog, &actor.id, &self.bridge, rng) else {
            tracing::warn!("no rewards configured; trigger produced nothing");
            return TriggerOutcome::EmptyCatalog;
        };

        tracing::debug!("actor '{}' drew reward '{}'", actor.id, reward.id);
        TriggerOutcome::Rewarded(render(actor, reward))
    }

    /// Checks the cooldown and, when it passes, records this trigger.
    fn cooldown_remaining(&mut self, now: Instant, actor_id: &str) -> Option<Duration> {
        if self.cooldown.is_zero() {
            return None;
        }
        if let Some(last) = self.last_trigger.get(actor_id) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.cooldown {
                return Some(self.cooldown - elapsed);
            }
        }
        self.last_trigger.insert(actor_id.to_string(), now);
        None
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    pub fn bridge(&self) -> &CapabilityBridge {
        &self.bridge
    }
}

fn render(actor: &Actor, reward: &Reward) -> GrantedReward {
    let broadcast = reward
        .payload
        .broadcast
        .then(|| expand_placeholders(&reward.payload.broadcast_message, actor, reward));
    let commands = reward
        .payload
        .commands
        .iter()
        .map(|cmd| expand_placeholders(cmd, actor, reward))
        .collect();

    GrantedReward {
        title: expand_placeholders(&reward.payload.title, actor, reward),
        subtitle: expand_placeholders(&reward.payload.subtitle, actor, reward),
        broadcast,
        commands,
        reward: reward.clone(),
    }
}

//! Zone classification: is a location eligible for reward triggering?
//!
//! Three backends. `DefaultAllow` and `WorldList` are self-contained
//! and cannot fail; `NamedRegion` consults an optional external
//! claim/region system through the same probe-and-degrade seam as the
//! capability bridge — absence or a query fault means "not eligible",
//! never an error.

use crate::bridge::ProviderError;
use crate::config::{SettingsConfig, ZoneMode};

/// A point in some named world. Coordinates are opaque to the core;
/// only region providers interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

/// Query surface an external claim/region system must bind.
pub trait RegionProvider: Send + Sync {
    /// Whether the named region covers the location.
    fn covers(&self, region: &str, location: &Location) -> Result<bool, ProviderError>;
}

/// Pluggable strategy answering "is this location eligible".
pub enum ZoneClassifier {
    /// Everything is eligible.
    DefaultAllow,
    /// Eligible when the named region of an external claim system
    /// covers the location. No provider bound means never eligible.
    NamedRegion {
        region: String,
        provider: Option<Box<dyn RegionProvider>>,
    },
    /// Eligible when the location's world is on the list; an empty
    /// list allows everywhere by convention.
    WorldList { worlds: Vec<String> },
}

impl ZoneClassifier {
    /// Builds the classifier the settings ask for, binding the region
    /// provider only in `region` mode.
    pub fn from_settings(
        settings: &SettingsConfig,
        provider: Option<Box<dyn RegionProvider>>,
    ) -> Self {
        match settings.zone_mode {
            ZoneMode::AllowAll => ZoneClassifier::DefaultAllow,
            ZoneMode::WorldList => ZoneClassifier::WorldList {
                worlds: settings.allowed_worlds.clone(),
            },
            ZoneMode::Region => {
                if provider.is_none() {
                    tracing::warn!(
                        "zone mode is 'region' but no region provider is bound; \
                         no location will be eligible"
                    );
                }
                ZoneClassifier::NamedRegion {
                    region: settings.region.clone(),
                    provider,
                }
            }
        }
    }

    /// Total query: a provider fault degrades to `false`.
    pub fn is_eligible(&self, location: &Location) -> bool {
        match self {
            ZoneClassifier::DefaultAllow => true,
            ZoneClassifier::WorldList { worlds } => {
                worlds.is_empty() || worlds.iter().any(|w| w == &location.world)
            }
            ZoneClassifier::NamedRegion { region, provider } => match provider {
                None => false,
                Some(provider) => match provider.covers(region, location) {
                    Ok(covered) => covered,
                    Err(err) => {
                        tracing::warn!("region lookup failed: {}; treating as ineligible", err);
                        false
                    }
                },
            },
        }
    }
}

impl std::fmt::Debug for ZoneClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneClassifier::DefaultAllow => write!(f, "ZoneClassifier::DefaultAllow"),
            ZoneClassifier::WorldList { worlds } => f
                .debug_struct("ZoneClassifier::WorldList")
                .field("worlds", worlds)
                .finish(),
            ZoneClassifier::NamedRegion { region, provider } => f
                .debug_struct("ZoneClassifier::NamedRegion")
                .field("region", region)
                .field("provider_bound", &provider.is_some())
                .finish(),
        }
    }
}

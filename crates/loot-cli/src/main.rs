//! Command-line companion for reward configs: write a starter config,
//! validate one, list its catalog, and simulate draws against a
//! stubbed progression provider.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use loot_core::fixtures::FixedProvider;
use loot_core::{
    default_config_toml, format_rarity, strip_color, ActorState, CapabilityBridge, Rarity,
    RewardCatalog, RewardsConfig, SelectionEngine,
};

#[derive(Parser, Debug)]
#[command(name = "lootroll")]
#[command(about = "Inspect and simulate weighted reward configs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter config file
    Init {
        /// Where to write it
        #[arg(long, default_value = "rewards.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Load a config and report what would survive the load pass
    Validate {
        #[arg(long, default_value = "rewards.toml")]
        config: PathBuf,
    },
    /// List catalog entries with their base-weight share
    List {
        #[arg(long, default_value = "rewards.toml")]
        config: PathBuf,
        /// Only entries of this rarity
        #[arg(long)]
        rarity: Option<String>,
    },
    /// Simulate draws for an actor at a given progression level
    Draw {
        #[arg(long, default_value = "rewards.toml")]
        config: PathBuf,
        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Actor progression level fed to the stub provider
        #[arg(long, default_value_t = 0)]
        level: u32,
        /// Grant the gated ability, with this percent bonus
        #[arg(long)]
        ability_bonus: Option<u32>,
        /// Number of draws
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Empirical draw distribution over many simulated draws
    Sample {
        #[arg(long, default_value = "rewards.toml")]
        config: PathBuf,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        level: u32,
        #[arg(long)]
        ability_bonus: Option<u32>,
        #[arg(short = 'n', long, default_value_t = 100_000)]
        count: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Init { path, force } => {
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            std::fs::write(&path, default_config_toml())
                .map_err(|e| format!("writing {}: {e}", path.display()))?;
            println!("Wrote starter config to {}", path.display());
            Ok(())
        }
        Command::Validate { config } => {
            let (catalog, report) = load_catalog(&config)?;
            println!(
                "Loaded {} reward(s), total base weight {:.2}",
                report.loaded,
                catalog.total_base_weight()
            );
            if report.skipped_count() > 0 {
                println!("Skipped {} entr(ies):", report.skipped_count());
                for (id, err) in &report.skipped {
                    println!("  {id}: {err}");
                }
            }
            Ok(())
        }
        Command::List { config, rarity } => {
            let (catalog, _) = load_catalog(&config)?;
            let filter = match rarity {
                Some(token) => Some(
                    Rarity::parse(&token).ok_or_else(|| format!("unknown rarity '{token}'"))?,
                ),
                None => None,
            };

            let total = catalog.total_base_weight();
            let mut shown = 0usize;
            for reward in &catalog {
                if filter.is_some_and(|r| r != reward.rarity) {
                    continue;
                }
                let share = if total > 0.0 {
                    reward.base_weight / total * 100.0
                } else {
                    0.0
                };
                println!(
                    "{:<24} {:>8.2}  {:>6.2}%  {}",
                    reward.id,
                    reward.base_weight,
                    share,
                    strip_color(&format_rarity(reward.rarity)),
                );
                shown += 1;
            }
            println!("Total: {shown} reward(s)");
            Ok(())
        }
        Command::Draw {
            config,
            seed,
            level,
            ability_bonus,
            count,
        } => {
            let (catalog, _) = load_catalog(&config)?;
            let engine = SelectionEngine::new();
            let bridge = stub_bridge(level, ability_bonus, engine.gated_ability());
            let mut rng = SmallRng::seed_from_u64(seed);

            for _ in 0..count {
                match engine.select(&catalog, "simulated", &bridge, &mut rng) {
                    Some(reward) => println!(
                        "{} ({})",
                        reward.id,
                        strip_color(&format_rarity(reward.rarity))
                    ),
                    None => println!("(no reward: empty catalog)"),
                }
            }
            Ok(())
        }
        Command::Sample {
            config,
            seed,
            level,
            ability_bonus,
            count,
        } => {
            let (catalog, _) = load_catalog(&config)?;
            if catalog.is_empty() {
                return Err("catalog is empty; nothing to sample".to_string());
            }
            let engine = SelectionEngine::new();
            let bridge = stub_bridge(level, ability_bonus, engine.gated_ability());

            let state = ActorState::gather(&bridge, "simulated", engine.gated_ability());
            let (adjusted, adjusted_total) = engine.adjusted_weights(&catalog, &state);

            let mut rng = SmallRng::seed_from_u64(seed);
            let mut tallies: BTreeMap<&str, usize> = BTreeMap::new();
            for _ in 0..count {
                if let Some(reward) = engine.select(&catalog, "simulated", &bridge, &mut rng) {
                    *tallies.entry(reward.id.as_str()).or_default() += 1;
                }
            }

            println!(
                "Sampled {count} draw(s) at level {level} (adjusted total {adjusted_total:.2})"
            );
            for (reward, weight) in catalog.iter().zip(&adjusted) {
                let drawn = tallies.get(reward.id.as_str()).copied().unwrap_or(0);
                let observed = drawn as f64 / count as f64 * 100.0;
                let expected = if adjusted_total > 0.0 {
                    weight / adjusted_total * 100.0
                } else {
                    0.0
                };
                println!(
                    "{:<24} expected {:>6.2}%  observed {:>6.2}%  ({} draws)",
                    reward.id, expected, observed, drawn
                );
            }
            Ok(())
        }
    }
}

fn load_catalog(path: &PathBuf) -> Result<(RewardCatalog, loot_core::LoadReport), String> {
    let config = RewardsConfig::from_file(path)
        .map_err(|e| format!("loading {}: {e}", path.display()))?;
    Ok(RewardCatalog::load(&config))
}

fn stub_bridge(level: u32, ability_bonus: Option<u32>, gated_ability: &str) -> CapabilityBridge {
    let mut provider = FixedProvider::with_level(level);
    if let Some(bonus) = ability_bonus {
        provider = provider.grant_ability(gated_ability, bonus);
    }
    CapabilityBridge::discover(Some(Box::new(provider)))
}

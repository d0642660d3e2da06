//! Pyke Dominator - enemy-aware recommendations for Pyke support
//!
//! Reads the enemy team (from the command line or the running game client's
//! champion select) and prints an item build, rune page, matchup plan and
//! dominance score. Rune pages and item sets can be pushed back to the client.

mod analysis;
mod app;
mod client;
mod config;
mod data;
mod report;
mod shared;
mod storage;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::analysis::{recommend, Recommendation, Role, Selections};
use crate::app::PykeDominatorApp;
use crate::client::export::export_recommendation;
use crate::config::{AppConfig, OutputFormat};
use crate::data::{Champion, DataDragon, ReferenceData, Tag};
use crate::shared::WatcherMessage;

/// Pyke Dominator - build, runes and game plan against the enemy team
#[derive(Parser, Debug)]
#[command(name = "pyke-dominator")]
#[command(about = "Enemy-aware build, rune and matchup recommendations for Pyke support")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend against a manually entered enemy team
    Analyze {
        #[command(flatten)]
        picks: PickArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Follow champion select in the running client
    Watch {
        /// Push the rune page every time the recommendation changes
        #[arg(long)]
        export: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Push the rune page (and item set) for a manually entered team once
    Export {
        #[command(flatten)]
        picks: PickArgs,
    },
    /// List known champions
    Champions {
        /// Only names containing this text
        #[arg(long)]
        search: Option<String>,
    },
}

/// Champion per enemy role: id, name, or `Name:Tag,Tag`
#[derive(Args, Debug, Default)]
struct PickArgs {
    #[arg(long)]
    top: Option<String>,
    #[arg(long)]
    jungle: Option<String>,
    #[arg(long)]
    mid: Option<String>,
    #[arg(long)]
    bot: Option<String>,
    #[arg(long)]
    support: Option<String>,
    /// Your own bot laner, for the lane damage comparison
    #[arg(long)]
    ally: Option<String>,
}

impl PickArgs {
    fn by_role(&self) -> [(Role, &Option<String>); 5] {
        [
            (Role::Top, &self.top),
            (Role::Jungle, &self.jungle),
            (Role::Mid, &self.mid),
            (Role::Bot, &self.bot),
            (Role::Support, &self.support),
        ]
    }

    fn to_selections(&self, reference: &ReferenceData) -> Result<Selections> {
        let mut selections = Selections::new();
        for (role, arg) in self.by_role() {
            if let Some(arg) = arg {
                selections = selections.with_enemy(role, resolve_champion(arg, reference)?);
            }
        }
        if let Some(ally) = &self.ally {
            selections = selections.with_ally_carry(Some(resolve_champion(ally, reference)?));
        }
        Ok(selections)
    }
}

fn parse_tag(tag: &str) -> Tag {
    match tag.trim().to_ascii_lowercase().as_str() {
        "mage" => Tag::Mage,
        "tank" => Tag::Tank,
        "fighter" => Tag::Fighter,
        "assassin" => Tag::Assassin,
        "marksman" | "adc" => Tag::Marksman,
        "support" => Tag::Support,
        _ => Tag::Other,
    }
}

/// Resolve a champion argument against the reference data
///
/// `Name:Tag,Tag` builds an ad-hoc champion and works without any catalog.
fn resolve_champion(arg: &str, reference: &ReferenceData) -> Result<Champion> {
    if let Some((name, tags)) = arg.split_once(':') {
        let tags: Vec<Tag> = tags.split(',').filter(|t| !t.trim().is_empty()).map(parse_tag).collect();
        let id: String = name.chars().filter(|c| c.is_alphanumeric()).collect();
        return Ok(Champion::new(id, "0", name.trim(), &tags));
    }

    let found = if arg.chars().all(|c| c.is_ascii_digit()) {
        reference.champion_by_key(arg)
    } else {
        reference.find_champion(arg)
    };

    match found {
        Some(champion) => Ok(champion.clone()),
        None if reference.is_empty() => {
            bail!("Unknown champion '{}' (no champion data loaded; use Name:Tag,Tag)", arg)
        }
        None => bail!("Unknown champion '{}'", arg),
    }
}

/// Load configuration from file, writing defaults on first run
///
/// Logging is configured from the result, so problems are returned as
/// messages to log afterwards.
fn load_or_create_config() -> (AppConfig, Vec<String>) {
    let config_path = match storage::get_config_dir() {
        Ok(dir) => dir.join("config.toml"),
        Err(e) => return (AppConfig::default(), vec![format!("No config directory available: {:#}", e)]),
    };

    if !config_path.exists() {
        let config = AppConfig::default();
        let problems = match config::save_config(&config, &config_path) {
            Ok(()) => Vec::new(),
            Err(e) => vec![format!("Failed to write default configuration: {:#}", e)],
        };
        return (config, problems);
    }

    match config::load_config(&config_path) {
        Ok(config) => (config, Vec::new()),
        Err(e) => (
            AppConfig::default(),
            vec![format!("Invalid configuration in {:?}, using defaults: {:#}", config_path, e)],
        ),
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_recommendation(selections: &Selections, rec: &Recommendation, reference: &ReferenceData, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rec)?);
    } else {
        println!("{}", report::render(selections, rec, reference));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_problems) = load_or_create_config();
    init_logging(&config.general.log_level);
    for problem in config_problems {
        warn!("{}", problem);
    }
    let json_default = config.general.output == OutputFormat::Json;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let provider = DataDragon::new(config.data.clone(), storage::get_cache_dir().ok())?;
    let reference = runtime.block_on(provider.load());

    match cli.command {
        Command::Analyze { picks, json } => {
            let selections = picks.to_selections(&reference)?;
            let Some(rec) = recommend(&selections) else {
                bail!("Select at least one enemy champion");
            };
            print_recommendation(&selections, &rec, &reference, json || json_default)?;
        }
        Command::Export { picks } => {
            let selections = picks.to_selections(&reference)?;
            let Some(rec) = recommend(&selections) else {
                bail!("Select at least one enemy champion");
            };
            let client = app::connect(&config.client)?;
            runtime.block_on(export_recommendation(
                &client,
                &rec.runes,
                &rec.build,
                config.client.export_item_set,
            ))?;
            println!("Exported '{}' to the client", rec.runes.name);
        }
        Command::Watch { export, json } => {
            run_watch(config, reference, export, json || json_default)?;
        }
        Command::Champions { search } => {
            if reference.is_empty() {
                bail!("No champion data available");
            }
            for champion in reference.search(search.as_deref().unwrap_or("")) {
                let tags: Vec<String> = champion.tags.iter().map(|t| format!("{:?}", t)).collect();
                println!("{:>4}  {:<16} {}", champion.key, champion.name, tags.join(", "));
            }
        }
    }

    Ok(())
}

/// Print every watcher event until the watcher stops
fn run_watch(config: AppConfig, reference: Arc<ReferenceData>, export: bool, json: bool) -> Result<()> {
    let mut app = PykeDominatorApp::new(config, reference.clone());
    app.start_watcher(export)?;
    info!("Watching champion select (Ctrl+C to exit)");

    let state = app.state();
    while let Ok(message) = app.from_watcher.recv() {
        match message {
            WatcherMessage::Connected => println!("Connected to the game client"),
            WatcherMessage::NotInChampSelect => println!("Waiting for champion select..."),
            WatcherMessage::SelectionsChanged(_) => {}
            WatcherMessage::RecommendationUpdated(rec) => {
                let selections = state.read().selections.clone();
                print_recommendation(&selections, &rec, &reference, json)?;
            }
            WatcherMessage::Exported => println!("Rune page exported"),
            WatcherMessage::Error(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

//! campkitchen: interactive shell for running a disaster-relief camp kitchen.
//!
//! Tracks food stock, registered households and meal distributions in memory,
//! and reports how many days the current stock can feed everyone.

mod command;
mod format;
mod seed;
mod shell;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use campkitchen_events::NoopEventBus;
use campkitchen_kitchen::{KitchenConfig, KitchenEngine};
use campkitchen_observability::TracingEventBus;

use crate::seed::seed_demo_data;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "campkitchen")]
#[command(about = "Camp kitchen stock, distribution and nutrition tracker")]
struct Cli {
    /// JSON kitchen config; missing fields take defaults
    #[arg(short, long, env = "CAMPKITCHEN_CONFIG")]
    config: Option<PathBuf>,

    /// Start with an empty kitchen instead of the demo data
    #[arg(long)]
    no_seed: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<KitchenConfig> {
    let base = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            KitchenConfig::from_json_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => KitchenConfig::default(),
    };
    Ok(base.with_overrides(|key| std::env::var(key).ok())?)
}

fn main() -> anyhow::Result<()> {
    campkitchen_observability::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    info!(?config, "configuration loaded");

    let mut engine = KitchenEngine::in_memory(config, TracingEventBus::new(NoopEventBus));
    if !cli.no_seed {
        seed_demo_data(&mut engine).context("loading demo data")?;
    }

    let stdout = io::stdout();
    let ansi = stdout.is_terminal();
    let mut shell = Shell::new(engine, ansi);
    shell.run(io::stdin().lock(), stdout.lock())?;

    info!(
        available_portions = shell.engine().compute_available_portions(),
        "shell closed"
    );
    Ok(())
}

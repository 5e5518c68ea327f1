//! Headless scenario runner: replays a scripted match and prints the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use data_runtime::configs::{bomb, catcher};
use server_core::collab::{LogAudio, Services};
use server_core::scenario::run_scenario;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a hot-potato scenario headless", long_about = None)]
struct Cli {
    /// Scenario JSON file
    scenario: PathBuf,
    /// Bomb tuning TOML (defaults to data/config/bomb.toml)
    #[arg(long)]
    bomb: Option<PathBuf>,
    /// Catcher tuning TOML (defaults to data/config/catcher.toml)
    #[arg(long)]
    catcher: Option<PathBuf>,
    /// Print every gameplay event
    #[arg(long)]
    events: bool,
    /// Also install tracing + Prometheus from data/config/telemetry.toml
    #[arg(long)]
    telemetry: bool,
}

fn read_cfg<T>(path: Option<&PathBuf>, parse: fn(&str) -> Result<T>, fallback: fn() -> Result<T>) -> Result<T> {
    match path {
        Some(p) => {
            let txt = std::fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
            parse(&txt)
        }
        None => fallback(),
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
    let cli = Cli::parse();
    let _guard = if cli.telemetry {
        let tcfg = data_runtime::configs::telemetry::load_default()?;
        Some(server_core::telemetry::init_telemetry(&tcfg)?)
    } else {
        None
    };
    let scen = data_runtime::loader::load_scenario_path(&cli.scenario)?;
    let bomb_cfg = read_cfg(cli.bomb.as_ref(), bomb::BombCfg::from_toml, bomb::load_default)?;
    let catcher_cfg = read_cfg(
        cli.catcher.as_ref(),
        catcher::CatcherCfg::from_toml,
        catcher::load_default,
    )?;
    let services = Services::default().with_audio(LogAudio);
    let report = run_scenario(&scen, &bomb_cfg, &catcher_cfg, services)?;

    if cli.events {
        for ev in &report.events {
            println!("{ev:?}");
        }
    }
    println!(
        "{}: {} ticks ({:.2}s), {} catches, {} throws",
        report.scenario, report.ticks, report.time_s, report.catches, report.throws
    );
    for ex in &report.explosions {
        println!(
            "  boom at {:.2}s ({}), holder={}, in blast=[{}]",
            ex.time_s,
            ex.cause.as_str(),
            ex.holder.as_deref().unwrap_or("-"),
            ex.in_blast.join(", ")
        );
    }
    println!("game over: {}", report.game_over);
    Ok(())
}

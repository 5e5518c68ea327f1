use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(author, version, about = "Workspace automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// fmt + clippy -D warnings + tests + schema check (workspace)
    Ci,
    /// Validate scenarios and config files against their serde models
    SchemaCheck,
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("spawn")?;
    if !status.success() {
        bail!("command failed: {:?}", cmd);
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let mut c = Command::new("cargo");
    c.args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run(&mut c)
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all"])?;
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])?;
    cargo_deny()?;
    cargo(&["test"])?;
    schema_check()?;
    Ok(())
}

fn cargo_deny() -> Result<()> {
    // Optional: skipped when cargo-deny is not installed.
    let mut cmd = Command::new("cargo");
    cmd.args(["deny", "check"]).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    match cmd.status() {
        Ok(status) => {
            if !status.success() {
                bail!("cargo deny check failed");
            }
        }
        Err(e) => {
            eprintln!("xtask: cargo-deny not found or failed to launch: {} (skipping)", e);
        }
    }
    Ok(())
}

fn schema_check() -> Result<()> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");

    // Scenarios: JSON Schema first, then the serde model (which also checks cross references)
    let schema_path = root.join("crates/data_runtime/schemas/scenario.schema.json");
    let schema_txt = std::fs::read_to_string(&schema_path)
        .with_context(|| format!("read schema: {}", schema_path.display()))?;
    let schema_json: serde_json::Value =
        serde_json::from_str(&schema_txt).with_context(|| "parse schema json")?;
    // Extend lifetime for validator by leaking the parsed schema for process lifetime.
    let schema_static: &'static serde_json::Value = Box::leak(Box::new(schema_json));
    let compiled = jsonschema::JSONSchema::compile(schema_static)
        .map_err(|e| anyhow::anyhow!("compile JSON Schema: {e}"))?;
    let scen_dir = root.join("data/scenarios");
    let mut count = 0usize;
    if scen_dir.is_dir() {
        for entry in std::fs::read_dir(&scen_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&txt)
                .with_context(|| format!("parse json: {}", path.display()))?;
            if let Err(errors) = compiled.validate(&json) {
                let mut msg = format!("{}:\n", path.display());
                for err in errors {
                    msg.push_str(&format!("schema error: {err}\n"));
                }
                bail!("{}", msg);
            }
            data_runtime::loader::load_scenario_path(&path)
                .with_context(|| format!("validate scenario: {}", path.display()))?;
            count += 1;
        }
    }

    // Configs: parse and range-check
    let cfg_dir = root.join("data/config");
    let bomb = std::fs::read_to_string(cfg_dir.join("bomb.toml")).context("read bomb.toml")?;
    data_runtime::configs::bomb::BombCfg::from_toml(&bomb)?
        .validate()
        .context("bomb.toml")?;
    let catcher =
        std::fs::read_to_string(cfg_dir.join("catcher.toml")).context("read catcher.toml")?;
    data_runtime::configs::catcher::CatcherCfg::from_toml(&catcher)?
        .validate()
        .context("catcher.toml")?;

    println!("xtask: schema check ok ({} scenarios, 2 configs)", count);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::SchemaCheck => schema_check(),
    }
}

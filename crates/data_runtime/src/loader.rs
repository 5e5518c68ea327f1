//! Data loaders. Paths resolve under the workspace `data/` directory.

use crate::scenario::Scenario;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn data_root() -> PathBuf {
    // Prefer top-level workspace `data/` so tests and tools can run from any crate.
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a raw JSON file under `data/` and return its string.
pub fn read_json(rel: impl AsRef<Path>) -> Result<String> {
    let path = data_root().join(rel);
    let s = fs::read_to_string(&path).with_context(|| format!("read data: {}", path.display()))?;
    Ok(s)
}

/// Read an optional TOML file under `data/`. `Ok(None)` when the file is absent.
pub(crate) fn read_toml_opt(rel: impl AsRef<Path>) -> Result<Option<String>> {
    let path = data_root().join(rel);
    if !path.is_file() {
        return Ok(None);
    }
    let txt = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(txt))
}

/// Load and validate a scenario from `data/scenarios/<rel>`.
pub fn load_scenario(rel: impl AsRef<Path>) -> Result<Scenario> {
    let rel = Path::new("scenarios").join(rel);
    let txt = read_json(&rel)?;
    Scenario::from_json(&txt).with_context(|| format!("scenario {}", rel.display()))
}

/// Load and validate a scenario from an arbitrary path (tools/CLI).
pub fn load_scenario_path(path: &Path) -> Result<Scenario> {
    let txt =
        fs::read_to_string(path).with_context(|| format!("read scenario: {}", path.display()))?;
    Scenario::from_json(&txt).with_context(|| format!("scenario {}", path.display()))
}

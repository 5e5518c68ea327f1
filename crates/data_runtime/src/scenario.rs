//! Scripted match description (JSON) consumed by the sim harness and demo.
//!
//! A scenario places agents and bombs, then replays a timeline of per-agent
//! actions at fixed tick boundaries.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
    pub duration_s: f32,
    /// Height of the flat ground plane; `None` means no ground at all.
    #[serde(default)]
    pub ground_y: Option<f32>,
    pub agents: Vec<AgentSpec>,
    pub bombs: Vec<BombSpec>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

fn default_tick_ms() -> u32 {
    16
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSpec {
    pub name: String,
    pub pos: [f32; 3],
    #[serde(default)]
    pub yaw_deg: f32,
    /// Camera forward used as aim; falls back to facing when absent.
    #[serde(default)]
    pub aim: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BombSpec {
    pub pos: [f32; 3],
    #[serde(default)]
    pub vel: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptStep {
    pub at_s: f32,
    pub agent: String,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Catch,
    Throw,
    Die,
    Move { pos: [f32; 3] },
    Face { yaw_deg: f32 },
}

impl Scenario {
    pub fn from_json(txt: &str) -> Result<Self> {
        let s: Scenario = serde_json::from_str(txt)?;
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be > 0");
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            bail!("duration_s must be > 0 (got {})", self.duration_s);
        }
        let mut names = HashSet::new();
        for a in &self.agents {
            if !names.insert(a.name.as_str()) {
                bail!("duplicate agent name '{}'", a.name);
            }
        }
        for step in &self.script {
            if !names.contains(step.agent.as_str()) {
                bail!("script references unknown agent '{}'", step.agent);
            }
            if !(step.at_s.is_finite() && step.at_s >= 0.0) {
                bail!("script step at_s must be >= 0 (got {})", step.at_s);
            }
        }
        Ok(())
    }

    /// Fixed step in seconds.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Total tick count covering `duration_s`.
    #[must_use]
    pub fn tick_count(&self) -> u32 {
        (self.duration_s / self.dt()).ceil() as u32
    }
}

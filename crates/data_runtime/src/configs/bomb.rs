//! Bomb tuning loaded from data/config/bomb.toml with env overrides.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{ConfigError, finite, non_negative, positive};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BombCfg {
    /// Blast radius reported with each explosion.
    pub explosion_radius_m: f32,
    pub explosion_force: f32,
    /// Full fuse; only burns while held.
    pub fuse_s: f32,
    /// Length of the downward ground probe.
    pub ground_check_m: f32,
    /// Impulse magnitude applied on throw.
    pub throw_force: f32,
    /// Extra +Y added to the normalized throw direction.
    pub upward_force: f32,
    /// Grace period between explosion and removal.
    pub despawn_delay_s: f32,
    /// Probe origin is lifted this far above the bomb.
    pub probe_lift_m: f32,
    /// Carry offset in the holder's local frame (x right, y up, z forward).
    pub hold_offset_m: [f32; 3],
    pub gravity_mps2: f32,
}

impl Default for BombCfg {
    fn default() -> Self {
        Self {
            explosion_radius_m: 3.0,
            explosion_force: 10.0,
            fuse_s: 3.0,
            ground_check_m: 0.1,
            throw_force: 8.0,
            upward_force: 2.0,
            despawn_delay_s: 0.1,
            probe_lift_m: 0.1,
            hold_offset_m: [0.0, 0.0, 0.5],
            gravity_mps2: -9.81,
        }
    }
}

impl BombCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fuse_s", self.fuse_s)?;
        positive("ground_check_m", self.ground_check_m)?;
        non_negative("explosion_radius_m", self.explosion_radius_m)?;
        non_negative("explosion_force", self.explosion_force)?;
        non_negative("throw_force", self.throw_force)?;
        finite("upward_force", self.upward_force)?;
        non_negative("despawn_delay_s", self.despawn_delay_s)?;
        non_negative("probe_lift_m", self.probe_lift_m)?;
        for v in self.hold_offset_m {
            finite("hold_offset_m", v)?;
        }
        finite("gravity_mps2", self.gravity_mps2)?;
        Ok(())
    }

    /// Parse a TOML document; missing keys take defaults.
    pub fn from_toml(txt: &str) -> Result<Self> {
        toml::from_str::<Self>(txt).context("parse bomb TOML")
    }
}

/// Load the bomb config from the default location, falling back to defaults.
pub fn load_default() -> Result<BombCfg> {
    let mut cfg = match crate::loader::read_toml_opt("config/bomb.toml")? {
        Some(txt) => BombCfg::from_toml(&txt)?,
        None => BombCfg::default(),
    };
    // Env overrides for quick tuning (optional)
    if let Some(v) = std::env::var("BOMB_FUSE_S").ok().and_then(|v| v.parse().ok()) {
        cfg.fuse_s = v;
    }
    if let Some(v) = std::env::var("BOMB_GROUND_CHECK_M").ok().and_then(|v| v.parse().ok()) {
        cfg.ground_check_m = v;
    }
    if let Some(v) = std::env::var("BOMB_THROW_FORCE").ok().and_then(|v| v.parse().ok()) {
        cfg.throw_force = v;
    }
    if let Err(e) = cfg.validate() {
        log::warn!("data_runtime: bomb config invalid ({e}); using defaults");
        return Ok(BombCfg::default());
    }
    Ok(cfg)
}

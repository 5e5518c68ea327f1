//! Catch controller tuning and key bindings loaded from data/config/catcher.toml.

use anyhow::{Context, Result};
use ecs_core::components::Key;
use serde::Deserialize;

use crate::error::{ConfigError, finite, non_negative, positive};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatcherCfg {
    pub catch_radius_m: f32,
    /// Window after a successful catch during which no new catch is attempted.
    pub catch_cooldown_s: f32,
    pub throw_force: f32,
    pub upward_force: f32,
    pub catch_key: String,
    pub throw_key: String,
}

impl Default for CatcherCfg {
    fn default() -> Self {
        Self {
            catch_radius_m: 1.5,
            catch_cooldown_s: 0.5,
            throw_force: 10.0,
            upward_force: 2.0,
            catch_key: "Space".to_string(),
            throw_key: "MouseLeft".to_string(),
        }
    }
}

impl CatcherCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("catch_radius_m", self.catch_radius_m)?;
        non_negative("catch_cooldown_s", self.catch_cooldown_s)?;
        non_negative("throw_force", self.throw_force)?;
        finite("upward_force", self.upward_force)?;
        self.keys().map(|_| ())
    }

    /// Parsed `(catch, throw)` bindings.
    pub fn keys(&self) -> Result<(Key, Key), ConfigError> {
        let parse = |s: &str| {
            ecs_core::parse::parse_key(s).ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
        };
        let catch = parse(&self.catch_key)?;
        let throw = parse(&self.throw_key)?;
        if catch == throw {
            return Err(ConfigError::DuplicateBinding(self.catch_key.clone()));
        }
        Ok((catch, throw))
    }

    pub fn from_toml(txt: &str) -> Result<Self> {
        toml::from_str::<Self>(txt).context("parse catcher TOML")
    }
}

pub fn load_default() -> Result<CatcherCfg> {
    let mut cfg = match crate::loader::read_toml_opt("config/catcher.toml")? {
        Some(txt) => CatcherCfg::from_toml(&txt)?,
        None => CatcherCfg::default(),
    };
    if let Some(v) = std::env::var("CATCH_RADIUS_M").ok().and_then(|v| v.parse().ok()) {
        cfg.catch_radius_m = v;
    }
    if let Some(v) = std::env::var("CATCH_COOLDOWN_S").ok().and_then(|v| v.parse().ok()) {
        cfg.catch_cooldown_s = v;
    }
    if let Err(e) = cfg.validate() {
        log::warn!("data_runtime: catcher config invalid ({e}); using defaults");
        return Ok(CatcherCfg::default());
    }
    Ok(cfg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let (c, t) = CatcherCfg::default().keys().unwrap();
        assert_eq!(c, Key::Space);
        assert_eq!(t, Key::MouseLeft);
    }

    #[test]
    fn unknown_key_rejected() {
        let cfg = CatcherCfg::from_toml("catch_key = \"F13\"").unwrap();
        assert_eq!(cfg.validate(), Err(ConfigError::UnknownKey("F13".into())));
    }

    #[test]
    fn same_key_twice_rejected() {
        let cfg = CatcherCfg {
            throw_key: "space".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateBinding(_))));
    }

    #[test]
    fn negative_radius_rejected() {
        let cfg = CatcherCfg {
            catch_radius_m: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}

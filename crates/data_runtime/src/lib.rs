//! data_runtime: data schemas and loaders for the hot-potato sim.
//!
//! Tuning lives in `data/config/*.toml`; scripted matches live in
//! `data/scenarios/*.json`. Server, tools, and tests all load through here.

pub mod error;
pub mod loader;
pub mod scenario;
pub mod configs {
    pub mod bomb;
    pub mod catcher;
    pub mod telemetry;
}

pub use error::ConfigError;

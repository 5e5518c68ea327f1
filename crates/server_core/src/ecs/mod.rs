//! Server-side entity storage and the per-tick schedule.
//!
//! Agents and bombs live in generation-checked arenas. Every cross-entity
//! reference (bomb -> holder, controller -> held bomb) is a handle, so a
//! despawned bomb is observed as a failed lookup instead of a dangling read.

pub mod geom;
pub mod schedule;
mod world;
pub use world::*;

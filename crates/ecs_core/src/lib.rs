//! Shared ECS component types for the hot-potato sim.
//!
//! Handles, poses, the bomb lifecycle enum, and input commands live here so
//! the server, the input glue, and tools agree on one vocabulary.

pub mod components;
pub mod parse;

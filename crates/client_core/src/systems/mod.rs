//! Client-side systems run once per rendered frame.

pub mod action_bindings;

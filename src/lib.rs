// Root app shell and re-exports for workspace crates used by bins.
pub use client_core as client;
pub use data_runtime as data;
pub use ecs_core as ecs;
pub use server_core as server;

pub mod demo;

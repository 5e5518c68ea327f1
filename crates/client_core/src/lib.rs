//! Client glue for the hot-potato sim: key bindings and the per-frame
//! command queue handed to the authoritative server.

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod facade {
    pub mod controller;
}
pub mod systems;

//! Map edge-triggered key presses to catch/throw commands.

use data_runtime::ConfigError;
use data_runtime::configs::catcher::CatcherCfg;
use ecs_core::components::{InputCommand, Key};

use crate::facade::controller::{ControllerState, InputQueue};

/// Keys that went down this frame.
#[derive(Default, Clone, Debug)]
pub struct ButtonSnapshot {
    pressed: Vec<Key>,
}

impl ButtonSnapshot {
    #[must_use]
    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bindings {
    pub catch: Key,
    pub throw: Key,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            catch: Key::Space,
            throw: Key::MouseLeft,
        }
    }
}

impl Bindings {
    pub fn from_cfg(cfg: &CatcherCfg) -> Result<Self, ConfigError> {
        let (catch, throw) = cfg.keys()?;
        Ok(Self { catch, throw })
    }
}

/// Catch is emitted before throw when both keys go down in the same frame.
pub fn handle_buttons(
    binds: &Bindings,
    state: &ControllerState,
    input: &ButtonSnapshot,
    out: &mut InputQueue,
) {
    if !state.accepts_input() {
        return;
    }
    if input.is_pressed(binds.catch) {
        out.push(InputCommand::CatchBomb);
    }
    if input.is_pressed(binds.throw) {
        out.push(InputCommand::ThrowBomb);
    }
}

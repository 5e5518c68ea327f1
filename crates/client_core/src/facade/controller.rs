//! Read-only controller façade: what the local player may do this frame.

use ecs_core::components::InputCommand;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct ControllerState {
    /// Dead players keep their controller but ignore every button.
    pub alive: bool,
    /// UI owns the keyboard (menus, chat).
    pub in_ui_capture: bool,
    /// Camera forward used as the throw aim; facing is used when `None`.
    pub camera_forward: Option<Vec3>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            alive: true,
            in_ui_capture: false,
            camera_forward: None,
        }
    }
}

impl ControllerState {
    #[inline]
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.alive && !self.in_ui_capture
    }

    #[inline]
    #[must_use]
    pub fn aim(&self) -> Option<Vec3> {
        self.camera_forward
            .filter(|v| v.length_squared() > 1e-12)
            .map(Vec3::normalize)
    }
}

#[derive(Default, Clone, Debug)]
pub struct InputQueue {
    cmds: Vec<InputCommand>,
}

impl InputQueue {
    pub fn push(&mut self, c: InputCommand) {
        self.cmds.push(c);
    }
    pub fn drain(&mut self) -> impl Iterator<Item = InputCommand> + '_ {
        self.cmds.drain(..)
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn queue_drains_in_order() {
        let mut q = InputQueue::default();
        q.push(InputCommand::CatchBomb);
        q.push(InputCommand::ThrowBomb);
        assert_eq!(q.len(), 2);
        let v: Vec<_> = q.drain().collect();
        assert_eq!(v, vec![InputCommand::CatchBomb, InputCommand::ThrowBomb]);
        assert!(q.is_empty());
    }

    #[test]
    fn zero_camera_forward_is_no_aim() {
        let s = ControllerState {
            camera_forward: Some(Vec3::ZERO),
            ..Default::default()
        };
        assert!(s.aim().is_none());
        let s = ControllerState {
            camera_forward: Some(Vec3::new(0.0, 0.0, 4.0)),
            ..Default::default()
        };
        assert_eq!(s.aim(), Some(Vec3::Z));
    }
}

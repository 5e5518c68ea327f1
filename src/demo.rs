//! Local two-seat match: key presses go through the client bindings into the
//! authoritative server, one frame per tick.

use anyhow::Result;
use client_core::facade::controller::{ControllerState, InputQueue};
use client_core::systems::action_bindings::{Bindings, ButtonSnapshot, handle_buttons};
use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{AgentId, InputCommand, Key, Pose};
use glam::Vec3;
use server_core::ServerState;
use server_core::collab::Services;
use server_core::ground::FlatGround;

/// One key going down on `frame` for seat `seat`.
#[derive(Copy, Clone, Debug)]
pub struct KeyPress {
    pub frame: u32,
    pub seat: usize,
    pub key: Key,
}

pub struct Seat {
    pub agent: AgentId,
    pub binds: Bindings,
    pub state: ControllerState,
    queue: InputQueue,
}

pub struct LocalMatch {
    pub srv: ServerState,
    pub seats: Vec<Seat>,
    frame: u32,
}

impl LocalMatch {
    /// Two players facing each other across the bomb, on flat ground.
    pub fn face_off(bomb: &BombCfg, catcher: &CatcherCfg, services: Services) -> Result<Self> {
        let binds = Bindings::from_cfg(catcher)?;
        let mut srv = ServerState::new()
            .with_ground(FlatGround::new(0.0))
            .with_services(services);
        let mut seats = Vec::new();
        for (name, pos, yaw) in [
            ("p1", Vec3::new(0.0, 1.0, 0.0), 0.0),
            ("p2", Vec3::new(0.0, 1.0, 1.5), std::f32::consts::PI),
        ] {
            let agent = srv.spawn_agent_with_catcher(name, Pose::new(pos, yaw), catcher, None)?;
            seats.push(Seat {
                agent,
                binds,
                state: ControllerState::default(),
                queue: InputQueue::default(),
            });
        }
        srv.spawn_bomb(Vec3::new(0.0, 1.0, 0.5), bomb)?;
        Ok(Self {
            srv,
            seats,
            frame: 0,
        })
    }

    /// Run one frame: bindings -> command queue -> server tick.
    ///
    /// Throws from every seat reach the server before any catch, so a pass
    /// made on a single frame lands regardless of seat order.
    pub fn frame(&mut self, presses: &[KeyPress], dt: f32) {
        let mut cmds = Vec::new();
        for (i, seat) in self.seats.iter_mut().enumerate() {
            let mut snap = ButtonSnapshot::default();
            for p in presses.iter().filter(|p| p.frame == self.frame && p.seat == i) {
                snap.press(p.key);
            }
            seat.state.alive = self
                .srv
                .world
                .agent(seat.agent)
                .is_some_and(|a| !a.dead);
            handle_buttons(&seat.binds, &seat.state, &snap, &mut seat.queue);
            self.srv.set_aim(seat.agent, seat.state.aim());
            let agent = seat.agent;
            cmds.extend(seat.queue.drain().map(|cmd| (agent, cmd)));
        }
        cmds.sort_by_key(|(_, cmd)| !matches!(cmd, InputCommand::ThrowBomb));
        for (agent, cmd) in cmds {
            self.srv.command(agent, cmd);
        }
        self.srv.step_authoritative(dt);
        self.frame += 1;
    }

    pub fn run(&mut self, presses: &[KeyPress], frames: u32, dt: f32) {
        for _ in 0..frames {
            self.frame(presses, dt);
        }
    }
}

/// Catch on frame 0, pass back and forth once a second.
#[must_use]
pub fn default_script(binds: &Bindings, fps: u32) -> Vec<KeyPress> {
    let at = |s: u32| s * fps;
    vec![
        KeyPress { frame: at(0), seat: 0, key: binds.catch },
        KeyPress { frame: at(1), seat: 0, key: binds.throw },
        KeyPress { frame: at(1), seat: 1, key: binds.catch },
        KeyPress { frame: at(2), seat: 1, key: binds.throw },
        KeyPress { frame: at(2), seat: 0, key: binds.catch },
    ]
}

//! Authoritative hot-potato simulation.
//!
//! `ServerState` owns the entity world, the ground geometry, and the injected
//! collaborators. Each `step_authoritative` call runs the ordered schedule
//! (input, carry, ballistics, fuse, display, despawn) and then dispatches the
//! queued sounds, animations, game-over notice, and despawn timers.
//!
//! Gameplay calls never fail: a precondition that does not hold turns the
//! call into a no-op. Only construction (bad config, missing agent) reports
//! errors.

use data_runtime::ConfigError;
use data_runtime::configs::bomb::BombCfg;
use data_runtime::configs::catcher::CatcherCfg;
use ecs_core::components::{AgentId, BombId, DetonationCause, InputCommand, Pose};
use glam::Vec3;
use thiserror::Error;

pub mod bomb;
pub mod catcher;
pub mod collab;
pub mod ecs;
pub mod events;
pub mod ground;
pub mod scenario;
pub mod telemetry;
mod tick;

use bomb::{Bomb, BombParams};
use catcher::{Catcher, CatcherParams};
use collab::{FuseDisplay, Services};
use ecs::WorldEcs;
use ecs::schedule::{Ctx, Schedule};
use events::GameEvent;
use ground::{GroundProbe, NoGround};

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("agent {0:?} does not exist")]
    MissingAgent(AgentId),
    #[error("agent {0:?} already has a catch controller")]
    AlreadyAttached(AgentId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct ServerState {
    pub world: WorldEcs,
    pub ground: Box<dyn GroundProbe>,
    pub services: Services,
    time_s: f64,
    tick: u64,
    pending: Vec<(AgentId, InputCommand)>,
    events: Vec<GameEvent>,
    game_over_shown: bool,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("world", &self.world)
            .field("services", &self.services)
            .field("time_s", &self.time_s)
            .field("tick", &self.tick)
            .field("pending", &self.pending.len())
            .field("game_over_shown", &self.game_over_shown)
            .finish_non_exhaustive()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            world: WorldEcs::new(),
            ground: Box::new(NoGround),
            services: Services::default(),
            time_s: 0.0,
            tick: 0,
            pending: Vec::new(),
            events: Vec::new(),
            game_over_shown: false,
        }
    }

    pub fn with_ground(mut self, ground: impl GroundProbe + 'static) -> Self {
        self.ground = Box::new(ground);
        self
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    #[inline]
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn game_over_shown(&self) -> bool {
        self.game_over_shown
    }

    pub fn spawn_agent(&mut self, name: impl Into<String>, pose: Pose) -> AgentId {
        self.world.spawn_agent(name, pose)
    }

    /// Give `agent` a catch controller. `display` receives the fuse readout.
    pub fn attach_catcher(
        &mut self,
        agent: AgentId,
        cfg: &CatcherCfg,
        display: Option<Box<dyn FuseDisplay>>,
    ) -> Result<(), SpawnError> {
        let params = CatcherParams::try_from(cfg)?;
        let a = self
            .world
            .agent_mut(agent)
            .ok_or(SpawnError::MissingAgent(agent))?;
        if a.catcher.is_some() {
            return Err(SpawnError::AlreadyAttached(agent));
        }
        a.catcher = Some(Catcher::new(params, display));
        Ok(())
    }

    pub fn spawn_agent_with_catcher(
        &mut self,
        name: impl Into<String>,
        pose: Pose,
        cfg: &CatcherCfg,
        display: Option<Box<dyn FuseDisplay>>,
    ) -> Result<AgentId, SpawnError> {
        let params = CatcherParams::try_from(cfg)?;
        let id = self.world.spawn_agent(name, pose);
        if let Some(a) = self.world.agent_mut(id) {
            a.catcher = Some(Catcher::new(params, display));
        }
        Ok(id)
    }

    /// Spawn an armed bomb at rest.
    pub fn spawn_bomb(&mut self, pos: Vec3, cfg: &BombCfg) -> Result<BombId, SpawnError> {
        let params = BombParams::try_from(cfg)?;
        let id = self.world.spawn_bomb_with(|id| Bomb::new(id, pos, params));
        log::debug!("spawned bomb {id:?} at {pos:?}");
        Ok(id)
    }

    pub fn set_pose(&mut self, agent: AgentId, pose: Pose) -> bool {
        match self.world.agent_mut(agent) {
            Some(a) => {
                a.pose = pose;
                true
            }
            None => false,
        }
    }

    /// Set (or clear) the camera-forward aim used for throws. The aim is
    /// stored as a unit vector; a zero aim clears it back to facing.
    pub fn set_aim(&mut self, agent: AgentId, aim: Option<Vec3>) -> bool {
        match self.world.agent_mut(agent).and_then(|a| a.catcher.as_mut()) {
            Some(c) => {
                c.aim = aim
                    .map(Vec3::normalize_or_zero)
                    .filter(|v| *v != Vec3::ZERO);
                true
            }
            None => false,
        }
    }

    /// Mark an agent dead; its controller ignores input from then on.
    pub fn kill_agent(&mut self, agent: AgentId) -> bool {
        match self.world.agent_mut(agent) {
            Some(a) => {
                a.dead = true;
                true
            }
            None => false,
        }
    }

    /// Queue an input command for the next tick.
    pub fn command(&mut self, agent: AgentId, cmd: InputCommand) {
        self.pending.push((agent, cmd));
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step_authoritative(&mut self, dt: f32) {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("step_authoritative: ignoring invalid dt {dt}");
            return;
        }
        let t0 = std::time::Instant::now();
        let mut ctx = Ctx::new(dt, self.time_s);
        ctx.commands = std::mem::take(&mut self.pending);
        let mut sched = Schedule;
        sched.run(self, &mut ctx);
        tick::dispatch_effects(self, &mut ctx);
        self.events.append(&mut ctx.events);
        self.time_s += f64::from(dt);
        self.tick += 1;
        metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }

    /// Catch immediately, outside the tick's input system.
    pub fn try_catch_bomb(&mut self, agent: AgentId) -> Option<BombId> {
        self.immediate(|w, ctx| w.try_catch_bomb(agent, ctx))
    }

    /// Throw immediately, outside the tick's input system.
    pub fn throw_held_bomb(&mut self, agent: AgentId) -> bool {
        self.immediate(|w, ctx| w.throw_held_bomb(agent, ctx))
    }

    pub fn explode_bomb(&mut self, bomb: BombId) -> bool {
        self.immediate(|w, ctx| w.explode_bomb(bomb, DetonationCause::Forced, ctx))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn immediate<R>(&mut self, f: impl FnOnce(&mut WorldEcs, &mut Ctx) -> R) -> R {
        let mut ctx = Ctx::new(0.0, self.time_s);
        let r = f(&mut self.world, &mut ctx);
        tick::dispatch_effects(self, &mut ctx);
        self.events.append(&mut ctx.events);
        r
    }
}

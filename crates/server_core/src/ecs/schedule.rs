//! ECS schedule and systems.
//!
//! One authoritative tick runs these in order:
//! input -> carry -> ballistics -> fuse -> display -> despawn.
//! Side effects are queued on `Ctx` and dispatched by `ServerState` after the
//! schedule returns, so every state transition of the tick is complete first.

use ecs_core::components::{AgentId, BombId, InputCommand};

use crate::ServerState;
use crate::events::{Effect, GameEvent};

#[derive(Default, Debug)]
pub struct Ctx {
    pub dt: f32,
    /// Sim time at the start of the tick.
    pub time_s: f64,
    pub commands: Vec<(AgentId, InputCommand)>,
    pub effects: Vec<Effect>,
    pub events: Vec<GameEvent>,
}

impl Ctx {
    pub fn new(dt: f32, time_s: f64) -> Self {
        Self {
            dt,
            time_s,
            ..Default::default()
        }
    }

    #[inline]
    pub fn end_time_s(&self) -> f64 {
        self.time_s + f64::from(self.dt)
    }
}

pub struct Schedule;

impl Schedule {
    pub fn run(&mut self, srv: &mut ServerState, ctx: &mut Ctx) {
        apply_input_commands(srv, ctx);
        carry_held_bombs(srv);
        integrate_free_bombs(srv, ctx);
        tick_fuses(srv, ctx);
        refresh_fuse_displays(srv);
        despawn_expired(srv, ctx);
    }
}

fn apply_input_commands(srv: &mut ServerState, ctx: &mut Ctx) {
    let cmds = std::mem::take(&mut ctx.commands);
    for (agent, cmd) in cmds {
        let Some(a) = srv.world.agent(agent) else {
            log::debug!("input for unknown agent {agent:?} dropped");
            continue;
        };
        if a.dead || a.catcher.is_none() {
            continue;
        }
        match cmd {
            InputCommand::CatchBomb => {
                srv.world.try_catch_bomb(agent, ctx);
            }
            InputCommand::ThrowBomb => {
                srv.world.throw_held_bomb(agent, ctx);
            }
        }
    }
}

/// Held bombs sit at the hold offset in front of their holder.
fn carry_held_bombs(srv: &mut ServerState) {
    let held: Vec<(BombId, AgentId)> = srv
        .world
        .bombs
        .iter()
        .filter_map(|(id, b)| b.holder().map(|h| (BombId(id), h)))
        .collect();
    for (bid, holder) in held {
        let Some(pose) = srv.world.agent(holder).map(|a| a.pose) else {
            continue;
        };
        if let Some(b) = srv.world.bomb_mut(bid) {
            b.follow(&pose);
        }
    }
}

fn integrate_free_bombs(srv: &mut ServerState, ctx: &Ctx) {
    let ground = &*srv.ground;
    for (_, b) in srv.world.bombs.iter_mut() {
        b.integrate(ground, ctx.dt);
    }
}

fn tick_fuses(srv: &mut ServerState, ctx: &mut Ctx) {
    for id in srv.world.bombs.ids() {
        let bid = BombId(id);
        let det = match srv.world.bomb_mut(bid) {
            Some(b) => b.tick(&*srv.ground, ctx),
            None => None,
        };
        if let Some(det) = det {
            srv.world.finish_detonation(bid, det, ctx);
        }
    }
}

/// Show the held fuse, or hide the readout once the held handle went stale.
fn refresh_fuse_displays(srv: &mut ServerState) {
    for aid in srv.world.agents.ids() {
        let agent = AgentId(aid);
        let Some(held) = srv
            .world
            .agent(agent)
            .and_then(|a| a.catcher.as_ref())
            .map(|c| c.held_bomb())
        else {
            continue;
        };
        let fuse = held.and_then(|bid| {
            srv.world
                .bomb(bid)
                .filter(|b| b.holder() == Some(agent))
                .map(|b| b.fuse_remaining())
        });
        let Some(c) = srv.world.agent_mut(agent).and_then(|a| a.catcher.as_mut()) else {
            continue;
        };
        match fuse {
            Some(f) => c.show_fuse(f),
            None => {
                c.release();
                c.hide_display();
            }
        }
    }
}

fn despawn_expired(srv: &mut ServerState, ctx: &mut Ctx) {
    for bomb in srv.world.despawn_due(ctx.end_time_s()) {
        log::debug!("bomb {bomb:?} despawned");
        ctx.events.push(GameEvent::Despawned { bomb });
    }
}

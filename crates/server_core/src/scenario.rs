//! Headless scenario runner: builds a `ServerState` from a scripted match and
//! replays it at a fixed tick.

use anyhow::{Context, Result};
use data_runtime::configs::bomb::BombCfg;
use data_runtime::configs::catcher::CatcherCfg;
use data_runtime::scenario::{Scenario, ScriptAction, ScriptStep};
use ecs_core::components::{AgentId, DetonationCause, InputCommand, Pose};
use glam::Vec3;

use crate::ServerState;
use crate::collab::Services;
use crate::events::GameEvent;
use crate::ground::{FlatGround, NoGround};

/// Script steps fire on the first tick whose start time reaches `at_s`.
const SCRIPT_EPS_S: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionSummary {
    pub time_s: f64,
    pub cause: DetonationCause,
    pub holder: Option<String>,
    pub in_blast: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub scenario: String,
    pub ticks: u64,
    pub time_s: f64,
    pub catches: usize,
    pub throws: usize,
    pub explosions: Vec<ExplosionSummary>,
    pub game_over: bool,
    pub events: Vec<GameEvent>,
}

pub struct ScenarioRunner {
    pub srv: ServerState,
    name: String,
    dt: f32,
    ticks_total: u32,
    script: Vec<(ScriptStep, AgentId)>,
    cursor: usize,
    events: Vec<GameEvent>,
}

impl ScenarioRunner {
    pub fn new(
        sc: &Scenario,
        bomb_cfg: &BombCfg,
        catcher_cfg: &CatcherCfg,
        services: Services,
    ) -> Result<Self> {
        sc.validate()?;
        let mut srv = match sc.ground_y {
            Some(y) => ServerState::new().with_ground(FlatGround::new(y)),
            None => ServerState::new().with_ground(NoGround),
        }
        .with_services(services);
        for a in &sc.agents {
            let pose = Pose::new(Vec3::from_array(a.pos), a.yaw_deg.to_radians());
            let id = srv
                .spawn_agent_with_catcher(a.name.clone(), pose, catcher_cfg, None)
                .with_context(|| format!("spawn agent '{}'", a.name))?;
            if let Some(aim) = a.aim {
                srv.set_aim(id, Some(Vec3::from_array(aim)));
            }
        }
        for b in &sc.bombs {
            let id = srv.spawn_bomb(Vec3::from_array(b.pos), bomb_cfg)?;
            if let Some(v) = b.vel
                && let Some(bomb) = srv.world.bomb_mut(id)
            {
                bomb.vel = Vec3::from_array(v);
            }
        }
        let mut script = Vec::with_capacity(sc.script.len());
        for step in &sc.script {
            let id = srv
                .world
                .agent_by_name(&step.agent)
                .with_context(|| format!("unknown agent '{}'", step.agent))?;
            script.push((step.clone(), id));
        }
        // Same-time throws go first so a pass resolves within one tick;
        // other steps sharing a time keep their file order
        script.sort_by(|a, b| {
            a.0.at_s
                .total_cmp(&b.0.at_s)
                .then_with(|| is_throw(&b.0.action).cmp(&is_throw(&a.0.action)))
        });
        Ok(Self {
            srv,
            name: sc.name.clone(),
            dt: sc.dt(),
            ticks_total: sc.tick_count(),
            script,
            cursor: 0,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.srv.tick_count() >= u64::from(self.ticks_total)
    }

    /// Apply due script steps, then advance one tick.
    pub fn step(&mut self) {
        let now = self.srv.time_s();
        while let Some((step, agent)) = self.script.get(self.cursor) {
            if f64::from(step.at_s) > now + SCRIPT_EPS_S {
                break;
            }
            apply_action(&mut self.srv, *agent, &step.action);
            self.cursor += 1;
        }
        self.srv.step_authoritative(self.dt);
        self.events.extend(self.srv.drain_events());
    }

    pub fn run_to_end(mut self) -> RunReport {
        while !self.is_finished() {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> RunReport {
        let name_of = |id: AgentId| {
            self.srv
                .world
                .agent(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| format!("{id:?}"))
        };
        let mut catches = 0;
        let mut throws = 0;
        let mut explosions = Vec::new();
        for ev in &self.events {
            match ev {
                GameEvent::Caught { .. } => catches += 1,
                GameEvent::Thrown { .. } => throws += 1,
                GameEvent::Exploded {
                    cause,
                    holder,
                    agents_in_blast,
                    time_s,
                    ..
                } => explosions.push(ExplosionSummary {
                    time_s: *time_s,
                    cause: *cause,
                    holder: holder.map(name_of),
                    in_blast: agents_in_blast.iter().copied().map(name_of).collect(),
                }),
                _ => {}
            }
        }
        RunReport {
            scenario: self.name.clone(),
            ticks: self.srv.tick_count(),
            time_s: self.srv.time_s(),
            catches,
            throws,
            explosions,
            game_over: self.srv.game_over_shown(),
            events: self.events.clone(),
        }
    }
}

fn is_throw(action: &ScriptAction) -> bool {
    matches!(action, ScriptAction::Throw)
}

fn apply_action(srv: &mut ServerState, agent: AgentId, action: &ScriptAction) {
    match action {
        ScriptAction::Catch => srv.command(agent, InputCommand::CatchBomb),
        ScriptAction::Throw => srv.command(agent, InputCommand::ThrowBomb),
        ScriptAction::Die => {
            srv.kill_agent(agent);
        }
        ScriptAction::Move { pos } => {
            if let Some(yaw) = srv.world.agent(agent).map(|a| a.pose.yaw) {
                srv.set_pose(agent, Pose::new(Vec3::from_array(*pos), yaw));
            }
        }
        ScriptAction::Face { yaw_deg } => {
            if let Some(pos) = srv.world.agent(agent).map(|a| a.pose.pos) {
                srv.set_pose(agent, Pose::new(pos, yaw_deg.to_radians()));
            }
        }
    }
}

/// Build and run a scenario to completion.
pub fn run_scenario(
    sc: &Scenario,
    bomb_cfg: &BombCfg,
    catcher_cfg: &CatcherCfg,
    services: Services,
) -> Result<RunReport> {
    let runner = ScenarioRunner::new(sc, bomb_cfg, catcher_cfg, services)?;
    log::info!(
        "scenario '{}': {} ticks at {:.3}s",
        runner.name,
        runner.ticks_total,
        runner.dt
    );
    Ok(runner.run_to_end())
}

//! Catch controller: range catch with first-match selection, throw along the
//! aim, post-catch cooldown, and the per-agent fuse readout.

use data_runtime::ConfigError;
use data_runtime::configs::catcher::CatcherCfg;
use ecs_core::components::{AgentId, BombId, EntityRef};
use glam::Vec3;

use crate::collab::{FuseDisplay, PlayOpts, anim, sounds};
use crate::ecs::WorldEcs;
use crate::ecs::schedule::Ctx;
use crate::events::{Effect, GameEvent};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CatcherParams {
    pub catch_radius_m: f32,
    pub catch_cooldown_s: f32,
    pub throw_force: f32,
    pub upward_force: f32,
}

impl Default for CatcherParams {
    fn default() -> Self {
        let cfg = CatcherCfg::default();
        Self {
            catch_radius_m: cfg.catch_radius_m,
            catch_cooldown_s: cfg.catch_cooldown_s,
            throw_force: cfg.throw_force,
            upward_force: cfg.upward_force,
        }
    }
}

impl TryFrom<&CatcherCfg> for CatcherParams {
    type Error = ConfigError;

    fn try_from(cfg: &CatcherCfg) -> Result<Self, Self::Error> {
        cfg.validate()?;
        Ok(Self {
            catch_radius_m: cfg.catch_radius_m,
            catch_cooldown_s: cfg.catch_cooldown_s,
            throw_force: cfg.throw_force,
            upward_force: cfg.upward_force,
        })
    }
}

pub struct Catcher {
    params: CatcherParams,
    /// Sim time at which catching is allowed again.
    cooldown_until_s: f64,
    held: Option<BombId>,
    /// Camera-forward override; facing direction is used when unset.
    pub aim: Option<Vec3>,
    display: Option<Box<dyn FuseDisplay>>,
    display_visible: bool,
}

impl std::fmt::Debug for Catcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catcher")
            .field("params", &self.params)
            .field("cooldown_until_s", &self.cooldown_until_s)
            .field("held", &self.held)
            .field("aim", &self.aim)
            .field("display", &self.display.is_some())
            .field("display_visible", &self.display_visible)
            .finish()
    }
}

impl Catcher {
    /// The display starts hidden.
    pub fn new(params: CatcherParams, display: Option<Box<dyn FuseDisplay>>) -> Self {
        let mut c = Self {
            params,
            cooldown_until_s: f64::NEG_INFINITY,
            held: None,
            aim: None,
            display,
            display_visible: true,
        };
        c.hide_display();
        c
    }

    #[inline]
    pub fn params(&self) -> &CatcherParams {
        &self.params
    }

    #[inline]
    pub fn cooldown_active(&self, now_s: f64) -> bool {
        now_s < self.cooldown_until_s
    }

    #[inline]
    pub fn can_attempt_catch(&self, now_s: f64) -> bool {
        !self.cooldown_active(now_s) && self.held.is_none()
    }

    #[inline]
    pub fn held_bomb(&self) -> Option<BombId> {
        self.held
    }

    #[inline]
    pub fn display_visible(&self) -> bool {
        self.display_visible
    }

    pub(crate) fn release(&mut self) -> Option<BombId> {
        self.held.take()
    }

    pub(crate) fn show_fuse(&mut self, fuse_s: f32) {
        let Some(d) = self.display.as_mut() else {
            return;
        };
        d.set_text(&format!("{fuse_s:.1}"));
        if !self.display_visible {
            d.set_visible(true);
            self.display_visible = true;
        }
    }

    pub(crate) fn hide_display(&mut self) {
        if !self.display_visible {
            return;
        }
        if let Some(d) = self.display.as_mut() {
            d.set_visible(false);
        }
        self.display_visible = false;
    }
}

impl WorldEcs {
    /// Catch the first eligible bomb within range of `agent`.
    ///
    /// No-op (returns `None`) when the agent is dead, has no controller, is
    /// cooling down, already holds a bomb, or nothing catchable is in range.
    pub fn try_catch_bomb(&mut self, agent: AgentId, ctx: &mut Ctx) -> Option<BombId> {
        let (pose, radius, cooldown_s) = {
            let a = self.agent(agent)?;
            let c = a.catcher.as_ref()?;
            if a.dead || !c.can_attempt_catch(ctx.time_s) {
                return None;
            }
            (a.pose, c.params.catch_radius_m, c.params.catch_cooldown_s)
        };
        let picked = self
            .overlap_sphere(pose.pos, radius)
            .into_iter()
            .find_map(|e| match e {
                EntityRef::Bomb(b) if self.bomb(b).is_some_and(|x| x.can_be_caught()) => Some(b),
                _ => None,
            })?;
        let fuse_s = {
            let b = self.bomb_mut(picked)?;
            b.on_caught(agent, &pose, ctx);
            b.fuse_remaining()
        };
        if let Some(c) = self.agent_mut(agent).and_then(|a| a.catcher.as_mut()) {
            c.held = Some(picked);
            c.cooldown_until_s = ctx.time_s + f64::from(cooldown_s);
        }
        ctx.effects.push(Effect::Sound {
            owner: EntityRef::Agent(agent),
            name: sounds::CATCH,
            opts: PlayOpts {
                volume: 1.0,
                ..Default::default()
            },
        });
        ctx.effects.push(Effect::Anim {
            agent,
            name: anim::CATCH,
        });
        ctx.events.push(GameEvent::Caught {
            agent,
            bomb: picked,
            fuse_s,
        });
        metrics::counter!("bomb.catches_total").increment(1);
        log::debug!("agent {agent:?} caught bomb {picked:?} (fuse {fuse_s:.2}s)");
        Some(picked)
    }

    /// Throw the held bomb along the agent's aim. Once a bomb was held, the
    /// reference is dropped and the throw animation fires even if the bomb
    /// is gone or refused the throw.
    pub fn throw_held_bomb(&mut self, agent: AgentId, ctx: &mut Ctx) -> bool {
        let Some(a) = self.agent_mut(agent) else {
            return false;
        };
        if a.dead {
            return false;
        }
        let facing = a.pose.forward();
        let Some(c) = a.catcher.as_mut() else {
            return false;
        };
        let Some(bomb) = c.release() else {
            return false;
        };
        c.hide_display();
        let mut dir = c
            .aim
            .map(Vec3::normalize_or_zero)
            .filter(|v| *v != Vec3::ZERO)
            .unwrap_or(facing);
        dir.y += c.params.upward_force;
        let dir = dir.normalize_or_zero() * c.params.throw_force;
        ctx.effects.push(Effect::Anim {
            agent,
            name: anim::THROW,
        });

        let Some(b) = self.bomb_mut(bomb) else {
            return false;
        };
        if !b.throw_from_holder(dir, ctx) {
            return false;
        }
        let (fuse_s, vel) = (b.fuse_remaining(), b.vel);
        ctx.events.push(GameEvent::Thrown {
            agent,
            bomb,
            fuse_s,
            vel,
        });
        metrics::counter!("bomb.throws_total").increment(1);
        log::debug!("agent {agent:?} threw bomb {bomb:?} (fuse {fuse_s:.2}s)");
        true
    }
}

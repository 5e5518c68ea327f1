//! Bomb entity: fuse, Armed/Held/Exploded lifecycle, and detonation triggers.
//!
//! Per tick a live bomb is evaluated in a fixed priority order:
//! 1. Exploded bombs are inert.
//! 2. Ground probe hit: explode, even while held.
//! 3. Held: burn the fuse; explode when it runs out.
//! 4. Armed and airborne: the fuse is restored to full.
//!
//! The fuse is never reset by a handoff, so the time-to-live carried across
//! back-to-back catch/throw pairs is conserved.

use data_runtime::ConfigError;
use data_runtime::configs::bomb::BombCfg;
use ecs_core::components::{AgentId, BombId, BombState, DetonationCause, EntityRef, Pose};
use glam::Vec3;

use crate::collab::{PlayOpts, sounds};
use crate::ecs::schedule::Ctx;
use crate::ecs::WorldEcs;
use crate::events::{Effect, GameEvent};
use crate::ground::GroundProbe;

/// Validated, construction-time bomb parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BombParams {
    pub explosion_radius_m: f32,
    pub explosion_force: f32,
    pub fuse_s: f32,
    pub ground_check_m: f32,
    pub throw_force: f32,
    pub upward_force: f32,
    pub despawn_delay_s: f32,
    pub probe_lift_m: f32,
    pub hold_offset: Vec3,
    pub gravity_mps2: f32,
}

impl BombParams {
    fn from_cfg_unchecked(cfg: &BombCfg) -> Self {
        Self {
            explosion_radius_m: cfg.explosion_radius_m,
            explosion_force: cfg.explosion_force,
            fuse_s: cfg.fuse_s,
            ground_check_m: cfg.ground_check_m,
            throw_force: cfg.throw_force,
            upward_force: cfg.upward_force,
            despawn_delay_s: cfg.despawn_delay_s,
            probe_lift_m: cfg.probe_lift_m,
            hold_offset: Vec3::from_array(cfg.hold_offset_m),
            gravity_mps2: cfg.gravity_mps2,
        }
    }
}

impl Default for BombParams {
    fn default() -> Self {
        Self::from_cfg_unchecked(&BombCfg::default())
    }
}

impl TryFrom<&BombCfg> for BombParams {
    type Error = ConfigError;

    fn try_from(cfg: &BombCfg) -> Result<Self, Self::Error> {
        cfg.validate()?;
        Ok(Self::from_cfg_unchecked(cfg))
    }
}

/// Result of a bomb entering `Exploded`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Detonation {
    pub cause: DetonationCause,
    pub center: Vec3,
    /// Holder at the moment of detonation, if any.
    pub holder: Option<AgentId>,
    pub radius: f32,
    pub force: f32,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    id: BombId,
    pub pos: Vec3,
    pub vel: Vec3,
    kinematic: bool,
    state: BombState,
    fuse_s: f32,
    params: BombParams,
}

impl Bomb {
    pub fn new(id: BombId, pos: Vec3, params: BombParams) -> Self {
        Self {
            id,
            pos,
            vel: Vec3::ZERO,
            kinematic: false,
            state: BombState::Armed,
            fuse_s: params.fuse_s,
            params,
        }
    }

    #[inline]
    pub fn id(&self) -> BombId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> BombState {
        self.state
    }

    #[inline]
    pub fn holder(&self) -> Option<AgentId> {
        self.state.holder()
    }

    /// Remaining fuse in seconds, always within `[0, fuse_s]`.
    #[inline]
    pub fn fuse_remaining(&self) -> f32 {
        self.fuse_s
    }

    #[inline]
    pub fn params(&self) -> &BombParams {
        &self.params
    }

    #[inline]
    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    #[inline]
    pub fn can_be_caught(&self) -> bool {
        matches!(self.state, BombState::Armed)
    }

    /// Hand the bomb to `catcher`. Callers check `can_be_caught` first; only
    /// the terminal state is guarded here.
    pub fn on_caught(&mut self, catcher: AgentId, holder_pose: &Pose, ctx: &mut Ctx) {
        if self.state.is_terminal() {
            return;
        }
        self.state = BombState::Held { holder: catcher };
        self.kinematic = true;
        self.vel = Vec3::ZERO;
        self.follow(holder_pose);
        ctx.effects.push(Effect::Sound {
            owner: EntityRef::Bomb(self.id),
            name: sounds::BOMB_CATCH,
            opts: PlayOpts::default(),
        });
    }

    /// Snap to the carry offset in front of the holder.
    #[inline]
    pub fn follow(&mut self, holder_pose: &Pose) {
        self.pos = holder_pose.to_world(self.params.hold_offset);
    }

    /// Release from the holder with an impulse along `direction`. Returns
    /// false (and changes nothing) unless the bomb is held.
    pub fn throw_from_holder(&mut self, direction: Vec3, ctx: &mut Ctx) -> bool {
        if !matches!(self.state, BombState::Held { .. }) {
            return false;
        }
        self.state = BombState::Armed;
        self.kinematic = false;
        self.vel = Vec3::ZERO;
        let mut dir = direction.normalize_or_zero();
        dir.y += self.params.upward_force;
        // Unit mass: the impulse is the velocity change
        self.vel += dir * self.params.throw_force;
        ctx.effects.push(Effect::Sound {
            owner: EntityRef::Bomb(self.id),
            name: sounds::BOMB_THROW,
            opts: PlayOpts::default(),
        });
        true
    }

    /// Enter `Exploded`. Idempotent: only the first call returns a detonation
    /// and queues side effects.
    pub fn explode(&mut self, cause: DetonationCause, ctx: &mut Ctx) -> Option<Detonation> {
        if self.state.is_terminal() {
            return None;
        }
        let holder = self.state.holder();
        self.state = BombState::Exploded;
        self.kinematic = true;
        self.vel = Vec3::ZERO;
        ctx.effects.push(Effect::Sound {
            owner: EntityRef::Bomb(self.id),
            name: sounds::BOMB_EXPLODE,
            opts: PlayOpts {
                volume: 1.0,
                spatial: false,
                ..Default::default()
            },
        });
        ctx.effects.push(Effect::GameOver);
        ctx.effects.push(Effect::Despawn {
            bomb: self.id,
            delay_s: self.params.despawn_delay_s,
        });
        Some(Detonation {
            cause,
            center: self.pos,
            holder,
            radius: self.params.explosion_radius_m,
            force: self.params.explosion_force,
        })
    }

    /// Ballistic step for a free bomb. Lands on the first ground contact.
    pub fn integrate(&mut self, ground: &dyn GroundProbe, dt: f32) {
        if self.kinematic || self.state.is_terminal() {
            return;
        }
        self.vel.y += self.params.gravity_mps2 * dt;
        let p0 = self.pos;
        let p1 = p0 + self.vel * dt;
        match ground.sweep(p0, p1) {
            Some(hit) => {
                self.pos = hit;
                self.vel = Vec3::ZERO;
            }
            None => self.pos = p1,
        }
    }

    /// One fuse/trigger evaluation. Returns the detonation if this tick set it off.
    pub fn tick(&mut self, ground: &dyn GroundProbe, ctx: &mut Ctx) -> Option<Detonation> {
        if self.state.is_terminal() {
            return None;
        }
        let origin = self.pos + Vec3::Y * self.params.probe_lift_m;
        if ground.probe_down(origin, self.params.ground_check_m) {
            return self.explode(DetonationCause::GroundContact, ctx);
        }
        match self.state {
            BombState::Held { .. } => {
                self.fuse_s = (self.fuse_s - ctx.dt).max(0.0);
                if self.fuse_s <= 0.0 {
                    return self.explode(DetonationCause::FuseExpired, ctx);
                }
            }
            _ => self.fuse_s = self.params.fuse_s,
        }
        None
    }
}

impl WorldEcs {
    /// Explode `bomb` now. False when the bomb is gone or already exploded.
    pub fn explode_bomb(&mut self, bomb: BombId, cause: DetonationCause, ctx: &mut Ctx) -> bool {
        let Some(det) = self.bomb_mut(bomb).and_then(|b| b.explode(cause, ctx)) else {
            return false;
        };
        self.finish_detonation(bomb, det, ctx);
        true
    }

    /// Post-detonation bookkeeping: release the holder's reference together
    /// with the bomb's, and report who was inside the blast.
    pub(crate) fn finish_detonation(&mut self, bomb: BombId, det: Detonation, ctx: &mut Ctx) {
        if let Some(h) = det.holder
            && let Some(c) = self.agent_mut(h).and_then(|a| a.catcher.as_mut())
            && c.held_bomb() == Some(bomb)
        {
            c.release();
            c.hide_display();
        }
        let agents_in_blast = self.agents_within(det.center, det.radius);
        log::info!(
            "bomb {:?} exploded ({}) at {:?}; holder={:?}, in blast={}",
            bomb,
            det.cause.as_str(),
            det.center,
            det.holder,
            agents_in_blast.len()
        );
        metrics::counter!("bomb.explosions_total", "cause" => det.cause.as_str()).increment(1);
        ctx.events.push(GameEvent::Exploded {
            bomb,
            cause: det.cause,
            center: det.center,
            radius: det.radius,
            force: det.force,
            holder: det.holder,
            agents_in_blast,
            time_s: ctx.time_s,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ground::{FlatGround, NoGround};
    use ecs_core::components::EntityId;

    fn ids() -> (BombId, AgentId) {
        (
            BombId(EntityId {
                index: 0,
                generation: 0,
            }),
            AgentId(EntityId {
                index: 1,
                generation: 0,
            }),
        )
    }

    fn ctx(dt: f32) -> Ctx {
        Ctx {
            dt,
            ..Default::default()
        }
    }

    #[test]
    fn starts_armed_with_full_fuse() {
        let (bid, _) = ids();
        let b = Bomb::new(bid, Vec3::new(0.0, 5.0, 0.0), BombParams::default());
        assert!(b.can_be_caught());
        assert_eq!(b.fuse_remaining(), 3.0);
        assert!(b.holder().is_none());
    }

    #[test]
    fn held_fuse_burns_and_airborne_fuse_resets() {
        let (bid, aid) = ids();
        let mut c = ctx(0.5);
        let mut b = Bomb::new(bid, Vec3::new(0.0, 5.0, 0.0), BombParams::default());
        b.on_caught(aid, &Pose::new(Vec3::new(0.0, 5.0, 0.0), 0.0), &mut c);
        assert!(!b.can_be_caught());
        assert!(b.is_kinematic());
        b.tick(&NoGround, &mut c);
        assert!((b.fuse_remaining() - 2.5).abs() < 1e-6);
        assert!(b.throw_from_holder(Vec3::Z, &mut c));
        // Throw itself keeps the fuse
        assert!((b.fuse_remaining() - 2.5).abs() < 1e-6);
        b.tick(&NoGround, &mut c);
        assert_eq!(b.fuse_remaining(), 3.0);
    }

    #[test]
    fn throw_when_not_held_is_noop() {
        let (bid, _) = ids();
        let mut c = ctx(0.016);
        let mut b = Bomb::new(bid, Vec3::ZERO, BombParams::default());
        assert!(!b.throw_from_holder(Vec3::Z, &mut c));
        assert_eq!(b.state(), BombState::Armed);
        assert!(c.effects.is_empty());
    }

    #[test]
    fn throw_velocity_adds_upward_bias() {
        let (bid, aid) = ids();
        let mut c = ctx(0.016);
        let mut b = Bomb::new(bid, Vec3::ZERO, BombParams::default());
        b.on_caught(aid, &Pose::default(), &mut c);
        b.throw_from_holder(Vec3::new(0.0, 0.0, 5.0), &mut c);
        // normalize(0,0,5) = +Z; +2 up; * 8
        assert!((b.vel - Vec3::new(0.0, 16.0, 8.0)).length() < 1e-5);
        assert!(!b.is_kinematic());
    }

    #[test]
    fn ground_contact_beats_hold() {
        let (bid, aid) = ids();
        let mut c = ctx(0.016);
        let mut b = Bomb::new(bid, Vec3::ZERO, BombParams::default());
        b.on_caught(aid, &Pose::new(Vec3::new(0.0, 0.0, -0.5), 0.0), &mut c);
        let det = b.tick(&FlatGround::new(0.0), &mut c).expect("detonation");
        assert_eq!(det.cause, DetonationCause::GroundContact);
        assert_eq!(det.holder, Some(aid));
        assert_eq!(b.state(), BombState::Exploded);
    }

    #[test]
    fn fuse_never_goes_negative() {
        let (bid, aid) = ids();
        let mut c = ctx(10.0);
        let mut b = Bomb::new(bid, Vec3::new(0.0, 5.0, 0.0), BombParams::default());
        b.on_caught(aid, &Pose::new(Vec3::new(0.0, 5.0, 0.0), 0.0), &mut c);
        let det = b.tick(&NoGround, &mut c).expect("detonation");
        assert_eq!(det.cause, DetonationCause::FuseExpired);
        assert_eq!(b.fuse_remaining(), 0.0);
    }

    #[test]
    fn explode_twice_queues_effects_once() {
        let (bid, _) = ids();
        let mut c = ctx(0.016);
        let mut b = Bomb::new(bid, Vec3::ZERO, BombParams::default());
        assert!(b.explode(DetonationCause::Forced, &mut c).is_some());
        let n = c.effects.len();
        assert!(b.explode(DetonationCause::Forced, &mut c).is_none());
        assert_eq!(c.effects.len(), n);
        assert_eq!(
            c.effects.iter().filter(|e| matches!(e, Effect::GameOver)).count(),
            1
        );
    }

    #[test]
    fn exploded_bomb_ignores_catch_and_tick() {
        let (bid, aid) = ids();
        let mut c = ctx(0.016);
        let mut b = Bomb::new(bid, Vec3::ZERO, BombParams::default());
        b.explode(DetonationCause::Forced, &mut c);
        b.on_caught(aid, &Pose::default(), &mut c);
        assert_eq!(b.state(), BombState::Exploded);
        assert!(b.tick(&FlatGround::new(0.0), &mut c).is_none());
    }

    #[test]
    fn free_fall_lands_on_ground() {
        let (bid, _) = ids();
        let mut b = Bomb::new(bid, Vec3::new(0.0, 1.0, 0.0), BombParams::default());
        let g = FlatGround::new(0.0);
        for _ in 0..120 {
            b.integrate(&g, 0.016);
        }
        assert_eq!(b.pos.y, 0.0);
        assert_eq!(b.vel, Vec3::ZERO);
    }
}

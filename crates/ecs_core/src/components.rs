//! ECS component definitions shared by the authoritative sim and input glue.
//!
//! The server owns every mutation of these types; clients and tools only read
//! them or build `InputCommand`s that the server consumes on the next tick.

use glam::{Quat, Vec3};

/// Generation-checked entity handle.
///
/// A handle stays valid until its slot is freed; after that every lookup with
/// the old handle fails even if the slot is reused by a new entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

/// Player agent (carries the catch controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub EntityId);

/// Live bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct BombId(pub EntityId);

/// Entity returned by range queries. Callers filter by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Agent(AgentId),
    Bomb(BombId),
}

/// World pose: position plus yaw about +Y. Yaw 0 faces +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub pos: Vec3,
    pub yaw: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

impl Pose {
    #[must_use]
    pub fn new(pos: Vec3, yaw: f32) -> Self {
        Self { pos, yaw }
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Horizontal facing direction (unit length).
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Map a local offset (x right, y up, z forward) into world space.
    #[inline]
    #[must_use]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.pos + self.rotation() * local
    }
}

/// Bomb lifecycle. The holder lives inside `Held` so it cannot exist in any
/// other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BombState {
    #[default]
    Armed,
    Held {
        holder: AgentId,
    },
    Exploded,
}

impl BombState {
    #[inline]
    #[must_use]
    pub fn holder(&self) -> Option<AgentId> {
        match *self {
            Self::Held { holder } => Some(holder),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exploded)
    }
}

/// Why a bomb went off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub enum DetonationCause {
    GroundContact,
    FuseExpired,
    /// Requested directly through `explode` (scripted or external).
    Forced,
}

impl DetonationCause {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GroundContact => "ground",
            Self::FuseExpired => "fuse",
            Self::Forced => "forced",
        }
    }
}

/// Physical keys the hot-potato bindings understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    LeftShift,
    MouseLeft,
    MouseRight,
    E,
    F,
    Q,
    R,
}

/// Gameplay commands produced by the input bindings; the server consumes them
/// during the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    CatchBomb,
    ThrowBomb,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn yaw_zero_faces_plus_z() {
        let p = Pose::new(Vec3::ZERO, 0.0);
        assert!(approx(p.forward(), Vec3::Z));
    }

    #[test]
    fn local_offset_follows_yaw() {
        let p = Pose::new(Vec3::new(1.0, 1.0, 1.0), std::f32::consts::FRAC_PI_2);
        // Quarter turn: forward becomes +X
        let w = p.to_world(Vec3::new(0.0, 0.0, 0.5));
        assert!(approx(w, Vec3::new(1.5, 1.0, 1.0)));
    }

    #[test]
    fn holder_only_in_held() {
        let h = AgentId(EntityId {
            index: 0,
            generation: 1,
        });
        assert_eq!(BombState::Held { holder: h }.holder(), Some(h));
        assert_eq!(BombState::Armed.holder(), None);
        assert_eq!(BombState::Exploded.holder(), None);
        assert!(BombState::Exploded.is_terminal());
    }
}

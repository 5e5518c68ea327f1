//! Gameplay events recorded per tick for callers (tools, tests, UI glue).

use ecs_core::components::{AgentId, BombId, DetonationCause};
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Caught {
        agent: AgentId,
        bomb: BombId,
        fuse_s: f32,
    },
    Thrown {
        agent: AgentId,
        bomb: BombId,
        fuse_s: f32,
        vel: Vec3,
    },
    Exploded {
        bomb: BombId,
        cause: DetonationCause,
        center: Vec3,
        radius: f32,
        force: f32,
        holder: Option<AgentId>,
        agents_in_blast: Vec<AgentId>,
        time_s: f64,
    },
    Despawned {
        bomb: BombId,
    },
    GameOver,
}

/// Outbound side effects queued by systems and dispatched to `Services`
/// once the tick's state transitions are complete.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Sound {
        owner: ecs_core::components::EntityRef,
        name: &'static str,
        opts: crate::collab::PlayOpts,
    },
    Anim {
        agent: AgentId,
        name: &'static str,
    },
    GameOver,
    Despawn {
        bomb: BombId,
        delay_s: f32,
    },
}

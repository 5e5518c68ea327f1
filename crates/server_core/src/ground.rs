//! Ground-tagged surfaces and the downward probe bombs use to detect landing.

use glam::Vec3;

use crate::ecs::geom::{segment_aabb_enter_t, segment_plane_down_t};

/// Extra probe length so a body resting exactly at the probe tip still registers.
pub const PROBE_SKIN_M: f32 = 1e-4;

/// Spatial queries against ground-tagged geometry.
pub trait GroundProbe {
    /// First ground contact along `p0 -> p1`, if any.
    fn sweep(&self, p0: Vec3, p1: Vec3) -> Option<Vec3>;

    /// Ray straight down from `origin`; true when ground lies within `max_dist`.
    fn probe_down(&self, origin: Vec3, max_dist: f32) -> bool {
        self.sweep(origin, origin - Vec3::Y * (max_dist + PROBE_SKIN_M))
            .is_some()
    }
}

/// No ground at all (bombs only go off by fuse).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn sweep(&self, _p0: Vec3, _p1: Vec3) -> Option<Vec3> {
        None
    }
}

/// Infinite horizontal ground plane.
#[derive(Copy, Clone, Debug)]
pub struct FlatGround {
    pub y: f32,
}

impl FlatGround {
    pub fn new(y: f32) -> Self {
        Self { y }
    }
}

impl GroundProbe for FlatGround {
    fn sweep(&self, p0: Vec3, p1: Vec3) -> Option<Vec3> {
        let t = segment_plane_down_t(p0, p1, self.y)?;
        let mut hit = p0 + (p1 - p0) * t;
        hit.y = self.y;
        Some(hit)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundBox {
    pub min: Vec3,
    pub max: Vec3,
}

/// Set of ground-tagged boxes (floors, platforms).
#[derive(Clone, Debug, Default)]
pub struct StaticGround {
    pub boxes: Vec<GroundBox>,
}

impl StaticGround {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, min: Vec3, max: Vec3) -> Self {
        self.boxes.push(GroundBox { min, max });
        self
    }
}

impl GroundProbe for StaticGround {
    fn sweep(&self, p0: Vec3, p1: Vec3) -> Option<Vec3> {
        let mut best: Option<(f32, &GroundBox)> = None;
        for b in &self.boxes {
            if let Some(t) = segment_aabb_enter_t(p0, p1, b.min, b.max)
                && best.is_none_or(|(bt, _)| t < bt)
            {
                best = Some((t, b));
            }
        }
        best.map(|(t, b)| {
            let mut hit = p0 + (p1 - p0) * t;
            // Landing from above rests on the top face
            if p0.y >= b.max.y {
                hit.y = b.max.y;
            }
            hit
        })
    }
}

//! Small geometry helpers reusable by systems.

use glam::Vec3;

/// Compute the parametric `t` at which a segment `[p0, p1]` first enters an axis-aligned AABB.
/// Returns `None` when no intersection occurs. `t` is in `[0, 1]`.
#[inline]
pub fn segment_aabb_enter_t(p0: Vec3, p1: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let d = p1 - p0;
    let mut tmin = 0.0f32;
    let mut tmax = 1.0f32;
    for i in 0..3 {
        let s = p0[i];
        let dir = d[i];
        let minb = min[i];
        let maxb = max[i];
        if dir.abs() < 1e-6 {
            if s < minb || s > maxb {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (minb - s) * inv;
            let mut t1 = (maxb - s) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
            if tmin > tmax {
                return None;
            }
        }
    }
    Some(tmin)
}

/// Parametric `t` at which the segment crosses the horizontal plane `y` going down.
#[inline]
pub fn segment_plane_down_t(p0: Vec3, p1: Vec3, y: f32) -> Option<f32> {
    if p0.y < y || p1.y > y {
        return None;
    }
    let dy = p0.y - p1.y;
    if dy <= 1e-9 {
        // Lying in the plane
        return Some(0.0);
    }
    Some(((p0.y - y) / dy).clamp(0.0, 1.0))
}

//! Slot geometry shared by the formations.
use crate::config::PursuitShape;
use crate::util::geometry::bearing_to;
use crate::{Point, Vec2f};

/// Closer than this to the target the pursuit axis falls back to +x
const MIN_AXIS_LENGTH: f64 = 0.01;

/// Unit vector from the leader toward the target.
pub fn forward_axis(leader: &Point, target: &Point) -> Vec2f {
    let v = target - leader;
    let dist = v.norm();
    if dist > MIN_AXIS_LENGTH {
        v / dist
    } else {
        Vec2f::new(1.0, 0.0)
    }
}

/// Parabolic U behind the leader, opening toward the target.
///
/// Slot `i` sits at lateral index `i - (count - 1) / 2`; its depth toward the
/// target grows with the square of that index, so the outer slots wrap
/// around the leader's flanks.
pub fn u_slots(leader: &Point, target: &Point, count: usize, shape: &PursuitShape) -> Vec<Point> {
    let forward = forward_axis(leader, target);
    let right = Vec2f::new(-forward.y, forward.x);
    let pivot = leader - forward * shape.rear_offset;
    let center_idx = (count as f64 - 1.0) / 2.0;

    (0..count)
        .map(|i| {
            let idx = i as f64 - center_idx;
            let lateral = idx * shape.lateral_spacing;
            let depth = idx * idx * shape.depth_factor;
            pivot + right * lateral + forward * depth
        })
        .collect()
}

/// Trap slots on a circle around `center`.
///
/// The first half of the slots shifts by `+amplitude * sin(phase)`, the
/// second half by the opposite amount, so neighbouring pairs open and close
/// a gap that sweeps around the leader.
pub fn trap_slots(
    center: &Point,
    radius: f64,
    base_angles_deg: &[f64],
    phase: f64,
    amplitude_deg: f64,
) -> Vec<Point> {
    let half = base_angles_deg.len() / 2;
    let shift = amplitude_deg.to_radians() * phase.sin();
    base_angles_deg
        .iter()
        .enumerate()
        .map(|(slot, base)| {
            let direction = if slot < half { 1.0 } else { -1.0 };
            let angle = base.to_radians() + shift * direction;
            center + Vec2f::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Yaw in degrees that makes a vehicle at `from` face `toward`.
pub fn facing(from: &Point, toward: &Point) -> f64 {
    bearing_to(from, toward)
}

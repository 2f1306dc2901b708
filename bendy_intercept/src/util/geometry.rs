//! Planar helpers shared by the planner and the formations.
//!
//! Angles are in degrees unless the name says otherwise. Bearings are measured
//! counter-clockwise from +x and wrapped to (-180, 180].
use crate::{Obstacle, Point, Vec2f};

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_180(angle_deg: f64) -> f64 {
    let mut angle = angle_deg % 360.0;
    if angle > 180.0 {
        angle -= 360.0;
    } else if angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

/// Clamps `value` into `[min, max]`. When the band is inverted the lower
/// bound wins, so this never panics the way `f64::clamp` does.
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Bearing in degrees from `origin` to `dest`.
pub fn bearing_to(origin: &Point, dest: &Point) -> f64 {
    heading_of(&(dest - origin))
}

/// Heading in degrees of a vector. The zero vector points along +x.
pub fn heading_of(v: &Vec2f) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Point `distance` away from `origin` along `bearing_deg`.
pub fn offset_bearing(origin: &Point, bearing_deg: f64, distance: f64) -> Point {
    let rad = bearing_deg.to_radians();
    Point::new(
        origin.x + rad.cos() * distance,
        origin.y + rad.sin() * distance,
    )
}

/// Unit vector along `v`, or the zero vector when `v` has no length.
pub fn normalize_or_zero(v: &Vec2f) -> Vec2f {
    v.try_normalize(0.0).unwrap_or_else(Vec2f::zeros)
}

/// Distance from `point` to the closed segment `start -> end`.
/// A zero-length segment degenerates to the point-to-point distance.
pub fn point_to_segment_distance(point: &Point, start: &Point, end: &Point) -> f64 {
    let seg = end - start;
    let seg_len_sq = seg.norm_squared();
    if seg_len_sq <= 0.0 {
        return (point - start).norm();
    }
    let t = constrain((point - start).dot(&seg) / seg_len_sq, 0.0, 1.0);
    let closest = start + seg * t;
    (point - closest).norm()
}

/// Smallest clearance between the segment `start -> end` and any obstacle
/// surface. Negative when the segment cuts into a disc, `+inf` without
/// obstacles.
pub fn segment_margin(start: &Point, end: &Point, obstacles: &[Obstacle]) -> f64 {
    obstacles
        .iter()
        .map(|obstacle| point_to_segment_distance(&obstacle.center, start, end) - obstacle.radius)
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_180_range() {
        assert_eq!(wrap_180(0.0), 0.0);
        assert_eq!(wrap_180(180.0), 180.0);
        assert_eq!(wrap_180(-180.0), 180.0);
        assert_eq!(wrap_180(190.0), -170.0);
        assert_eq!(wrap_180(-190.0), 170.0);
        assert_eq!(wrap_180(720.0 + 45.0), 45.0);
        assert_eq!(wrap_180(-540.0), 180.0);
    }

    #[test]
    fn test_constrain_inverted_band() {
        assert_eq!(constrain(5.0, 0.0, 10.0), 5.0);
        assert_eq!(constrain(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(constrain(11.0, 0.0, 10.0), 10.0);
        // lower bound wins when min > max
        assert_eq!(constrain(15.0, 2.0, 1.0), 2.0);
    }

    #[test]
    fn test_offset_and_bearing_agree() {
        let origin = Point::new(3.0, -4.0);
        let p = offset_bearing(&origin, 30.0, 10.0);
        assert!((bearing_to(&origin, &p) - 30.0).abs() < 1e-9);
        assert!(((p - origin).norm() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize_or_zero(&Vec2f::zeros()), Vec2f::zeros());
        let n = normalize_or_zero(&Vec2f::new(3.0, 4.0));
        assert!((n - Vec2f::new(0.6, 0.8)).norm() < 1e-12);
    }

    #[test]
    fn test_segment_margin_degenerate_segment() {
        let obstacle = Obstacle {
            center: Point::new(3.0, 4.0),
            radius: 1.5,
        };
        let p = Point::new(0.0, 0.0);
        let margin = segment_margin(&p, &p, &[obstacle]);
        assert!((margin - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_segment_margin_projection_clamped() {
        let obstacle = Obstacle {
            center: Point::new(5.0, 2.0),
            radius: 1.0,
        };
        let start = Point::new(0.0, 0.0);
        // closest point lies on the segment interior
        let margin = segment_margin(&start, &Point::new(10.0, 0.0), &[obstacle]);
        assert!((margin - 1.0).abs() < 1e-12);
        // closest point clamps to the end
        let margin = segment_margin(&start, &Point::new(2.0, 0.0), &[obstacle]);
        assert!((margin - (13f64.sqrt() - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_segment_margin_without_obstacles() {
        let m = segment_margin(&Point::new(0.0, 0.0), &Point::new(1.0, 0.0), &[]);
        assert_eq!(m, f64::INFINITY);
    }
}

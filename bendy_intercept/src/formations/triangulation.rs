//! Destination estimation from observed motion rays.
use tracing::debug;

use crate::{Point, Vec2f};

/// Leader position and unit heading sampled at the end of a recon window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vec2f,
}

/// Intersects two rays. Returns `None` for near-parallel rays and for
/// crossings behind either origin or further than `max_distance` along the
/// first ray. The distance along the second ray is not bounded.
pub fn intersect_rays(
    first: &Ray,
    second: &Ray,
    parallel_tolerance: f64,
    max_distance: f64,
) -> Option<Point> {
    let d1 = first.direction;
    let d2 = second.direction;
    let det = d1.x * d2.y - d1.y * d2.x;
    if det.abs() < parallel_tolerance {
        return None;
    }

    let delta = second.origin - first.origin;
    let t = (delta.x * d2.y - delta.y * d2.x) / det;
    let u = (delta.x * d1.y - delta.y * d1.x) / det;

    if t > 0.0 && u > 0.0 && t < max_distance {
        Some(first.origin + d1 * t)
    } else {
        None
    }
}

/// Running estimate of where the leader is headed.
///
/// Each new ray is intersected with the previous one; a valid crossing is
/// averaged half and half into the current estimate.
#[derive(Clone, Debug)]
pub struct Triangulator {
    rays: Vec<Ray>,
    estimate: Option<Point>,
    parallel_tolerance: f64,
    max_distance: f64,
}

impl Triangulator {
    pub fn new(parallel_tolerance: f64, max_distance: f64) -> Self {
        Self {
            rays: vec![],
            estimate: None,
            parallel_tolerance,
            max_distance,
        }
    }

    /// Records a ray and refines the estimate. Returns the crossing found
    /// this time, if any.
    pub fn observe(&mut self, ray: Ray) -> Option<Point> {
        self.rays.push(ray);
        let n = self.rays.len();
        if n < 2 {
            return None;
        }
        let crossing = intersect_rays(
            &self.rays[n - 2],
            &self.rays[n - 1],
            self.parallel_tolerance,
            self.max_distance,
        )?;
        let estimate = match self.estimate {
            Some(current) => (current + crossing) * 0.5,
            None => crossing,
        };
        debug!(x = estimate.x, y = estimate.y, "destination estimate updated");
        self.estimate = Some(estimate);
        Some(crossing)
    }

    pub fn estimate(&self) -> Option<Point> {
        self.estimate
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn clear(&mut self) {
        self.rays.clear();
        self.estimate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::normalize_or_zero;

    fn ray_toward(origin: Point, through: Point) -> Ray {
        Ray {
            origin,
            direction: normalize_or_zero(&(through - origin)),
        }
    }

    #[test]
    fn test_recovers_known_crossing() {
        let goal = Point::new(42.0, -7.5);
        let a = ray_toward(Point::new(0.0, 0.0), goal);
        let b = ray_toward(Point::new(10.0, -30.0), goal);
        let crossing = intersect_rays(&a, &b, 0.001, 500.0).unwrap();
        assert!((crossing - goal).norm() < 1e-9);
    }

    #[test]
    fn test_parallel_rays_give_nothing() {
        let a = Ray {
            origin: Point::new(0.0, 0.0),
            direction: Vec2f::new(1.0, 0.0),
        };
        let b = Ray {
            origin: Point::new(0.0, 5.0),
            direction: Vec2f::new(1.0, 0.0),
        };
        assert_eq!(intersect_rays(&a, &b, 0.001, 500.0), None);
    }

    #[test]
    fn test_rejects_crossing_behind_or_too_far() {
        let goal = Point::new(-20.0, 0.0);
        // both rays point away from the crossing
        let a = Ray {
            origin: Point::new(0.0, 0.0),
            direction: Vec2f::new(1.0, 0.0),
        };
        let b = ray_toward(Point::new(0.0, 10.0), goal);
        let b = Ray {
            direction: -b.direction,
            ..b
        };
        assert_eq!(intersect_rays(&a, &b, 0.001, 500.0), None);

        let far = Point::new(1000.0, 0.0);
        let a = ray_toward(Point::new(0.0, 0.0), far);
        let b = ray_toward(Point::new(0.0, 10.0), far);
        assert_eq!(intersect_rays(&a, &b, 0.001, 500.0), None);
    }

    #[test]
    fn test_only_first_ray_length_is_bounded() {
        let first = Ray {
            origin: Point::new(0.0, 0.0),
            direction: Vec2f::new(1.0, 0.0),
        };
        // 600 along the second ray but only 10 along the first
        let second = Ray {
            origin: Point::new(10.0, 600.0),
            direction: Vec2f::new(0.0, -1.0),
        };
        let crossing = intersect_rays(&first, &second, 0.001, 500.0).unwrap();
        assert!((crossing - Point::new(10.0, 0.0)).norm() < 1e-9);
        // swapped, the long leg is the bounded one
        assert_eq!(intersect_rays(&second, &first, 0.001, 500.0), None);
    }

    #[test]
    fn test_estimate_blends_half_and_half() {
        let mut triangulator = Triangulator::new(0.001, 500.0);
        let first = Point::new(20.0, 0.0);
        // on the second ray's line, so the third ray crosses it there
        let second = Point::new(30.0, 10.0);
        assert_eq!(
            triangulator.observe(ray_toward(Point::new(0.0, 0.0), first)),
            None
        );
        triangulator.observe(ray_toward(Point::new(0.0, -20.0), first));
        assert!((triangulator.estimate().unwrap() - first).norm() < 1e-9);
        triangulator.observe(ray_toward(Point::new(0.0, 10.0), second));
        let expected = (first + second) * 0.5;
        assert!((triangulator.estimate().unwrap() - expected).norm() < 1e-9);

        // a parallel follow-up leaves the estimate alone
        triangulator.observe(ray_toward(Point::new(0.0, 20.0), Point::new(20.0, 20.0)));
        assert!((triangulator.estimate().unwrap() - expected).norm() < 1e-9);
        assert_eq!(triangulator.rays().len(), 4);
    }
}

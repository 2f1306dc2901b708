pub extern crate nalgebra as na;
use na::Vector2;

pub mod config;
pub mod error;
pub mod formations;
pub mod local_planners;
pub mod simulation;
pub mod util;
pub mod vehicle;

pub use crate::config::{PlannerConfig, ScenarioConfig};
pub use crate::error::{ConfigError, SimulationError};
pub use crate::formations::formation::{build_formation, Formation, FormationKind};
pub use crate::local_planners::bendy_ruler::BendyRuler;
pub use crate::local_planners::local_planner::LocalPlanner;
pub use crate::simulation::{ObstacleToggle, Simulation};
pub use crate::vehicle::{Vehicle, VehicleLimits};

/// Obstacle ID handed out by the static obstacle registry
pub type ObstacleId = usize;

/// Point in the plane
pub type Point = Vector2<f64>;

/// 2-vector
pub type Vec2f = Vector2<f64>;

/// Circular obstacle as seen by the avoidance planner.
///
/// Dynamic obstacles are rebuilt every tick by a formation, static ones are
/// owned by the [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    /// Center of the disc
    pub center: Point,
    /// Radius of the disc, never negative
    pub radius: f64,
}

impl Obstacle {
    /// Creates a new obstacle, rejecting negative or non-finite radii.
    pub fn new(center: Point, radius: f64) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "obstacle.radius",
                reason: format!("must be a finite value >= 0, got {radius}"),
            });
        }
        Ok(Self { center, radius })
    }

    /// True if `point` lies inside the disc.
    pub fn contains(&self, point: Point) -> bool {
        (point - self.center).norm() < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_rejects_negative_radius() {
        assert!(Obstacle::new(Point::new(0.0, 0.0), -1.0).is_err());
        assert!(Obstacle::new(Point::new(0.0, 0.0), f64::NAN).is_err());
        let obstacle = Obstacle::new(Point::new(1.0, 1.0), 0.0).unwrap();
        assert_eq!(obstacle.radius, 0.0);
    }

    #[test]
    fn test_obstacle_contains() {
        let obstacle = Obstacle::new(Point::new(0.0, 0.0), 2.0).unwrap();
        assert!(obstacle.contains(Point::new(1.0, 1.0)));
        assert!(!obstacle.contains(Point::new(2.0, 0.5)));
    }
}

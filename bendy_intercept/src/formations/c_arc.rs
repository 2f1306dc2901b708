use super::formation::Formation;
use super::pursuit::facing;
use crate::config::CArcConfig;
use crate::{ConfigError, Obstacle, Point, Vec2f, Vehicle};

/// Baseline coordinator: defenders hold a fixed C arc on the far side of
/// the leader from the target, with no phases or role changes.
pub struct CArcFormation {
    config: CArcConfig,
    defenders: Vec<Vehicle>,
    target: Point,
    success: bool,
}

impl CArcFormation {
    pub fn new(config: CArcConfig, leader_start: Point) -> Result<Self, ConfigError> {
        config.validate()?;
        let defenders = (0..config.defender_count)
            .map(|_| Vehicle::new(leader_start, config.limits))
            .collect();
        Ok(Self {
            config,
            defenders,
            target: Point::zeros(),
            success: false,
        })
    }

    /// Slot positions around `leader` for the current target
    pub fn slots(&self, leader: &Point) -> Vec<Point> {
        let n = self.config.defender_count;
        let to_target = self.target - leader;
        let base_angle = to_target.y.atan2(to_target.x) + std::f64::consts::PI;
        let arc_width = (self.config.slot_spacing_deg * (n as f64 - 1.0))
            .min(self.config.max_arc_deg)
            .to_radians();
        let start_angle = base_angle - arc_width / 2.0;
        let step_angle = if n > 1 {
            arc_width / (n as f64 - 1.0)
        } else {
            0.0
        };

        (0..n)
            .map(|i| {
                let theta = start_angle + i as f64 * step_angle;
                leader + Vec2f::new(theta.cos(), theta.sin()) * self.config.formation_radius
            })
            .collect()
    }
}

impl Formation for CArcFormation {
    fn update(&mut self, dt: f64, leader: &Vehicle) -> Vec<Obstacle> {
        self.success = (leader.position - self.target).norm() < self.config.success_distance;

        let slots = self.slots(&leader.position);
        let radius = self.config.defender_radius;
        self.defenders
            .iter_mut()
            .zip(slots.iter())
            .map(|(defender, slot)| {
                defender.hold_slot(dt, *slot, facing(slot, &leader.position));
                Obstacle {
                    center: defender.position,
                    radius,
                }
            })
            .collect()
    }

    fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    fn target(&self) -> Point {
        self.target
    }

    fn defenders(&self) -> &[Vehicle] {
        &self.defenders
    }

    fn is_success(&self) -> bool {
        self.success
    }
}

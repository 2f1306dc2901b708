use tracing::debug;

use super::assignment::assign_min_cost;
use super::formation::Formation;
use super::pursuit::{facing, u_slots};
use crate::config::RoleSwapConfig;
use crate::{ConfigError, Obstacle, Point, Vehicle};

/// Continuous U pursuit behind the leader.
///
/// Near the target the leader-to-target axis can swing quickly, which would
/// send defenders across the whole formation to reach their slots. While the
/// leader is within `proximity_threshold` of the target the slots are
/// re-solved as a minimum cost assignment, at most once per cooldown.
pub struct RoleSwapFormation {
    config: RoleSwapConfig,
    defenders: Vec<Vehicle>,
    /// `slot_to_defender[slot]` indexes into `defenders`
    slot_to_defender: Vec<usize>,
    reassign_timer: f64,
    target: Point,
    success: bool,
}

impl RoleSwapFormation {
    pub fn new(config: RoleSwapConfig, leader_start: Point) -> Result<Self, ConfigError> {
        config.validate()?;
        let defenders = (0..config.defender_count)
            .map(|_| Vehicle::new(leader_start, config.limits))
            .collect();
        Ok(Self {
            slot_to_defender: (0..config.defender_count).collect(),
            config,
            defenders,
            reassign_timer: 0.0,
            target: Point::zeros(),
            success: false,
        })
    }

    pub fn slot_to_defender(&self) -> &[usize] {
        &self.slot_to_defender
    }

    fn optimize_assignments(&mut self, slots: &[Point]) {
        let positions: Vec<Point> = self.defenders.iter().map(|d| d.position).collect();
        let assignment = assign_min_cost(&positions, slots);
        if assignment != self.slot_to_defender {
            debug!(from = ?self.slot_to_defender, to = ?assignment, "swapping pursuit roles");
        }
        self.slot_to_defender = assignment;
    }
}

impl Formation for RoleSwapFormation {
    fn update(&mut self, dt: f64, leader: &Vehicle) -> Vec<Obstacle> {
        self.reassign_timer -= dt;

        let dist_to_target = (self.target - leader.position).norm();
        self.success = dist_to_target < self.config.success_distance;

        let slots = u_slots(
            &leader.position,
            &self.target,
            self.config.defender_count,
            &self.config.shape,
        );

        if dist_to_target < self.config.proximity_threshold && self.reassign_timer <= 0.0 {
            self.optimize_assignments(&slots);
            self.reassign_timer = self.config.reassign_cooldown;
        }

        for (slot, defender_idx) in self.slot_to_defender.iter().enumerate() {
            let target = slots[slot];
            let yaw = facing(&target, &leader.position);
            self.defenders[*defender_idx].hold_slot(dt, target, yaw);
        }

        let radius = self.config.defender_radius;
        self.slot_to_defender
            .iter()
            .map(|idx| Obstacle {
                center: self.defenders[*idx].position,
                radius,
            })
            .collect()
    }

    fn set_target(&mut self, target: Point) {
        self.target = target;
        self.reassign_timer = 0.0;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn leader_at(x: f64, y: f64) -> Vehicle {
        Vehicle::new(Point::new(x, y), Default::default())
    }

    #[test]
    fn test_no_reassignment_far_from_target() {
        let mut formation =
            RoleSwapFormation::new(RoleSwapConfig::default(), Point::new(0.0, 0.0)).unwrap();
        formation.set_target(Point::new(50.0, 0.0));
        let leader = leader_at(0.0, 0.0);
        for _ in 0..120 {
            let obstacles = formation.update(1.0 / 60.0, &leader);
            assert_eq!(obstacles.len(), 4);
        }
        assert_eq!(formation.slot_to_defender(), &[0, 1, 2, 3]);
        assert!(!formation.is_success());
    }

    #[test]
    fn test_swaps_when_axis_flips_near_target() {
        let mut formation =
            RoleSwapFormation::new(RoleSwapConfig::default(), Point::new(0.0, 0.0)).unwrap();
        let leader = leader_at(0.0, 0.0);
        // settle the U with the target to the east
        formation.set_target(Point::new(3.0, 0.0));
        for _ in 0..300 {
            formation.update(1.0 / 60.0, &leader);
        }
        // swing the target to the west: the U mirrors, and rotating every
        // defender one slot round is cheaper than keeping the old roles
        formation.set_target(Point::new(-3.0, 0.0));
        formation.update(1.0 / 60.0, &leader);
        assert_eq!(formation.slot_to_defender(), &[2, 3, 0, 1]);
        assert!(!formation.is_success());
    }

    #[test]
    fn test_cooldown_limits_resolves() {
        let config = RoleSwapConfig {
            reassign_cooldown: 1.0,
            ..RoleSwapConfig::default()
        };
        let mut formation = RoleSwapFormation::new(config, Point::new(0.0, 0.0)).unwrap();
        let leader = leader_at(0.0, 0.0);
        formation.set_target(Point::new(1.0, 0.0));
        formation.update(0.1, &leader);
        assert!(formation.is_success());
        let before = formation.slot_to_defender().to_vec();
        // flipping the target inside the cooldown keeps the old assignment
        formation.target = Point::new(-1.0, 0.0);
        formation.update(0.1, &leader);
        assert_eq!(formation.slot_to_defender(), before.as_slice());
    }
}

use tracing::debug;

use super::assignment::assign_min_cost;
use super::formation::Formation;
use super::pursuit::{facing, trap_slots, u_slots};
use super::triangulation::{Ray, Triangulator};
use crate::config::InterceptConfig;
use crate::util::geometry::normalize_or_zero;
use crate::{ConfigError, Obstacle, Point, Vehicle};

/// Leader displacements below this per tick have no usable heading
const MIN_HEADING_DISPLACEMENT: f64 = 0.001;

/// Phase of the intercept coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// U formation pushing the leader toward the target
    Pursuit,
    /// Still in U formation but invisible to the leader's planner
    Recon,
    /// Defenders ring the leader near the target
    Trap,
}

/// Three phase coordinator.
///
/// Outside the trap the defenders chase the leader in a U. Each chase cycle
/// ends with a recon window in which the defenders stop registering as
/// obstacles; when the window closes the leader's free heading is recorded
/// as a ray, and consecutive rays are triangulated into an estimate of the
/// leader's own destination. Once the leader comes within
/// `success_distance` of the target the defenders are assigned to trap slots
/// around it and hold them until the leader escapes past `exit_distance`.
pub struct InterceptFormation {
    config: InterceptConfig,
    defenders: Vec<Vehicle>,
    target: Point,
    timer: f64,
    trap_active: bool,
    recon_active: bool,
    /// `assigned_slots[slot]` indexes into `defenders`; empty outside the trap
    assigned_slots: Vec<usize>,
    recon_attempts: u32,
    triangulator: Triangulator,
    last_leader_pos: Point,
}

impl InterceptFormation {
    pub fn new(config: InterceptConfig, leader_start: Point) -> Result<Self, ConfigError> {
        config.validate()?;
        let defenders = (0..config.defender_count())
            .map(|_| Vehicle::new(leader_start, config.limits))
            .collect();
        let triangulator = Triangulator::new(config.parallel_tolerance, config.max_ray_distance);
        Ok(Self {
            config,
            defenders,
            target: Point::zeros(),
            timer: 0.0,
            trap_active: false,
            recon_active: false,
            assigned_slots: vec![],
            recon_attempts: 0,
            triangulator,
            last_leader_pos: leader_start,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.trap_active {
            Phase::Trap
        } else if self.recon_active {
            Phase::Recon
        } else {
            Phase::Pursuit
        }
    }

    pub fn is_recon(&self) -> bool {
        self.phase() == Phase::Recon
    }

    pub fn estimated_destination(&self) -> Option<Point> {
        self.triangulator.estimate()
    }

    pub fn observed_rays(&self) -> &[Ray] {
        self.triangulator.rays()
    }

    pub fn recon_attempts(&self) -> u32 {
        self.recon_attempts
    }

    pub fn assigned_slots(&self) -> &[usize] {
        &self.assigned_slots
    }

    /// Seconds since the target was last set
    pub fn timer(&self) -> f64 {
        self.timer
    }

    fn trap_phase(&self) -> f64 {
        self.timer * self.config.trap_arc_rate
    }

    fn trap_targets(&self, center: &Point) -> Vec<Point> {
        trap_slots(
            center,
            self.config.trap_radius,
            &self.config.trap_slot_angles_deg,
            self.trap_phase(),
            self.config.trap_arc_amplitude_deg,
        )
    }

    fn enter_trap(&mut self, leader: &Point) {
        let slots = self.trap_targets(leader);
        let positions: Vec<Point> = self.defenders.iter().map(|d| d.position).collect();
        self.assigned_slots = assign_min_cost(&positions, &slots);
        self.trap_active = true;
        self.recon_active = false;
        debug!(assignment = ?self.assigned_slots, timer = self.timer, "entering trap");
    }

    fn exit_trap(&mut self) {
        self.trap_active = false;
        self.assigned_slots.clear();
        debug!(timer = self.timer, "leader escaped trap");
    }

    fn update_recon(&mut self, displacement: f64, heading: Point) {
        if self.recon_attempts >= self.config.max_recon_attempts {
            self.recon_active = false;
            return;
        }

        let chase = if self.recon_attempts == 0 {
            self.config.chase_initial
        } else {
            self.config.chase_duration
        };
        let cycle = chase + self.config.recon_window;
        let local_time = self.timer % cycle;

        let was_recon = self.recon_active;
        self.recon_active = local_time > chase;

        if was_recon && !self.recon_active {
            self.recon_attempts += 1;
            debug!(attempt = self.recon_attempts, displacement, "recon window closed");
            if displacement > self.config.min_observation_speed {
                self.triangulator.observe(Ray {
                    origin: self.last_leader_pos,
                    direction: heading,
                });
            }
        }
    }

    fn execute_trap(&mut self, dt: f64, leader: &Point) -> Vec<Obstacle> {
        let slots = self.trap_targets(leader);
        let radius = self.config.defender_radius;
        let mut obstacles = Vec::with_capacity(slots.len());
        for (slot, defender_idx) in self.assigned_slots.iter().enumerate() {
            let defender = &mut self.defenders[*defender_idx];
            defender.hold_slot(dt, slots[slot], facing(&slots[slot], leader));
            obstacles.push(Obstacle {
                center: defender.position,
                radius,
            });
        }
        obstacles
    }

    fn execute_pursuit(&mut self, dt: f64, leader: &Point) -> Vec<Obstacle> {
        let slots = u_slots(
            leader,
            &self.target,
            self.defenders.len(),
            &self.config.shape,
        );
        for (defender, slot) in self.defenders.iter_mut().zip(slots.iter()) {
            defender.hold_slot(dt, *slot, facing(slot, leader));
        }

        if self.recon_active {
            return vec![];
        }
        let radius = self.config.defender_radius;
        self.defenders
            .iter()
            .map(|d| Obstacle {
                center: d.position,
                radius,
            })
            .collect()
    }
}

impl Formation for InterceptFormation {
    fn update(&mut self, dt: f64, leader: &Vehicle) -> Vec<Obstacle> {
        self.timer += dt;

        let leader_pos = leader.position;
        let step = leader_pos - self.last_leader_pos;
        self.last_leader_pos = leader_pos;
        let displacement = step.norm();
        let heading = if displacement > MIN_HEADING_DISPLACEMENT {
            normalize_or_zero(&step)
        } else {
            Point::zeros()
        };

        let dist_to_target = (leader_pos - self.target).norm();
        if !self.trap_active && dist_to_target < self.config.success_distance {
            self.enter_trap(&leader_pos);
        } else if self.trap_active && dist_to_target > self.config.exit_distance {
            self.exit_trap();
        }

        if !self.trap_active {
            self.update_recon(displacement, heading);
        }

        if self.trap_active {
            self.execute_trap(dt, &leader_pos)
        } else {
            self.execute_pursuit(dt, &leader_pos)
        }
    }

    fn set_target(&mut self, target: Point) {
        self.target = target;
        self.triangulator.clear();
        self.recon_attempts = 0;
        self.timer = 0.0;
        self.trap_active = false;
        self.recon_active = false;
        self.assigned_slots.clear();
    }

    fn target(&self) -> Point {
        self.target
    }

    fn defenders(&self) -> &[Vehicle] {
        &self.defenders
    }

    fn is_success(&self) -> bool {
        self.trap_active
    }
}

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::ScenarioConfig;
use crate::formations::formation::{build_formation, Formation};
use crate::formations::no_formation::NoFormation;
use crate::local_planners::bendy_ruler::BendyRuler;
use crate::local_planners::local_planner::LocalPlanner;
use crate::util::registry::Registry;
use crate::vehicle::{Vehicle, VehicleLimits};
use crate::{ConfigError, Obstacle, ObstacleId, Point, SimulationError};

/// Radius of obstacles dropped with [`Simulation::toggle_obstacle_at`]
pub const TOGGLED_OBSTACLE_RADIUS: f64 = 2.0;

/// Result of [`Simulation::toggle_obstacle_at`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObstacleToggle {
    Added(ObstacleId),
    Removed(ObstacleId),
}

/// Frame driver for one leader and its formation.
///
/// Each step runs the formation first so that its defenders become dynamic
/// obstacles, then asks the leader's planner for a waypoint around the static
/// and dynamic obstacles together, then integrates the leader.
pub struct Simulation {
    leader: Vehicle,
    destination: Point,
    planner: Box<dyn LocalPlanner>,
    formation: Box<dyn Formation>,
    static_obstacles: Registry<Obstacle>,
    /// Simulation time
    sim_time: Duration,
    last_waypoint: Point,
}

impl Simulation {
    /// Create a new simulation with the leader parked at `leader_start`
    pub fn new(
        leader_start: Point,
        destination: Point,
        leader_limits: VehicleLimits,
        planner: Box<dyn LocalPlanner>,
        formation: Box<dyn Formation>,
    ) -> Self {
        Self {
            leader: Vehicle::new(leader_start, leader_limits),
            destination,
            planner,
            formation,
            static_obstacles: Registry::new(),
            sim_time: Duration::ZERO,
            last_waypoint: destination,
        }
    }

    /// Builds the leader, its bendy ruler planner, the configured formation
    /// and the static obstacles from a scenario.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let planner = BendyRuler::new(config.planner.clone())?;
        let formation = build_formation(&config.formation, config.leader_start)?;
        let mut simulation = Self::new(
            config.leader_start,
            config.destination,
            config.leader_limits,
            Box::new(planner),
            formation,
        );
        for obstacle in &config.obstacles {
            simulation.add_obstacle(*obstacle);
        }
        debug!(
            formation = %config.formation.kind,
            obstacles = config.obstacles.len(),
            "simulation ready"
        );
        Ok(simulation)
    }

    /// Same leader and planner, no defenders
    pub fn without_formation(
        leader_start: Point,
        destination: Point,
        leader_limits: VehicleLimits,
        planner: Box<dyn LocalPlanner>,
    ) -> Self {
        Self::new(
            leader_start,
            destination,
            leader_limits,
            planner,
            Box::new(NoFormation::new()),
        )
    }

    /// Advances the whole scene by `dur`.
    pub fn step(&mut self, dur: Duration) -> Result<(), SimulationError> {
        let dt = dur.as_secs_f64();
        if dt <= 0.0 {
            return Err(SimulationError::NonPositiveTimestep(dt));
        }

        let mut obstacles: Vec<Obstacle> = self.static_obstacles.values().copied().collect();
        obstacles.extend(self.formation.update(dt, &self.leader));

        let waypoint = if obstacles.is_empty() {
            self.destination
        } else {
            self.planner.get_waypoint(
                self.leader.position,
                self.destination,
                self.leader.velocity,
                &obstacles,
            )
        };
        self.last_waypoint = waypoint;

        self.leader.steer(dt, self.destination, waypoint, None);
        self.sim_time += dur;
        trace!(
            t = self.sim_time.as_secs_f64(),
            x = self.leader.position.x,
            y = self.leader.position.y,
            obstacles = obstacles.len(),
            "stepped"
        );
        Ok(())
    }

    pub fn leader(&self) -> &Vehicle {
        &self.leader
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    pub fn set_destination(&mut self, destination: Point) {
        self.destination = destination;
    }

    pub fn formation(&self) -> &dyn Formation {
        self.formation.as_ref()
    }

    /// Moves the interception point, resetting the formation's phase state
    pub fn set_formation_target(&mut self, target: Point) {
        self.formation.set_target(target);
    }

    /// Waypoint the leader steered toward on the last step
    pub fn last_waypoint(&self) -> Point {
        self.last_waypoint
    }

    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    pub fn is_success(&self) -> bool {
        self.formation.is_success()
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        self.static_obstacles.add_new_item(obstacle)
    }

    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Result<Obstacle, SimulationError> {
        self.static_obstacles
            .remove(id)
            .ok_or(SimulationError::UnknownObstacle(id))
    }

    /// Removes the first static obstacle containing `point`, or drops a new
    /// one of [`TOGGLED_OBSTACLE_RADIUS`] there.
    pub fn toggle_obstacle_at(&mut self, point: Point) -> ObstacleToggle {
        let hit = self
            .static_obstacles
            .iter()
            .find(|(_, obstacle)| obstacle.contains(point))
            .map(|(id, _)| id);
        match hit {
            Some(id) => {
                self.static_obstacles.remove(id);
                ObstacleToggle::Removed(id)
            }
            None => ObstacleToggle::Added(self.add_obstacle(Obstacle {
                center: point,
                radius: TOGGLED_OBSTACLE_RADIUS,
            })),
        }
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.static_obstacles.iter()
    }

    pub fn obstacle_count(&self) -> usize {
        self.static_obstacles.len()
    }
}

use tracing::{debug, trace};

use crate::config::PlannerConfig;
use crate::local_planners::local_planner::LocalPlanner;
use crate::util::geometry::{
    bearing_to, constrain, heading_of, offset_bearing, segment_margin, wrap_180,
};
use crate::ConfigError;
use crate::Obstacle;
use crate::Point;
use crate::Vec2f;

/// Widest offset from the direct bearing the sweep looks at, degrees
const MAX_SWEEP_DEG: f64 = 170.0;
/// Stage 2 probe offsets from the bearing toward the destination, in test order
const STEP2_OFFSETS_DEG: [f64; 3] = [0.0, 45.0, -45.0];
/// Destination moves beyond this distance reset the bearing memory
const DESTINATION_CHANGE_TOLERANCE: f64 = 0.1;

/// Bendy ruler obstacle avoidance.
///
/// Every tick the planner sweeps bearings around the direct bearing to the
/// destination, alternating sides with growing offset. A bearing is taken
/// once its stage 1 segment and one of three stage 2 continuations both keep
/// `margin_max` clear of every obstacle. If nothing passes both stages the
/// least bad bearing is followed for a shortened distance.
///
/// The planner remembers the last bearing it chose so the leader does not
/// flip between two similar gaps on consecutive ticks, and adapts its
/// lookahead between half and all of the configured lookahead.
pub struct BendyRuler {
    config: PlannerConfig,
    /// Configured lookahead, floored at 1.0
    lookahead: f64,
    current_lookahead: f64,
    bearing_prev: Option<f64>,
    destination_prev: Option<Point>,
    active: bool,
    last_waypoint: Option<Point>,
}

/// One sweep candidate that cleared stage 1
#[derive(Clone, Copy, Debug)]
struct Candidate {
    bearing: f64,
    margin: f64,
}

impl BendyRuler {
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lookahead = config.lookahead_base.max(1.0);
        Ok(BendyRuler {
            config,
            lookahead,
            current_lookahead: lookahead,
            bearing_prev: None,
            destination_prev: None,
            active: false,
            last_waypoint: None,
        })
    }

    /// Lookahead used for the next tick's stage 1 probe
    pub fn current_lookahead(&self) -> f64 {
        self.current_lookahead
    }

    /// Bearing the planner is holding on to, if any
    pub fn previous_bearing(&self) -> Option<f64> {
        self.bearing_prev
    }

    /// True when the last waypoint deviated from the straight path
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_waypoint(&self) -> Option<Point> {
        self.last_waypoint
    }

    /// Computes the waypoint for this tick.
    pub fn update(
        &mut self,
        position: Point,
        destination: Point,
        ground_velocity: Vec2f,
        obstacles: &[Obstacle],
    ) -> Point {
        let bearing_to_dest = bearing_to(&position, &destination);
        let distance_to_dest = (destination - position).norm();

        self.current_lookahead =
            constrain(self.current_lookahead, self.lookahead * 0.5, self.lookahead);

        let step1_dist = self
            .current_lookahead
            .min(distance_to_dest + self.config.past_dest_margin);
        let step2_dist = self.current_lookahead * self.config.step2_ratio;

        let ground_course =
            if ground_velocity.norm_squared() < self.config.low_speed_threshold_squared {
                bearing_to_dest
            } else {
                heading_of(&ground_velocity)
            };

        let waypoint = self.search_xy_path(
            position,
            destination,
            ground_course,
            step1_dist,
            step2_dist,
            bearing_to_dest,
            distance_to_dest,
            obstacles,
        );
        self.last_waypoint = Some(waypoint);
        waypoint
    }

    #[allow(clippy::too_many_arguments)]
    fn search_xy_path(
        &mut self,
        position: Point,
        destination: Point,
        ground_course: f64,
        step1_dist: f64,
        step2_dist: f64,
        bearing_to_dest: f64,
        distance_to_dest: f64,
        obstacles: &[Obstacle],
    ) -> Point {
        let increment = self.config.bearing_increment;
        let margin_max = self.config.margin_max;
        let iterations = (MAX_SWEEP_DEG / increment).floor() as usize;

        // Closest to the ground course among bearings clearing stage 1
        let mut feasible: Option<Candidate> = None;
        // Largest margin seen at all
        let mut widest = Candidate {
            bearing: bearing_to_dest,
            margin: f64::NEG_INFINITY,
        };

        for i in 0..=iterations {
            for side in [-1.0, 1.0] {
                if i == 0 && side > 0.0 {
                    continue;
                }
                let bearing_test = wrap_180(bearing_to_dest + side * i as f64 * increment);
                let test_loc = offset_bearing(&position, bearing_test, step1_dist);
                let margin = segment_margin(&position, &test_loc, obstacles);

                if margin > widest.margin {
                    widest = Candidate {
                        bearing: bearing_test,
                        margin,
                    };
                }

                if margin <= margin_max {
                    continue;
                }

                feasible = match feasible {
                    Some(best)
                        if wrap_180(ground_course - bearing_test).abs()
                            >= wrap_180(ground_course - best.bearing).abs() =>
                    {
                        Some(best)
                    }
                    _ => Some(Candidate {
                        bearing: bearing_test,
                        margin,
                    }),
                };

                let bearing_to_dest2 = bearing_to(&test_loc, &destination);
                let dist_test_to_dest = (destination - test_loc).norm();
                let distance2 =
                    constrain(step2_dist, self.config.step2_min, dist_test_to_dest);

                for (j, offset) in STEP2_OFFSETS_DEG.iter().enumerate() {
                    let bearing_test2 = wrap_180(bearing_to_dest2 + offset);
                    let test_loc2 = offset_bearing(&test_loc, bearing_test2, distance2);
                    let margin2 = segment_margin(&test_loc, &test_loc2, obstacles);
                    if margin2 <= margin_max {
                        continue;
                    }

                    let active = i != 0 || j != 0;
                    let (final_bearing, final_margin) = self.resist_bearing_change(
                        destination,
                        position,
                        active,
                        bearing_test,
                        step1_dist,
                        margin,
                        obstacles,
                    );
                    self.active = active;
                    self.current_lookahead = self.lookahead.min(self.current_lookahead * 1.1);
                    trace!(
                        bearing = final_bearing,
                        margin = final_margin,
                        sweep_index = i,
                        step2_index = j,
                        "path clear"
                    );
                    return offset_bearing(
                        &position,
                        final_bearing,
                        distance_to_dest.min(step1_dist),
                    );
                }
            }
        }

        // No two stage path is clear, go with the least bad option
        let (chosen, lookahead) = match feasible {
            Some(candidate) => (
                candidate,
                self.lookahead.min(self.current_lookahead * 1.05),
            ),
            None => (
                widest,
                (self.lookahead * 0.5).max(self.current_lookahead * 0.9),
            ),
        };
        self.current_lookahead = lookahead;
        self.active = true;
        let distance = (step1_dist + chosen.margin.min(0.0)).max(0.0);
        debug!(
            bearing = chosen.bearing,
            margin = chosen.margin,
            stage1_clear = feasible.is_some(),
            lookahead = self.current_lookahead,
            "no clear path, falling back"
        );
        offset_bearing(&position, chosen.bearing, distance)
    }

    /// Keeps the previous bearing when switching to `bearing_test` would
    /// swing the heading by more than `bendy_angle` without buying at least
    /// `bendy_ratio` times the clearance. Returns the bearing to fly and its
    /// margin.
    #[allow(clippy::too_many_arguments)]
    fn resist_bearing_change(
        &mut self,
        destination: Point,
        position: Point,
        active: bool,
        bearing_test: f64,
        step1_dist: f64,
        margin: f64,
        obstacles: &[Obstacle],
    ) -> (f64, f64) {
        let dest_change = match self.destination_prev {
            Some(prev) => (destination - prev).norm() > DESTINATION_CHANGE_TOLERANCE,
            None => true,
        };
        if dest_change {
            self.destination_prev = Some(destination);
            self.bearing_prev = None;
        }

        if active && !dest_change && self.config.bendy_ratio > 0.0 {
            if let Some(bearing_prev) = self.bearing_prev {
                if wrap_180(bearing_prev - bearing_test).abs() > self.config.bendy_angle {
                    let test_loc_prev = offset_bearing(&position, bearing_prev, step1_dist);
                    let prev_margin = segment_margin(&position, &test_loc_prev, obstacles);
                    if margin < self.config.bendy_ratio * prev_margin {
                        debug!(
                            bearing_prev,
                            bearing_test,
                            margin,
                            prev_margin,
                            "resisting bearing change"
                        );
                        return (bearing_prev, prev_margin);
                    }
                }
            }
        }

        self.bearing_prev = Some(bearing_test);
        (bearing_test, margin)
    }
}

impl LocalPlanner for BendyRuler {
    fn get_waypoint(
        &mut self,
        position: Point,
        destination: Point,
        ground_velocity: Vec2f,
        obstacles: &[Obstacle],
    ) -> Point {
        self.update(position, destination, ground_velocity, obstacles)
    }
}

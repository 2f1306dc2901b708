//! Scenario configuration.
//!
//! Every section has a `Default` carrying the stock tuning and can be read
//! from YAML with `from_yaml`. Missing keys keep their default, keys holding
//! the wrong type or an out-of-range value are rejected up front so nothing
//! fails inside the per-tick path.
//!
//! ```yaml
//! planner:
//!   lookahead: 15.0
//!   margin_max: 2.0
//! leader:
//!   start: [10, 20]
//!   destination: [60, 20]
//! formation:
//!   kind: intercept
//!   target: [40, 5]
//! obstacles:
//!   - [35, 20, 3.0]
//! ```
use std::str::FromStr;

use yaml_rust::{Yaml, YamlLoader};

use crate::formations::formation::FormationKind;
use crate::vehicle::VehicleLimits;
use crate::{ConfigError, Obstacle, Point};

/// Tuning of the bendy ruler avoidance planner.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Nominal lookahead distance. Anything below 1.0, zero and negative
    /// values included, is floored to 1.0 when the planner is built.
    pub lookahead_base: f64,
    /// Margin ratio a new bearing must beat before the previous one is
    /// abandoned. Zero disables bearing resistance.
    pub bendy_ratio: f64,
    /// Minimum bearing change (degrees) that triggers resistance.
    pub bendy_angle: f64,
    /// Angular step (degrees) of the bearing sweep.
    pub bearing_increment: f64,
    /// Stage 2 probe length as a fraction of the current lookahead.
    pub step2_ratio: f64,
    /// Shortest stage 2 probe.
    pub step2_min: f64,
    /// How far past the destination stage 1 may probe.
    pub past_dest_margin: f64,
    /// Below this squared ground speed the course is taken to be the
    /// bearing to the destination.
    pub low_speed_threshold_squared: f64,
    /// Clearance a path segment needs to count as free.
    pub margin_max: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            lookahead_base: 15.0,
            bendy_ratio: 1.5,
            bendy_angle: 75.0,
            bearing_increment: 5.0,
            step2_ratio: 1.0,
            step2_min: 2.0,
            past_dest_margin: 2.0,
            low_speed_threshold_squared: 0.2 * 0.2,
            margin_max: 2.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            "lookahead",
            self.lookahead_base.is_finite(),
            self.lookahead_base,
            "must be finite",
        )?;
        require("bendy_ratio", self.bendy_ratio >= 0.0, self.bendy_ratio, "must be >= 0")?;
        require(
            "bendy_angle",
            (0.0..=180.0).contains(&self.bendy_angle),
            self.bendy_angle,
            "must lie in [0, 180]",
        )?;
        require(
            "bearing_increment",
            self.bearing_increment > 0.0 && self.bearing_increment <= 170.0,
            self.bearing_increment,
            "must lie in (0, 170]",
        )?;
        require("step2_ratio", self.step2_ratio > 0.0, self.step2_ratio, "must be > 0")?;
        require("step2_min", self.step2_min >= 0.0, self.step2_min, "must be >= 0")?;
        require(
            "past_dest_margin",
            self.past_dest_margin >= 0.0,
            self.past_dest_margin,
            "must be >= 0",
        )?;
        require(
            "low_speed_threshold_squared",
            self.low_speed_threshold_squared >= 0.0,
            self.low_speed_threshold_squared,
            "must be >= 0",
        )?;
        require(
            "margin_max",
            self.margin_max.is_finite(),
            self.margin_max,
            "must be finite",
        )
    }

    pub fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        let config = Self {
            lookahead_base: read_f64(node, "lookahead", d.lookahead_base)?,
            bendy_ratio: read_f64(node, "bendy_ratio", d.bendy_ratio)?,
            bendy_angle: read_f64(node, "bendy_angle", d.bendy_angle)?,
            bearing_increment: read_f64(node, "bearing_increment", d.bearing_increment)?,
            step2_ratio: read_f64(node, "step2_ratio", d.step2_ratio)?,
            step2_min: read_f64(node, "step2_min", d.step2_min)?,
            past_dest_margin: read_f64(node, "past_dest_margin", d.past_dest_margin)?,
            low_speed_threshold_squared: read_f64(
                node,
                "low_speed_threshold_squared",
                d.low_speed_threshold_squared,
            )?,
            margin_max: read_f64(node, "margin_max", d.margin_max)?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Geometry of the parabolic U the defenders hold behind the leader.
#[derive(Clone, Debug, PartialEq)]
pub struct PursuitShape {
    /// Distance of the U pivot behind the leader
    pub rear_offset: f64,
    /// Lateral spacing between neighbouring slots
    pub lateral_spacing: f64,
    /// Forward depth per squared lateral index
    pub depth_factor: f64,
}

impl Default for PursuitShape {
    fn default() -> Self {
        Self {
            rear_offset: 4.0,
            lateral_spacing: 2.5,
            depth_factor: 2.0,
        }
    }
}

impl PursuitShape {
    fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            rear_offset: read_f64(node, "rear_offset", d.rear_offset)?,
            lateral_spacing: read_f64(node, "lateral_spacing", d.lateral_spacing)?,
            depth_factor: read_f64(node, "depth_factor", d.depth_factor)?,
        })
    }
}

/// Static C arc held on the far side of the leader.
#[derive(Clone, Debug, PartialEq)]
pub struct CArcConfig {
    pub defender_count: usize,
    pub defender_radius: f64,
    pub formation_radius: f64,
    /// Angle between neighbouring defenders, degrees
    pub slot_spacing_deg: f64,
    /// Upper bound on the full arc width, degrees
    pub max_arc_deg: f64,
    pub success_distance: f64,
    pub limits: VehicleLimits,
}

impl Default for CArcConfig {
    fn default() -> Self {
        Self {
            defender_count: 4,
            defender_radius: 0.5,
            formation_radius: 5.0,
            slot_spacing_deg: 45.0,
            max_arc_deg: 300.0,
            success_distance: 2.0,
            limits: VehicleLimits::new(12.0, 40.0, 360.0),
        }
    }
}

impl CArcConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_count(self.defender_count)?;
        validate_radius(self.defender_radius)?;
        require_positive("formation_radius", self.formation_radius)?;
        require_positive("success_distance", self.success_distance)?;
        require(
            "max_arc_deg",
            self.max_arc_deg >= 0.0 && self.max_arc_deg <= 360.0,
            self.max_arc_deg,
            "must lie in [0, 360]",
        )?;
        self.limits.validate()
    }

    fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            defender_count: read_usize(node, "defenders", d.defender_count)?,
            defender_radius: read_f64(node, "defender_radius", d.defender_radius)?,
            formation_radius: read_f64(node, "formation_radius", d.formation_radius)?,
            slot_spacing_deg: read_f64(node, "slot_spacing_deg", d.slot_spacing_deg)?,
            max_arc_deg: read_f64(node, "max_arc_deg", d.max_arc_deg)?,
            success_distance: read_f64(node, "success_distance", d.success_distance)?,
            limits: read_limits(node, &d.limits)?,
        })
    }
}

/// Continuous U pursuit with slot swapping near the target.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleSwapConfig {
    pub defender_count: usize,
    pub defender_radius: f64,
    pub shape: PursuitShape,
    pub success_distance: f64,
    /// Leader-to-target distance under which slots get re-solved
    pub proximity_threshold: f64,
    /// Seconds between two re-solves
    pub reassign_cooldown: f64,
    pub limits: VehicleLimits,
}

impl Default for RoleSwapConfig {
    fn default() -> Self {
        Self {
            defender_count: 4,
            defender_radius: 0.5,
            shape: PursuitShape::default(),
            success_distance: 2.0,
            proximity_threshold: 4.0,
            reassign_cooldown: 0.1,
            limits: VehicleLimits::new(15.0, 60.0, 720.0),
        }
    }
}

impl RoleSwapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_count(self.defender_count)?;
        validate_radius(self.defender_radius)?;
        require_positive("success_distance", self.success_distance)?;
        require(
            "proximity_threshold",
            self.proximity_threshold >= 0.0,
            self.proximity_threshold,
            "must be >= 0",
        )?;
        require(
            "reassign_cooldown",
            self.reassign_cooldown >= 0.0,
            self.reassign_cooldown,
            "must be >= 0",
        )?;
        self.limits.validate()
    }

    fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            defender_count: read_usize(node, "defenders", d.defender_count)?,
            defender_radius: read_f64(node, "defender_radius", d.defender_radius)?,
            shape: PursuitShape::from_yaml(&node["shape"])?,
            success_distance: read_f64(node, "success_distance", d.success_distance)?,
            proximity_threshold: read_f64(node, "proximity_threshold", d.proximity_threshold)?,
            reassign_cooldown: read_f64(node, "reassign_cooldown", d.reassign_cooldown)?,
            limits: read_limits(node, &d.limits)?,
        })
    }
}

/// Three phase pursuit / recon / trap coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct InterceptConfig {
    pub defender_radius: f64,
    pub shape: PursuitShape,
    /// Entering trap below this leader-to-target distance
    pub success_distance: f64,
    /// Leaving trap above this leader-to-target distance
    pub exit_distance: f64,
    pub trap_radius: f64,
    /// One trap slot per defender, degrees around the leader
    pub trap_slot_angles_deg: Vec<f64>,
    /// Peak arc shift of the oscillating trap slots, degrees
    pub trap_arc_amplitude_deg: f64,
    /// Angular rate of the trap oscillation, rad/s
    pub trap_arc_rate: f64,
    /// Chase time before the first recon window
    pub chase_initial: f64,
    /// Chase time before every later recon window
    pub chase_duration: f64,
    pub recon_window: f64,
    pub max_recon_attempts: u32,
    /// Per-tick leader displacement needed to record an observation ray
    pub min_observation_speed: f64,
    /// Ray intersections further than this along the earlier ray are dropped
    pub max_ray_distance: f64,
    /// Ray pairs with a smaller direction determinant count as parallel
    pub parallel_tolerance: f64,
    pub limits: VehicleLimits,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            defender_radius: 0.5,
            shape: PursuitShape::default(),
            success_distance: 2.0,
            exit_distance: 5.0,
            trap_radius: 3.4,
            trap_slot_angles_deg: vec![90.0, 0.0, -90.0, 180.0],
            trap_arc_amplitude_deg: 30.0,
            trap_arc_rate: 2.8,
            chase_initial: 2.0,
            chase_duration: 6.0,
            recon_window: 1.5,
            max_recon_attempts: 2,
            min_observation_speed: 0.02,
            max_ray_distance: 500.0,
            parallel_tolerance: 0.001,
            limits: VehicleLimits::new(15.0, 60.0, 720.0),
        }
    }
}

impl InterceptConfig {
    pub fn defender_count(&self) -> usize {
        self.trap_slot_angles_deg.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_count(self.defender_count())?;
        validate_radius(self.defender_radius)?;
        require_positive("success_distance", self.success_distance)?;
        require(
            "exit_distance",
            self.exit_distance > self.success_distance,
            self.exit_distance,
            "must exceed success_distance",
        )?;
        require_positive("trap_radius", self.trap_radius)?;
        require_positive("chase_initial", self.chase_initial)?;
        require_positive("chase_duration", self.chase_duration)?;
        require_positive("recon_window", self.recon_window)?;
        require_positive("max_ray_distance", self.max_ray_distance)?;
        require(
            "parallel_tolerance",
            self.parallel_tolerance >= 0.0,
            self.parallel_tolerance,
            "must be >= 0",
        )?;
        self.limits.validate()
    }

    fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        let trap_slot_angles_deg = match &node["trap_slot_angles_deg"] {
            Yaml::BadValue => d.trap_slot_angles_deg.clone(),
            Yaml::Array(items) => items
                .iter()
                .map(|item| {
                    as_number(item).ok_or(ConfigError::WrongType {
                        key: "trap_slot_angles_deg",
                        expected: "a list of numbers",
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?,
            _ => {
                return Err(ConfigError::WrongType {
                    key: "trap_slot_angles_deg",
                    expected: "a list of numbers",
                })
            }
        };
        Ok(Self {
            defender_radius: read_f64(node, "defender_radius", d.defender_radius)?,
            shape: PursuitShape::from_yaml(&node["shape"])?,
            success_distance: read_f64(node, "success_distance", d.success_distance)?,
            exit_distance: read_f64(node, "exit_distance", d.exit_distance)?,
            trap_radius: read_f64(node, "trap_radius", d.trap_radius)?,
            trap_slot_angles_deg,
            trap_arc_amplitude_deg: read_f64(
                node,
                "trap_arc_amplitude_deg",
                d.trap_arc_amplitude_deg,
            )?,
            trap_arc_rate: read_f64(node, "trap_arc_rate", d.trap_arc_rate)?,
            chase_initial: read_f64(node, "chase_initial", d.chase_initial)?,
            chase_duration: read_f64(node, "chase_duration", d.chase_duration)?,
            recon_window: read_f64(node, "recon_window", d.recon_window)?,
            max_recon_attempts: read_u32(node, "max_recon_attempts", d.max_recon_attempts)?,
            min_observation_speed: read_f64(
                node,
                "min_observation_speed",
                d.min_observation_speed,
            )?,
            max_ray_distance: read_f64(node, "max_ray_distance", d.max_ray_distance)?,
            parallel_tolerance: read_f64(node, "parallel_tolerance", d.parallel_tolerance)?,
            limits: read_limits(node, &d.limits)?,
        })
    }
}

/// Which coordinator drives the defenders and where it pushes the leader.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationConfig {
    pub kind: FormationKind,
    /// Interception point
    pub target: Point,
    pub c_arc: CArcConfig,
    pub role_swap: RoleSwapConfig,
    pub intercept: InterceptConfig,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            kind: FormationKind::None,
            target: Point::new(40.0, 5.0),
            c_arc: CArcConfig::default(),
            role_swap: RoleSwapConfig::default(),
            intercept: InterceptConfig::default(),
        }
    }
}

impl FormationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            FormationKind::None => Ok(()),
            FormationKind::CArc => self.c_arc.validate(),
            FormationKind::RoleSwap => self.role_swap.validate(),
            FormationKind::Intercept => self.intercept.validate(),
        }
    }

    pub fn from_yaml(node: &Yaml) -> Result<Self, ConfigError> {
        let d = Self::default();
        let kind = match &node["kind"] {
            Yaml::BadValue => d.kind,
            Yaml::String(name) => FormationKind::from_str(name)?,
            _ => {
                return Err(ConfigError::WrongType {
                    key: "kind",
                    expected: "a formation name",
                })
            }
        };
        let config = Self {
            kind,
            target: read_point(node, "target", d.target)?,
            c_arc: CArcConfig::from_yaml(&node["c_arc"])?,
            role_swap: RoleSwapConfig::from_yaml(&node["role_swap"])?,
            intercept: InterceptConfig::from_yaml(&node["intercept"])?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// A complete run: leader, planner tuning, formation and static obstacles.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    pub leader_start: Point,
    pub destination: Point,
    pub leader_limits: VehicleLimits,
    pub planner: PlannerConfig,
    pub formation: FormationConfig,
    pub obstacles: Vec<Obstacle>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            leader_start: Point::new(10.0, 20.0),
            destination: Point::new(60.0, 20.0),
            leader_limits: VehicleLimits::default(),
            planner: PlannerConfig::default(),
            formation: FormationConfig::default(),
            obstacles: vec![],
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.leader_limits.validate()?;
        self.planner.validate()?;
        self.formation.validate()
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self, ConfigError> {
        let docs =
            YamlLoader::load_from_str(yaml_str).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        let empty = Yaml::Null;
        let doc = docs.first().unwrap_or(&empty);
        let d = Self::default();
        let leader = &doc["leader"];

        let mut obstacles = vec![];
        match &doc["obstacles"] {
            Yaml::BadValue | Yaml::Null => {}
            Yaml::Array(items) => {
                for item in items {
                    obstacles.push(read_obstacle(item)?);
                }
            }
            _ => {
                return Err(ConfigError::WrongType {
                    key: "obstacles",
                    expected: "a list of [x, y, radius]",
                })
            }
        }

        let config = Self {
            leader_start: read_point(leader, "start", d.leader_start)?,
            destination: read_point(leader, "destination", d.destination)?,
            leader_limits: read_limits(leader, &d.leader_limits)?,
            planner: PlannerConfig::from_yaml(&doc["planner"])?,
            formation: FormationConfig::from_yaml(&doc["formation"])?,
            obstacles,
        };
        config.validate()?;
        Ok(config)
    }
}

fn require(key: &'static str, ok: bool, value: f64, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("{reason}, got {value}"),
        })
    }
}

fn require_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    require(key, value.is_finite() && value > 0.0, value, "must be > 0")
}

fn validate_count(count: usize) -> Result<(), ConfigError> {
    require("defenders", count >= 1, count as f64, "need at least one defender")
}

fn validate_radius(radius: f64) -> Result<(), ConfigError> {
    require(
        "defender_radius",
        radius.is_finite() && radius >= 0.0,
        radius,
        "must be >= 0",
    )
}

fn as_number(node: &Yaml) -> Option<f64> {
    match node {
        Yaml::Real(_) => node.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn read_f64(node: &Yaml, key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match &node[key] {
        Yaml::BadValue => Ok(default),
        value => as_number(value).ok_or(ConfigError::WrongType {
            key,
            expected: "a number",
        }),
    }
}

fn read_usize(node: &Yaml, key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match &node[key] {
        Yaml::BadValue => Ok(default),
        Yaml::Integer(i) if *i >= 0 => Ok(*i as usize),
        _ => Err(ConfigError::WrongType {
            key,
            expected: "a non-negative integer",
        }),
    }
}

fn read_point(node: &Yaml, key: &'static str, default: Point) -> Result<Point, ConfigError> {
    let wrong = ConfigError::WrongType {
        key,
        expected: "a pair [x, y]",
    };
    match &node[key] {
        Yaml::BadValue => Ok(default),
        Yaml::Array(items) if items.len() == 2 => {
            match (as_number(&items[0]), as_number(&items[1])) {
                (Some(x), Some(y)) => Ok(Point::new(x, y)),
                _ => Err(wrong),
            }
        }
        _ => Err(wrong),
    }
}

fn read_obstacle(node: &Yaml) -> Result<Obstacle, ConfigError> {
    let wrong = ConfigError::WrongType {
        key: "obstacles",
        expected: "a list of [x, y, radius]",
    };
    let items = node.as_vec().ok_or(wrong.clone())?;
    let values: Option<Vec<f64>> = items.iter().map(as_number).collect();
    match values.as_deref() {
        Some([x, y, radius]) => Obstacle::new(Point::new(*x, *y), *radius),
        _ => Err(wrong),
    }
}

fn read_u32(node: &Yaml, key: &'static str, default: u32) -> Result<u32, ConfigError> {
    let value = read_usize(node, key, default as usize)?;
    u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
        key,
        reason: format!("must fit in 32 bits, got {value}"),
    })
}

fn read_limits(node: &Yaml, default: &VehicleLimits) -> Result<VehicleLimits, ConfigError> {
    let limits = VehicleLimits::new(
        read_f64(node, "max_speed", default.max_speed)?,
        read_f64(node, "acceleration", default.acceleration)?,
        read_f64(node, "turn_rate", default.turn_rate)?,
    );
    limits.validate()?;
    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ScenarioConfig::from_yaml("").unwrap();
        assert_eq!(config, ScenarioConfig::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = "
planner:
  lookahead: 20
  margin_max: 1.5
  bendy_ratio: 0
leader:
  start: [0, 0]
  destination: [100, 0.5]
  max_speed: 6
formation:
  kind: intercept
  target: [40, 5]
  intercept:
    exit_distance: 6.5
    shape:
      rear_offset: 3
obstacles:
  - [35, 20, 3.0]
  - [50, 0, 1]
";
        let config = ScenarioConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.planner.lookahead_base, 20.0);
        assert_eq!(config.planner.margin_max, 1.5);
        assert_eq!(config.planner.bendy_ratio, 0.0);
        assert_eq!(config.planner.bendy_angle, 75.0);
        assert_eq!(config.leader_start, Point::new(0.0, 0.0));
        assert_eq!(config.destination, Point::new(100.0, 0.5));
        assert_eq!(config.leader_limits.max_speed, 6.0);
        assert_eq!(config.leader_limits.turn_rate, 180.0);
        assert_eq!(config.formation.kind, FormationKind::Intercept);
        assert_eq!(config.formation.intercept.exit_distance, 6.5);
        assert_eq!(config.formation.intercept.shape.rear_offset, 3.0);
        assert_eq!(config.formation.intercept.shape.lateral_spacing, 2.5);
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!(config.obstacles[1].radius, 1.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ScenarioConfig::from_yaml("planner:\n  lookahead: .inf\n"),
            Err(ConfigError::InvalidValue { key: "lookahead", .. })
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml("formation:\n  kind: intercept\n  intercept:\n    max_recon_attempts: 5000000000\n"),
            Err(ConfigError::InvalidValue { key: "max_recon_attempts", .. })
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml("planner:\n  margin_max: wide\n"),
            Err(ConfigError::WrongType { key: "margin_max", .. })
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml("obstacles:\n  - [1, 2, -3]\n"),
            Err(ConfigError::InvalidValue { key: "obstacle.radius", .. })
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml("formation:\n  kind: wedge\n"),
            Err(ConfigError::UnknownFormation(_))
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml(
                "formation:\n  kind: intercept\n  intercept:\n    exit_distance: 1\n"
            ),
            Err(ConfigError::InvalidValue { key: "exit_distance", .. })
        ));
        assert!(matches!(
            ScenarioConfig::from_yaml("planner: [\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_small_lookahead_is_left_for_the_floor() {
        let config = ScenarioConfig::from_yaml("planner:\n  lookahead: -1\n").unwrap();
        assert_eq!(config.planner.lookahead_base, -1.0);
        let config = ScenarioConfig::from_yaml("planner:\n  lookahead: 0\n").unwrap();
        assert_eq!(config.planner.lookahead_base, 0.0);
    }

    #[test]
    fn test_inactive_formation_sections_are_not_validated() {
        // the c arc section is only checked when that formation is selected
        let yaml = "formation:\n  kind: none\n  c_arc:\n    defenders: 0\n";
        assert!(ScenarioConfig::from_yaml(yaml).is_ok());
    }
}

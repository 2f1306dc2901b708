use std::fmt;
use std::str::FromStr;

use crate::config::FormationConfig;
use crate::formations::c_arc::CArcFormation;
use crate::formations::intercept::InterceptFormation;
use crate::formations::no_formation::NoFormation;
use crate::formations::role_swap::RoleSwapFormation;
use crate::vehicle::Vehicle;
use crate::ConfigError;
use crate::Obstacle;
use crate::Point;

/// A coordinator steering a team of defenders around the leader.
///
/// Called once per tick before the leader's planner; the returned discs are
/// handed to the planner as dynamic obstacles. An empty list is valid.
pub trait Formation {
    /// Advances the defenders by `dt` seconds and reports them as obstacles.
    fn update(&mut self, dt: f64, leader: &Vehicle) -> Vec<Obstacle>;

    /// Sets the interception point and drops any transient phase state.
    fn set_target(&mut self, target: Point);

    /// The interception point
    fn target(&self) -> Point;

    fn defenders(&self) -> &[Vehicle];

    /// True when the formation considers the leader captured
    fn is_success(&self) -> bool;
}

/// Selects a formation by name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationKind {
    None,
    CArc,
    RoleSwap,
    Intercept,
}

impl FromStr for FormationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(FormationKind::None),
            "c_arc" => Ok(FormationKind::CArc),
            "role_swap" => Ok(FormationKind::RoleSwap),
            "intercept" => Ok(FormationKind::Intercept),
            _ => Err(ConfigError::UnknownFormation(s.to_owned())),
        }
    }
}

impl fmt::Display for FormationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormationKind::None => "none",
            FormationKind::CArc => "c_arc",
            FormationKind::RoleSwap => "role_swap",
            FormationKind::Intercept => "intercept",
        };
        f.write_str(name)
    }
}

/// Builds the configured formation with every defender spawned on
/// `leader_start`.
pub fn build_formation(
    config: &FormationConfig,
    leader_start: Point,
) -> Result<Box<dyn Formation>, ConfigError> {
    let mut formation: Box<dyn Formation> = match config.kind {
        FormationKind::None => Box::new(NoFormation::new()),
        FormationKind::CArc => Box::new(CArcFormation::new(config.c_arc.clone(), leader_start)?),
        FormationKind::RoleSwap => Box::new(RoleSwapFormation::new(
            config.role_swap.clone(),
            leader_start,
        )?),
        FormationKind::Intercept => Box::new(InterceptFormation::new(
            config.intercept.clone(),
            leader_start,
        )?),
    };
    formation.set_target(config.target);
    Ok(formation)
}

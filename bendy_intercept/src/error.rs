use thiserror::Error;

/// Errors raised while building planners, formations and scenarios.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// YAML could not be parsed at all.
    #[error("yaml parse error: {0}")]
    Yaml(String),
    /// A key was present but held the wrong YAML type.
    #[error("{key}: expected {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    /// A value was out of its allowed range.
    #[error("{key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    /// Unrecognised formation name.
    #[error("unknown formation `{0}` (expected none, c_arc, role_swap or intercept)")]
    UnknownFormation(String),
}

/// Errors raised by the frame driver.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Ticks must advance time.
    #[error("timestep must be positive, got {0}s")]
    NonPositiveTimestep(f64),
    /// Static obstacle id was never allocated or already removed.
    #[error("no static obstacle with id {0}")]
    UnknownObstacle(usize),
}

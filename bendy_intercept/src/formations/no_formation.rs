use super::formation::Formation;
use crate::{Obstacle, Point, Vehicle};

/// No defenders: the leader only sees static obstacles.
pub struct NoFormation {
    target: Point,
}

impl NoFormation {
    pub fn new() -> Self {
        NoFormation {
            target: Point::zeros(),
        }
    }
}

impl Default for NoFormation {
    fn default() -> Self {
        Self::new()
    }
}

impl Formation for NoFormation {
    fn update(&mut self, _: f64, _: &Vehicle) -> Vec<Obstacle> {
        vec![]
    }

    fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    fn target(&self) -> Point {
        self.target
    }

    fn defenders(&self) -> &[Vehicle] {
        &[]
    }

    fn is_success(&self) -> bool {
        false
    }
}

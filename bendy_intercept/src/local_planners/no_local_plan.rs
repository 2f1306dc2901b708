use crate::local_planners::local_planner::LocalPlanner;
use crate::Obstacle;
use crate::Point;
use crate::Vec2f;

/// Heads straight for the destination, ignoring obstacles.
pub struct NoLocalPlan {}

impl LocalPlanner for NoLocalPlan {
    fn get_waypoint(
        &mut self,
        _position: Point,
        destination: Point,
        _ground_velocity: Vec2f,
        _obstacles: &[Obstacle],
    ) -> Point {
        destination
    }
}

use crate::Obstacle;
use crate::Point;
use crate::Vec2f;

/// A planner that turns a far destination into the next waypoint, one
/// control tick at a time. Each instance carries its own memory, so every
/// controlled agent gets its own planner.
pub trait LocalPlanner {
    fn get_waypoint(
        &mut self,
        position: Point,
        destination: Point,
        ground_velocity: Vec2f,
        obstacles: &[Obstacle],
    ) -> Point;
}

use crate::util::geometry::{bearing_to, constrain, wrap_180};
use crate::{ConfigError, Point, Vec2f};

/// Distance from the final target inside which the speed ramps down
const ARRIVE_RADIUS: f64 = 2.0;
/// Distance from the final target treated as arrived
const STOP_RADIUS: f64 = 0.1;

/// Kinematic limits of a point vehicle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleLimits {
    /// Top speed, units/s
    pub max_speed: f64,
    /// Largest velocity change, units/s^2
    pub acceleration: f64,
    /// Largest yaw change, degrees/s
    pub turn_rate: f64,
}

impl VehicleLimits {
    pub fn new(max_speed: f64, acceleration: f64, turn_rate: f64) -> Self {
        Self {
            max_speed,
            acceleration,
            turn_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("turn_rate", self.turn_rate),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("must be > 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for VehicleLimits {
    fn default() -> Self {
        Self::new(5.0, 8.0, 180.0)
    }
}

/// Point vehicle integrated with acceleration and turn rate limited
/// "arrive" steering. Leaders translate along their yaw; vehicles given a
/// forced yaw (defenders) slide straight to their target while facing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    /// Position of the vehicle
    pub position: Point,
    /// Velocity of the vehicle
    pub velocity: Vec2f,
    /// Heading, degrees in (-180, 180]
    pub yaw: f64,
    pub limits: VehicleLimits,
}

impl Vehicle {
    pub fn new(position: Point, limits: VehicleLimits) -> Self {
        Self {
            position,
            velocity: Vec2f::zeros(),
            yaw: 0.0,
            limits,
        }
    }

    /// Advances the vehicle by `dt` seconds.
    ///
    /// * `target` - final goal, drives the speed ramp
    /// * `waypoint` - intermediate point the vehicle turns toward
    /// * `forced_yaw` - heading to hold instead of turning toward `waypoint`
    pub fn steer(&mut self, dt: f64, target: Point, waypoint: Point, forced_yaw: Option<f64>) {
        let desired_yaw = match forced_yaw {
            Some(yaw) => yaw,
            None if (waypoint - self.position).norm() > STOP_RADIUS => {
                bearing_to(&self.position, &waypoint)
            }
            None => self.yaw,
        };
        let max_turn = self.limits.turn_rate * dt;
        let delta = constrain(wrap_180(desired_yaw - self.yaw), -max_turn, max_turn);
        self.yaw = wrap_180(self.yaw + delta);

        let to_target = target - self.position;
        let final_dist = to_target.norm();
        let desired_speed = if final_dist < STOP_RADIUS {
            0.0
        } else if final_dist < ARRIVE_RADIUS {
            self.limits.max_speed * final_dist / ARRIVE_RADIUS
        } else {
            self.limits.max_speed
        };

        let direction = if forced_yaw.is_some() {
            let rad = to_target.y.atan2(to_target.x);
            Vec2f::new(rad.cos(), rad.sin())
        } else {
            let rad = self.yaw.to_radians();
            Vec2f::new(rad.cos(), rad.sin())
        };
        let dv = direction * desired_speed - self.velocity;
        let dv_len = dv.norm();
        if dv_len > 0.0 {
            let scale = dv_len.min(self.limits.acceleration * dt) / dv_len;
            self.velocity += dv * scale;
        }

        self.position += self.velocity * dt;
    }

    /// Moves straight to `target` while holding `yaw`; the way formations
    /// drive defenders.
    pub fn hold_slot(&mut self, dt: f64, target: Point, yaw: f64) {
        self.steer(dt, target, target, Some(yaw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_rate_limits_yaw() {
        let mut vehicle = Vehicle::new(Point::new(0.0, 0.0), VehicleLimits::default());
        let target = Point::new(0.0, 100.0);
        vehicle.steer(0.1, target, target, None);
        // 180 deg/s for 0.1 s
        assert!((vehicle.yaw - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_acceleration_limits_speed() {
        let mut vehicle = Vehicle::new(Point::new(0.0, 0.0), VehicleLimits::default());
        let target = Point::new(100.0, 0.0);
        vehicle.steer(0.5, target, target, None);
        assert!((vehicle.velocity.norm() - 4.0).abs() < 1e-9);
        for _ in 0..10 {
            vehicle.steer(0.5, target, target, None);
        }
        assert!((vehicle.velocity.norm() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_forced_yaw_slides_to_target() {
        let mut vehicle = Vehicle::new(Point::new(0.0, 0.0), VehicleLimits::new(15.0, 60.0, 720.0));
        let slot = Point::new(3.0, 4.0);
        for _ in 0..600 {
            vehicle.hold_slot(1.0 / 60.0, slot, -90.0);
        }
        assert!((vehicle.position - slot).norm() < 0.2);
        assert!((vehicle.yaw + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrive_stops_at_target() {
        let mut vehicle = Vehicle::new(Point::new(0.0, 0.0), VehicleLimits::default());
        let target = Point::new(10.0, 0.0);
        for _ in 0..1200 {
            vehicle.steer(1.0 / 60.0, target, target, None);
        }
        assert!((vehicle.position - target).norm() < 0.2);
        assert!(vehicle.velocity.norm() < 0.5);
    }
}

//! Generic planar rigid body and the pivot conversions that tie a swinging
//! body's linear velocity to its angular one.
//!
//! Angular velocities here are in revolutions per second, clockwise-positive,
//! matching the heading convention of [`Pose2D`]. Turning one into a heading
//! change therefore costs a factor of `TAU`.

use std::f64::consts::TAU;

use crate::pose::Pose2D;
use crate::vector::Vector2;

/// Gravitational acceleration in inches per second squared.
pub const GRAVITY: f64 = -386.08858267717;

/// Squared distance below which a point counts as sitting on the pivot.
/// Tuned for inch-scale geometry.
pub const PIVOT_DEGENERACY_SQR: f64 = 1e-10;

/// Anything that advances through time as a rigid body.
pub trait PhysicsEntity {
    fn body(&self) -> &RigidBody;

    fn body_mut(&mut self) -> &mut RigidBody;

    /// Advances the entity by `dt` seconds. `elapsed` is bookkeeping only.
    fn update(&mut self, elapsed: f64, dt: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub position: Pose2D,
    pub velocity: Pose2D,
}

impl RigidBody {
    pub fn new(position: Pose2D) -> RigidBody {
        RigidBody {
            position,
            velocity: Pose2D::ZERO,
        }
    }

    pub fn with_velocity(position: Pose2D, velocity: Pose2D) -> RigidBody {
        RigidBody { position, velocity }
    }

    /// Integrates a constant acceleration over `dt`.
    ///
    /// Positions move by `½·a·dt² + v·dt` using the velocity from before the
    /// step; the velocity is updated afterwards.
    pub fn accel(&mut self, a: Pose2D, dt: f64) {
        let dx = delta_dist_accel(a.x(), dt, self.velocity.x());
        let dy = delta_dist_accel(a.y(), dt, self.velocity.y());
        let dth = delta_dist_accel(a.theta, dt, self.velocity.theta);

        self.position = Pose2D::new(
            self.position.x() + dx,
            self.position.y() + dy,
            self.position.theta + dth,
        );
        self.velocity = Pose2D::from_parts(
            self.velocity.position + a.position.scale(dt),
            self.velocity.theta + a.theta * dt,
        );
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn stop(&mut self) {
        self.velocity = Pose2D::ZERO;
    }

    /// Keeps only the part of `vel` that is tangential to a circle about
    /// `pivot` through `origin`.
    pub fn restrict_vel_to(origin: Vector2, vel: Vector2, pivot: Vector2) -> Vector2 {
        let delta = origin - pivot;
        let dist_sqr = delta.sqr_norm();
        if dist_sqr.abs() <= PIVOT_DEGENERACY_SQR {
            return Vector2::ZERO;
        }

        let mediate = (delta.y * vel.x - delta.x * vel.y) / dist_sqr;
        Vector2::new(delta.y * mediate, -delta.x * mediate)
    }

    /// Angular velocity about `pivot` (revolutions per second, clockwise)
    /// produced by the linear velocity `vel` at `origin`.
    pub fn rotational_vel_from(origin: Vector2, vel: Vector2, pivot: Vector2) -> f64 {
        let delta = pivot - origin;
        let dist_sqr = delta.sqr_norm();
        if dist_sqr.abs() <= PIVOT_DEGENERACY_SQR {
            return 0.0;
        }

        (delta.x * vel.y - delta.y * vel.x) / (TAU * dist_sqr)
    }

    /// Inverse of [`RigidBody::rotational_vel_from`]: the tangential linear
    /// velocity at `origin` for a clockwise `ang_vel` about `pivot`.
    pub fn linear_vel_from(origin: Vector2, ang_vel: f64, pivot: Vector2) -> Vector2 {
        let delta = origin - pivot;
        if delta.sqr_norm().abs() <= PIVOT_DEGENERACY_SQR {
            return Vector2::ZERO;
        }

        Vector2::new(delta.y, -delta.x).scale(ang_vel * TAU)
    }
}

pub fn delta_dist_accel(accel: f64, dt: f64, last_velocity: f64) -> f64 {
    0.5 * accel * dt * dt + dt * last_velocity
}

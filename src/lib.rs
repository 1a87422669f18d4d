//! Simulation core for a hanging robot that swings from a low rung and
//! reaches for a high rung with a pivoting, extending, hook-tipped arm.
//!
//! The geometry layer ([`Vector2`], [`AffineTransform2D`], [`Pose2D`], [`Arc`])
//! is made of small `Copy` value types: every operation returns a new value.
//! [`RigidBody`] carries pose and velocity, and [`ArmRobot`] runs the per-tick
//! pipeline of command intake, collision resolution and integration.

pub mod arc;
pub mod body;
pub mod config;
pub mod error;
pub mod hardware;
pub mod pose;
pub mod robot;
pub mod stabilizer;
pub mod telemetry;
pub mod teleop;
pub mod transform;
pub mod vector;

pub use arc::Arc;
pub use body::{PhysicsEntity, RigidBody};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use pose::Pose2D;
pub use robot::{ArmRobot, RobotShapes};
pub use transform::AffineTransform2D;
pub use vector::Vector2;

pub mod library {
    use std::f64::consts::PI;

    pub fn rad(degrees: f64) -> f64 {
        degrees * PI / 180.0
    }

    pub fn deg(radians: f64) -> f64 {
        radians * 180.0 / PI
    }

    pub fn seconds(ms: f64) -> f64 {
        ms * 0.001
    }

    pub fn lerp(a: f64, t: f64, b: f64) -> f64 {
        t * (b - a) + a
    }

    pub fn clamp(min: f64, x: f64, max: f64) -> f64 {
        min.max(x.min(max))
    }

    /// Remainder that always carries the sign of the divisor.
    pub fn modulo(dividend: f64, divisor: f64) -> f64 {
        ((dividend % divisor) + divisor) % divisor
    }

    /// Wraps `x` into `[min, max)`.
    pub fn wrap(min: f64, x: f64, max: f64) -> f64 {
        modulo(x - min, max - min) + min
    }

    /// Maps any angle onto `(-PI, PI]`.
    pub fn norm_angle(theta: f64) -> f64 {
        theta.sin().atan2(theta.cos())
    }

    pub fn sign(x: f64) -> f64 {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::f64::consts::TAU;
        use approx::assert_abs_diff_eq;

        #[test]
        fn degree_conversions_invert() {
            assert_eq!(rad(0.0), 0.0);
            assert_eq!(rad(90.0), PI / 2.0);
            assert_eq!(rad(360.0), TAU);
            assert_eq!(rad(-135.0), -0.75 * PI);
            assert_eq!(deg(PI / 2.0), 90.0);
            assert_abs_diff_eq!(deg(rad(18.0)), 18.0, epsilon = 1e-12);
            assert_abs_diff_eq!(rad(deg(0.5)), 0.5, epsilon = 1e-12);
        }

        #[test]
        fn lerp_and_clamp() {
            let (a, b) = (-0.25, 5.6);
            assert_eq!(lerp(a, 0.0, b), a);
            assert_eq!(lerp(a, 1.0, b), b);
            assert_abs_diff_eq!(lerp(a, 0.5, b), (a + b) / 2.0, epsilon = 1e-12);
            assert_eq!(clamp(a, 10.0, b), b);
            assert_eq!(clamp(a, -1.0, b), a);
            assert_eq!(clamp(a, 0.5, b), 0.5);
        }

        #[test]
        fn wrap_repeats_every_period() {
            let (a, b) = (-0.25, 5.6);
            assert_abs_diff_eq!(wrap(a, a, b), a, epsilon = 1e-12);
            assert_abs_diff_eq!(wrap(a, a + 2.0 * (b - a), b), a, epsilon = 1e-12);
            assert_abs_diff_eq!(wrap(a, a + 0.5 + 4.0 * (b - a), b), a + 0.5, epsilon = 1e-12);
            assert_eq!(modulo(-1.0, 3.0), 2.0);
        }

        #[test]
        fn norm_angle_keeps_both_half_turns() {
            assert_abs_diff_eq!(norm_angle(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(norm_angle(rad(360.0)), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(norm_angle(rad(-270.0)), rad(90.0), epsilon = 1e-12);
            assert_abs_diff_eq!(norm_angle(rad(190.0)), rad(-170.0), epsilon = 1e-12);
            assert_eq!(norm_angle(PI), PI);
            assert_eq!(norm_angle(-PI), -PI);
        }

        #[test]
        fn sign_of_zero_is_zero() {
            assert_eq!(sign(-3.0), -1.0);
            assert_eq!(sign(0.0), 0.0);
            assert_eq!(sign(2.0), 1.0);
        }
    }
}

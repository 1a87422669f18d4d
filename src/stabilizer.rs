//! Closed-form arm targets for hooking the high rung while the robot climbs.
//!
//! With the arm mount a horizontal distance `x` from the rung and a vertical
//! distance `u = h - y` below it, the hook (radius `r`) sits on the rung when
//!
//! ```text
//! l·cos θ - r·sin θ = x
//! l·sin θ + r·cos θ = u
//! ```
//!
//! which solves to `θ = asin((-r·x + |u|·sqrt(u² + x² - r²)) / (u² + x²))` and
//! `l = x·cos θ + u·sin θ`. The time derivatives follow from the rate at
//! which the measured height changes between updates.

use crate::config::SimConfig;

/// Anything that can report how high the arm mount is above the ground, in
/// inches.
pub trait HeightSource {
    fn height(&self) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
pub struct AscentStabilizer {
    /// Height of the high rung above the ground
    pub rung_height: f64,
    /// Horizontal distance from the arm mount to the rung
    pub rung_offset: f64,
    pub hook_radius: f64,
    first_update: bool,
    last_y: f64,
    last_t: f64,
    current_y: f64,
    current_t: f64,
}

impl AscentStabilizer {
    pub fn new(rung_height: f64, rung_offset: f64, hook_radius: f64) -> AscentStabilizer {
        AscentStabilizer {
            rung_height,
            rung_offset,
            hook_radius,
            first_update: true,
            last_y: 0.0,
            last_t: 0.0,
            current_y: 0.0,
            current_t: 0.0,
        }
    }

    /// Stabilizer for the configured robot hanging at zero heading.
    pub fn from_config(config: &SimConfig) -> AscentStabilizer {
        let chassis = &config.chassis;
        let mount_x = chassis.mount_gap + chassis.offset_x + chassis.width / 2.0;
        AscentStabilizer::new(
            config.field.high_rung.y,
            mount_x - config.field.high_rung.x,
            config.arm.hook_radius,
        )
    }

    /// Takes a new height sample at time `t` (seconds). Must be called before
    /// the other methods each loop.
    pub fn update<S: HeightSource>(&mut self, t: f64, source: &S) {
        let y = source.height();
        if self.first_update {
            // No history yet, so the first sample is also the previous one.
            self.current_y = y;
            self.current_t = t;
            self.first_update = false;
        }

        self.last_y = self.current_y;
        self.last_t = self.current_t;
        self.current_y = y;
        self.current_t = t;
    }

    /// Forgets the sample history; the next update starts from scratch.
    pub fn restart(&mut self) {
        self.first_update = true;
    }

    /// Height of the arm mount at the latest update.
    pub fn y(&self) -> f64 {
        self.current_y
    }

    /// Vertical distance from the arm mount up to the rung.
    pub fn delta_y(&self) -> f64 {
        self.rung_height - self.current_y
    }

    /// Rate of change of the height between the last two updates.
    pub fn y_prime(&self) -> f64 {
        let dy = self.current_y - self.last_y;
        let dt = self.current_t - self.last_t;
        if dy == 0.0 || dt == 0.0 {
            return 0.0;
        }
        dy / dt
    }

    /// Arm angle that puts the hook on the rung, radians.
    pub fn theta(&self) -> f64 {
        let u = self.delta_y();
        let (x, r) = (self.rung_offset, self.hook_radius);
        let squares_sum = u * u + x * x;
        ((-r * x + u.abs() * (squares_sum - r * r).sqrt()) / squares_sum).asin()
    }

    /// Arm length that puts the hook on the rung, inches.
    pub fn l(&self) -> f64 {
        let theta = self.theta();
        self.rung_offset * theta.cos() + self.delta_y() * theta.sin()
    }

    pub fn theta_prime(&self) -> f64 {
        let u = self.delta_y();
        let (x, r) = (self.rung_offset, self.hook_radius);
        let squares_sum = u * u + x * x;
        let numerator = x.powi(4) + x * x * (u * u - r * r) + r * r * u * u;

        -(1.0 / self.theta().cos()) * self.y_prime() / (squares_sum * squares_sum)
            * (u.signum() * numerator / (squares_sum - r * r).sqrt() + 2.0 * u * r * x)
    }

    pub fn l_prime(&self) -> f64 {
        let theta = self.theta();
        let sine = theta.sin();
        self.theta_prime() * (self.delta_y() * theta.cos() - self.rung_offset * sine) - self.y_prime() * sine
    }
}

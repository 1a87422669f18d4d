//! Encoder tick conversions for the arm's three actuators.

use std::f64::consts::TAU;

use crate::config::SimConfig;

/// Gearing constants for the lift, pivot and hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmUnits {
    /// Lift travel per encoder tick, inches
    lift_inches_per_tick: f64,
    /// Pivot encoder ticks per arm revolution
    pivot_ticks_per_rev: f64,
    hand_ticks_per_inch: f64,
    initial_arm_length: f64,
}

impl ArmUnits {
    pub fn new(config: &SimConfig) -> ArmUnits {
        ArmUnits {
            lift_inches_per_tick: config.arm.extension_limit / config.arm.extension_ticks,
            pivot_ticks_per_rev: config.arm.pivot_gearing * config.motors.pivot.ticks_per_rev,
            hand_ticks_per_inch: config.arm.hand_ticks_per_inch,
            initial_arm_length: config.initial_arm_length(),
        }
    }

    pub fn initial_arm_length(&self) -> f64 {
        self.initial_arm_length
    }

    pub fn lift_ticks_to_inches(&self, ticks: f64) -> f64 {
        ticks * self.lift_inches_per_tick
    }

    pub fn inches_to_lift_ticks(&self, inches: f64) -> f64 {
        inches / self.lift_inches_per_tick
    }

    pub fn pivot_ticks_to_radians(&self, ticks: f64) -> f64 {
        ticks * TAU / self.pivot_ticks_per_rev
    }

    pub fn radians_to_pivot_ticks(&self, radians: f64) -> f64 {
        radians / TAU * self.pivot_ticks_per_rev
    }

    /// Distance from the arm mount to the hook for a lift encoder position.
    pub fn lift_ticks_to_hook_dist_inches(&self, ticks: f64) -> f64 {
        self.lift_ticks_to_inches(ticks) + self.initial_arm_length
    }

    pub fn hook_dist_inches_to_lift_ticks(&self, inches: f64) -> f64 {
        self.inches_to_lift_ticks(inches - self.initial_arm_length)
    }

    pub fn hand_ticks_to_inches(&self, ticks: f64) -> f64 {
        ticks / self.hand_ticks_per_inch
    }

    pub fn inches_to_hand_ticks(&self, inches: f64) -> f64 {
        inches * self.hand_ticks_per_inch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn units() -> ArmUnits {
        ArmUnits::new(&SimConfig::default())
    }

    #[test]
    fn default_gearing() {
        let units = units();
        assert_relative_eq!(units.lift_ticks_to_inches(2500.0), 25.0, max_relative = 1e-12);
        assert_relative_eq!(units.pivot_ticks_to_radians(28.0 * 537.7), TAU, max_relative = 1e-12);
        assert_relative_eq!(units.radians_to_pivot_ticks(PI), 14.0 * 537.7, max_relative = 1e-12);
        assert_relative_eq!(units.hand_ticks_to_inches(537.7), 1.0, max_relative = 1e-12);
        assert_eq!(units.lift_ticks_to_hook_dist_inches(0.0), 10.0);
    }

    #[test]
    fn conversions_round_trip() {
        let units = units();
        for ticks in [-1234.5, 0.0, 1.0, 7528.0, 15055.6] {
            assert_relative_eq!(units.radians_to_pivot_ticks(units.pivot_ticks_to_radians(ticks)), ticks, max_relative = 1e-12);
            assert_relative_eq!(units.inches_to_lift_ticks(units.lift_ticks_to_inches(ticks)), ticks, max_relative = 1e-12);
            assert_relative_eq!(units.inches_to_hand_ticks(units.hand_ticks_to_inches(ticks)), ticks, max_relative = 1e-12);
        }
        for inches in [10.0, 12.5, 30.25, 35.0] {
            let ticks = units.hook_dist_inches_to_lift_ticks(inches);
            assert_relative_eq!(units.lift_ticks_to_hook_dist_inches(ticks), inches, max_relative = 1e-12);
        }
    }
}

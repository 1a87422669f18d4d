//! Simulator configuration
//!
//! Geometry, actuators and field layout are loaded from a TOML file. Every
//! section has defaults matching the reference robot, so a file only needs
//! the values it changes.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::GRAVITY;
use crate::error::{Result, SimError};
use crate::vector::Vector2;

/// Top-level simulator configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub chassis: ChassisConfig,
    pub arm: ArmConfig,
    pub field: FieldConfig,
    pub motors: MotorsConfig,
    pub physics: PhysicsConfig,
    pub viewer: ViewerConfig,
}

/// Chassis rectangle and where it hangs from the hand
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChassisConfig {
    pub width: f64,
    pub height: f64,
    /// Arm mount position relative to the rectangle's center
    pub offset_x: f64,
    pub offset_y: f64,
    /// Clearance between the barrier and the chassis at rest
    pub mount_gap: f64,
    /// Height sensor position relative to the chassis reference point
    pub height_sensor_offset: f64,
}

/// Arm, hook and hand actuator geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArmConfig {
    pub hook_radius: f64,
    /// Arm angle limits, radians clockwise from pointing at the barrier
    pub min_theta: f64,
    pub max_theta: f64,
    /// Travel of the lift beyond its retracted length, inches
    pub extension_limit: f64,
    /// Lift encoder ticks over the full `extension_limit`
    pub extension_ticks: f64,
    /// Motor revolutions per arm revolution
    pub pivot_gearing: f64,
    /// Maximum hand travel, inches
    pub hand_travel: f64,
    pub hand_ticks_per_inch: f64,
}

/// Field layout: pivot (low rung), high rung, barrier and ground
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldConfig {
    pub pivot: Vector2,
    pub high_rung: Vector2,
    pub rung_diameter: f64,
    pub barrier_height: f64,
    /// Half-length of the ground segment centered on x = 0
    pub ground_extent: f64,
}

/// Encoder motor parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotorConfig {
    pub rpm: f64,
    pub ticks_per_rev: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotorsConfig {
    pub pivot: MotorConfig,
    pub lift: MotorConfig,
    pub hand: MotorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration, inches per second squared
    pub gravity: f64,
    /// Initial linear velocity of the center of mass before it is projected
    /// onto the swing
    pub initial_velocity: Vector2,
}

/// Viewer window and telemetry settings (ignored by the core)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub pixels_per_inch: f64,
    /// World point drawn at the window's bottom-left margin
    pub origin: Vector2,
    pub max_dt: f64,
    pub font_path: String,
    pub font_size: u16,
    pub telemetry_interval_ms: f64,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            width: 17.0,
            height: 10.0,
            offset_x: 4.0,
            offset_y: 1.0,
            mount_gap: 0.5,
            height_sensor_offset: -3.0,
        }
    }
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            hook_radius: 2.0,
            min_theta: 0.0,
            max_theta: PI,
            extension_limit: 25.0,
            extension_ticks: 2500.0,
            pivot_gearing: 28.0,
            hand_travel: 8.0,
            hand_ticks_per_inch: 537.7,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pivot: Vector2::new(0.0, 18.0),
            high_rung: Vector2::new(0.0, 36.0),
            rung_diameter: 1.0,
            barrier_height: 18.0,
            ground_extent: 1000.0,
        }
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        // goBILDA 5203 19.2:1
        Self {
            rpm: 312.0,
            ticks_per_rev: 537.7,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            initial_velocity: Vector2::new(0.0, -10.0),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            pixels_per_inch: 14.0,
            origin: Vector2::new(-20.0, -4.0),
            max_dt: 1.0 / 60.0,
            font_path: "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf".to_string(),
            font_size: 14,
            telemetry_interval_ms: 200.0,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Rejects geometry the simulator cannot represent.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("chassis.width", self.chassis.width),
            ("chassis.height", self.chassis.height),
            ("arm.hook_radius", self.arm.hook_radius),
            ("arm.extension_ticks", self.arm.extension_ticks),
            ("arm.pivot_gearing", self.arm.pivot_gearing),
            ("arm.hand_ticks_per_inch", self.arm.hand_ticks_per_inch),
            ("field.ground_extent", self.field.ground_extent),
            ("motors.pivot.rpm", self.motors.pivot.rpm),
            ("motors.pivot.ticks_per_rev", self.motors.pivot.ticks_per_rev),
            ("motors.lift.rpm", self.motors.lift.rpm),
            ("motors.lift.ticks_per_rev", self.motors.lift.ticks_per_rev),
            ("motors.hand.rpm", self.motors.hand.rpm),
            ("motors.hand.ticks_per_rev", self.motors.hand.ticks_per_rev),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SimError::InvalidGeometry(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("field.rung_diameter", self.field.rung_diameter),
            ("field.barrier_height", self.field.barrier_height),
            ("arm.extension_limit", self.arm.extension_limit),
            ("arm.hand_travel", self.arm.hand_travel),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SimError::InvalidGeometry(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.arm.min_theta > self.arm.max_theta {
            return Err(SimError::InvalidGeometry(format!(
                "arm.min_theta ({}) exceeds arm.max_theta ({})",
                self.arm.min_theta, self.arm.max_theta
            )));
        }

        if self.initial_arm_length() <= 0.0 {
            return Err(SimError::InvalidGeometry(format!(
                "hook radius {} leaves no room for the arm",
                self.arm.hook_radius
            )));
        }

        if (self.field.high_rung - self.field.pivot).sqr_norm() == 0.0 {
            return Err(SimError::InvalidGeometry("high rung coincides with the pivot".to_string()));
        }

        if !self.physics.gravity.is_finite() {
            return Err(SimError::InvalidGeometry(format!("gravity must be finite, got {}", self.physics.gravity)));
        }

        Ok(())
    }

    /// Arm length with the lift fully retracted: from the mount to the hook's
    /// attachment point.
    pub fn initial_arm_length(&self) -> f64 {
        self.chassis.offset_x + self.chassis.width / 2.0 - self.arm.hook_radius - self.chassis.mount_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.initial_arm_length(), 10.0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [chassis]
            width = 20.0

            [field]
            high_rung = { x = 0.0, y = 30.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.chassis.width, 20.0);
        assert_eq!(config.chassis.height, 10.0);
        assert_eq!(config.field.high_rung, Vector2::new(0.0, 30.0));
        assert_eq!(config.field.pivot, Vector2::new(0.0, 18.0));
    }

    #[test]
    fn toml_round_trip() {
        let config = SimConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = SimConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("rascent-config-{}.toml", std::process::id()));
        let mut config = SimConfig::default();
        config.arm.hand_travel = 4.0;
        config.to_file(&path).unwrap();
        let loaded = SimConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::from_file("/nonexistent/rascent.toml").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = SimConfig::from_toml_str("[chassis\nwidth = 1").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn validation_rejects_bad_geometry() {
        let mut config = SimConfig::default();
        config.chassis.width = 0.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidGeometry(_))));

        let mut config = SimConfig::default();
        config.arm.min_theta = 2.0;
        config.arm.max_theta = 1.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.field.high_rung = config.field.pivot;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.arm.hook_radius = 20.0;
        assert!(config.validate().is_err());
    }
}

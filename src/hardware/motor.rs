use crate::config::MotorConfig;
use crate::library::clamp;

/// How a [`DcMotorEx`] turns its commanded velocity into motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Hold the commanded velocity.
    #[default]
    RunUsingEncoder,
    /// Drive toward the target position at the commanded speed, stopping on it.
    RunToPosition,
    /// Same as `RunUsingEncoder` in simulation; there is no velocity loop.
    RunWithoutEncoder,
}

/// Encoder motor with velocity and run-to-position control.
///
/// Velocities are in ticks per second. Power is the fraction of the motor's
/// top tick speed, `rpm / 60 · ticks_per_rev`.
#[derive(Clone, Debug, PartialEq)]
pub struct DcMotorEx {
    max_tick_speed: f64,
    ticks_per_rev: f64,
    velocity: f64,
    current_position: f64,
    target_position: f64,
    mode: RunMode,
}

impl DcMotorEx {
    pub fn new(rpm: f64, ticks_per_rev: f64, position: f64) -> DcMotorEx {
        DcMotorEx {
            max_tick_speed: rpm / 60.0 * ticks_per_rev,
            ticks_per_rev,
            velocity: 0.0,
            current_position: position,
            target_position: position,
            mode: RunMode::default(),
        }
    }

    pub fn from_config(config: &MotorConfig, position: f64) -> DcMotorEx {
        DcMotorEx::new(config.rpm, config.ticks_per_rev, position)
    }

    /// Sets the velocity to `power` (clamped to `[-1, 1]`) times the top speed.
    pub fn set_power(&mut self, power: f64) {
        self.velocity = clamp(-1.0, power, 1.0) * self.max_tick_speed;
    }

    /// Sets the velocity in ticks per second, clamped to the top speed.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = clamp(-self.max_tick_speed, velocity, self.max_tick_speed);
    }

    pub fn power(&self) -> f64 {
        self.velocity / self.max_tick_speed
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn max_tick_speed(&self) -> f64 {
        self.max_tick_speed
    }

    pub fn ticks_per_rev(&self) -> f64 {
        self.ticks_per_rev
    }

    pub fn current_position(&self) -> f64 {
        self.current_position
    }

    pub fn target_position(&self) -> f64 {
        self.target_position
    }

    pub fn set_target_position(&mut self, target: f64) {
        self.target_position = target;
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    /// Moves the encoder by one time step and returns the tick change.
    ///
    /// In [`RunMode::RunToPosition`] only the magnitude of the velocity is
    /// used and the motor never passes its target.
    pub(crate) fn advance(&mut self, dt: f64) -> f64 {
        let delta = match self.mode {
            RunMode::RunToPosition => {
                let step = self.velocity.abs() * dt;
                clamp(-step, self.target_position - self.current_position, step)
            }
            RunMode::RunUsingEncoder | RunMode::RunWithoutEncoder => self.velocity * dt,
        };
        self.current_position += delta;
        delta
    }

    pub(crate) fn set_current_position(&mut self, position: f64) {
        self.current_position = position;
    }
}

/// Power-only motor; the encoder is internal to the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct DcMotorSimple {
    max_tick_speed: f64,
    velocity: f64,
    current_position: f64,
}

impl DcMotorSimple {
    pub fn new(rpm: f64, ticks_per_rev: f64, position: f64) -> DcMotorSimple {
        DcMotorSimple {
            max_tick_speed: rpm / 60.0 * ticks_per_rev,
            velocity: 0.0,
            current_position: position,
        }
    }

    pub fn from_config(config: &MotorConfig, position: f64) -> DcMotorSimple {
        DcMotorSimple::new(config.rpm, config.ticks_per_rev, position)
    }

    pub fn set_power(&mut self, power: f64) {
        self.velocity = clamp(-1.0, power, 1.0) * self.max_tick_speed;
    }

    pub fn power(&self) -> f64 {
        self.velocity / self.max_tick_speed
    }

    pub(crate) fn advance(&mut self, dt: f64) -> f64 {
        let delta = self.velocity * dt;
        self.current_position += delta;
        delta
    }

    pub fn current_position(&self) -> f64 {
        self.current_position
    }

    pub(crate) fn set_current_position(&mut self, position: f64) {
        self.current_position = position;
    }
}

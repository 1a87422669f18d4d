//! Driver control for the climb: a gamepad snapshot, the linear slide state
//! machine, and the timers it runs on.
//!
//! [`Teleop::run`] is called once per loop before the robot is stepped. It
//! only talks to the robot through its motors and height sensor, the same
//! surface the real control code has.

use std::fmt;

use crate::config::SimConfig;
use crate::hardware::{ArmUnits, DistanceUnit, RunMode};
use crate::robot::ArmRobot;
use crate::stabilizer::{AscentStabilizer, HeightSource};
use crate::telemetry::Telemetry;

/// Lift encoder slack, in ticks, that still counts as on target.
const LIFT_TOLERANCE: f64 = 10.0;
/// Pivot encoder slack, in ticks, that still counts as on target.
const PIVOT_TOLERANCE: f64 = 3.0;
/// Both encoders within this many ticks of zero ends an arm reset.
const RESET_TOLERANCE: f64 = 3.0;

/// Controller state for one loop. Stick y axes are positive downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gamepad {
    pub left_stick_x: f64,
    pub left_stick_y: f64,
    pub right_stick_x: f64,
    pub right_stick_y: f64,

    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,

    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,

    pub start: bool,
    pub back: bool,

    pub left_bumper: bool,
    pub right_bumper: bool,
    pub left_stick_button: bool,
    pub right_stick_button: bool,

    pub left_trigger: f64,
    pub right_trigger: f64,
}

/// Keyboard keys the simulator maps onto the gamepad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    M,
    R,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Shift,
    Quote,
}

impl Gamepad {
    pub fn reset(&mut self) {
        *self = Gamepad::default();
    }

    /// Builds the controller state for a set of held keys.
    ///
    /// W/S drive the lift stick, A/D the pivot stick, and the arrows the
    /// dpad. M and R are the two-button combos for manual override and arm
    /// reset. Shift and quote each halve stick speed.
    pub fn from_keys<I: IntoIterator<Item = Key>>(held: I) -> Gamepad {
        let mut gamepad = Gamepad::default();
        let mut speed = 1.0;
        for key in held {
            match key {
                Key::W => gamepad.right_stick_y -= 1.0,
                Key::S => gamepad.right_stick_y += 1.0,
                Key::A => gamepad.left_stick_y -= 1.0,
                Key::D => gamepad.left_stick_y += 1.0,
                Key::Up => gamepad.dpad_up = true,
                Key::Down | Key::Enter => gamepad.dpad_down = true,
                Key::Left => gamepad.dpad_left = true,
                Key::Right => gamepad.dpad_right = true,
                Key::M => {
                    gamepad.dpad_down = true;
                    gamepad.a = true;
                }
                Key::R => {
                    gamepad.dpad_right = true;
                    gamepad.x = true;
                }
                Key::Shift | Key::Quote => speed *= 0.5,
            }
        }
        gamepad.right_stick_y *= speed;
        gamepad.left_stick_y *= speed;
        gamepad
    }
}

/// Timer driven by loop timestamps. Only counts once started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stopwatch {
    last_time: f64,
    elapsed: f64,
    initialized: bool,
    started: bool,
}

impl Stopwatch {
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed
    }

    /// Advances to `timestamp` (seconds).
    pub fn update(&mut self, timestamp: f64) {
        if !self.started {
            return;
        }
        if !self.initialized {
            self.last_time = timestamp;
            self.initialized = true;
        }
        self.elapsed += timestamp - self.last_time;
        self.last_time = timestamp;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearSlideState {
    /// Lift on the right stick, pivot held
    Normal,
    /// Drive both arm encoders back to zero
    ResetArm,
    /// Lift and pivot on the sticks
    ManualOverride,
    /// Move the arm to the stabilizer's hooking pose
    StabilizeRobot,
    /// Climb by feeding the stabilizer's rates to the motors
    HangTimeAutomatic,
    /// Climb by chasing the stabilizer's positions
    HangTimeAutomaticAlternate,
    ExitHangTime,
}

impl fmt::Display for LinearSlideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinearSlideState::Normal => "NORMAL",
            LinearSlideState::ResetArm => "RESET_ARM",
            LinearSlideState::ManualOverride => "MANUAL_OVERRIDE",
            LinearSlideState::StabilizeRobot => "STABILIZE_ROBOT",
            LinearSlideState::HangTimeAutomatic => "HANG_TIME_AUTOMATIC",
            LinearSlideState::HangTimeAutomaticAlternate => "HANG_TIME_AUTOMATIC_ALTERNATE",
            LinearSlideState::ExitHangTime => "EXIT_HANG_TIME",
        };
        f.write_str(name)
    }
}

/// Height of the arm mount derived from the tilted height sensor.
pub struct MountHeight<'a> {
    robot: &'a ArmRobot,
}

impl<'a> MountHeight<'a> {
    pub fn new(robot: &'a ArmRobot) -> MountHeight<'a> {
        MountHeight { robot }
    }
}

impl HeightSource for MountHeight<'_> {
    fn height(&self) -> f64 {
        let pitch = self.robot.heading();
        let sensor_offset = self.robot.config().chassis.height_sensor_offset;
        self.robot.sensor().distance(DistanceUnit::Inch) * pitch.cos() - sensor_offset * pitch.cos()
    }
}

/// Edge detector over consecutive gamepad snapshots.
#[derive(Clone, Copy, Debug, Default)]
struct Pressed {
    now: Gamepad,
    before: Gamepad,
}

impl Pressed {
    fn dpad_down(&self) -> bool {
        self.now.dpad_down && !self.before.dpad_down
    }

    fn dpad_left(&self) -> bool {
        self.now.dpad_left && !self.before.dpad_left
    }

    fn dpad_right(&self) -> bool {
        self.now.dpad_right && !self.before.dpad_right
    }

    fn dpad_up(&self) -> bool {
        self.now.dpad_up && !self.before.dpad_up
    }

    fn x(&self) -> bool {
        self.now.x && !self.before.x
    }
}

pub struct Teleop {
    state: LinearSlideState,
    state_initialized: bool,
    gamepad: Gamepad,
    previous: Gamepad,
    stabilizer: AscentStabilizer,
    stabilizer_timer: Stopwatch,
    run_time: Stopwatch,
    units: ArmUnits,
    /// How far short of the rung the arm stops before the climb
    draw_back: f64,
}

impl Teleop {
    pub fn new(config: &SimConfig) -> Teleop {
        let stabilizer = AscentStabilizer::from_config(config);
        Teleop {
            state: LinearSlideState::ManualOverride,
            state_initialized: false,
            gamepad: Gamepad::default(),
            previous: Gamepad::default(),
            draw_back: stabilizer.hook_radius,
            stabilizer,
            stabilizer_timer: Stopwatch::default(),
            run_time: Stopwatch::default(),
            units: ArmUnits::new(config),
        }
    }

    pub fn state(&self) -> LinearSlideState {
        self.state
    }

    pub fn stabilizer(&self) -> &AscentStabilizer {
        &self.stabilizer
    }

    pub fn set_gamepad(&mut self, gamepad: Gamepad) {
        self.gamepad = gamepad;
    }

    fn transition(&mut self, next: LinearSlideState) {
        log::info!("Linear slide state {} -> {}", self.state, next);
        self.state = next;
        self.state_initialized = false;
    }

    /// One control loop at `timestamp` seconds: reads the gamepad and the
    /// height sensor, then writes motor commands to `robot`.
    pub fn run(&mut self, robot: &mut ArmRobot, timestamp: f64, telemetry: &mut Telemetry) {
        self.run_time.start();
        self.stabilizer_timer.start();
        self.run_time.update(timestamp);
        self.stabilizer_timer.update(timestamp);

        let pressed = Pressed {
            now: self.gamepad,
            before: self.previous,
        };
        let gamepad = self.gamepad;

        robot.hand_motor_mut().set_power(0.0);
        robot.lift_motor_mut().set_power(0.0);
        robot.pivot_motor_mut().set_power(0.0);

        match self.state {
            LinearSlideState::ResetArm => {
                if !self.state_initialized {
                    let pivot = robot.pivot_motor_mut();
                    pivot.set_target_position(0.0);
                    pivot.set_mode(RunMode::RunToPosition);
                    let lift = robot.lift_motor_mut();
                    lift.set_target_position(0.0);
                    lift.set_mode(RunMode::RunToPosition);
                    self.state_initialized = true;
                }

                robot.pivot_motor_mut().set_power(-1.0);
                robot.lift_motor_mut().set_power(-1.0);

                if robot.lift_motor().current_position().abs() <= RESET_TOLERANCE
                    && robot.pivot_motor().current_position().abs() <= RESET_TOLERANCE
                {
                    stop_arm(robot);
                    self.transition(LinearSlideState::Normal);
                }
            }

            LinearSlideState::Normal => {
                self.state_initialized = true;
                // Arm is parked at intake or deposit; only the extension moves.
                robot.lift_motor_mut().set_power(-gamepad.right_stick_y);

                if gamepad.a && pressed.dpad_down() {
                    self.transition(LinearSlideState::ManualOverride);
                } else if pressed.dpad_left() {
                    self.transition(LinearSlideState::StabilizeRobot);
                }
            }

            LinearSlideState::ManualOverride => {
                self.state_initialized = true;
                robot.lift_motor_mut().set_power(-gamepad.right_stick_y);
                robot.pivot_motor_mut().set_power(gamepad.left_stick_y);

                if gamepad.a && pressed.dpad_down() {
                    self.transition(LinearSlideState::Normal);
                } else if pressed.dpad_left() {
                    self.transition(LinearSlideState::StabilizeRobot);
                }
            }

            LinearSlideState::StabilizeRobot => {
                if !self.state_initialized {
                    self.stabilizer_timer.reset();
                }
                let t = self.stabilizer_timer.seconds();
                self.stabilizer.update(t, &MountHeight::new(robot));
                let desired_theta = self.stabilizer.theta();
                let desired_length = self.stabilizer.l() - self.draw_back;
                let pivot_target = self.units.radians_to_pivot_ticks(desired_theta);

                if !self.state_initialized {
                    let lift = robot.lift_motor_mut();
                    lift.set_target_position(self.units.hook_dist_inches_to_lift_ticks(desired_length));
                    lift.set_mode(RunMode::RunToPosition);
                    robot.pivot_motor_mut().set_target_position(pivot_target);
                    self.state_initialized = true;
                }

                robot.lift_motor_mut().set_power(-gamepad.right_stick_y);
                robot.pivot_motor_mut().set_power(gamepad.left_stick_y);

                let lift = robot.lift_motor_mut();
                let length_ready = (lift.current_position() - lift.target_position()).abs() <= LIFT_TOLERANCE;
                if !length_ready {
                    lift.set_mode(RunMode::RunToPosition);
                    lift.set_power(1.0);
                }

                let pivot = robot.pivot_motor_mut();
                let theta_ready = (pivot.current_position() - pivot.target_position()).abs() <= PIVOT_TOLERANCE;
                if !theta_ready {
                    run_pivot_to_position(robot, pivot_target, 1.0);
                }

                telemetry.add_line("----- Stabilize Robot -----");
                self.report_targets(telemetry, t, desired_theta, desired_length);
                telemetry.add_data("current armTheta", self.units.pivot_ticks_to_radians(robot.pivot_motor().current_position()));
                telemetry.add_data("current length", self.units.lift_ticks_to_hook_dist_inches(robot.lift_motor().current_position()));

                if (length_ready && theta_ready) || pressed.dpad_left() {
                    stop_arm(robot);
                    self.transition(LinearSlideState::HangTimeAutomatic);
                } else if pressed.dpad_right() {
                    stop_arm(robot);
                    self.transition(LinearSlideState::ExitHangTime);
                }
            }

            LinearSlideState::HangTimeAutomatic => {
                self.begin_climb(robot);
                let t = self.stabilizer_timer.seconds();
                self.stabilizer.update(t, &MountHeight::new(robot));
                let theta_prime = self.stabilizer.theta_prime();
                let length_prime = self.stabilizer.l_prime();

                let lift = robot.lift_motor_mut();
                lift.set_mode(RunMode::RunUsingEncoder);
                lift.set_velocity(self.units.inches_to_lift_ticks(length_prime));
                let pivot = robot.pivot_motor_mut();
                pivot.set_mode(RunMode::RunUsingEncoder);
                pivot.set_velocity(self.units.radians_to_pivot_ticks(theta_prime));

                telemetry.add_line("--- Automatic Hang Time ---");
                self.report_targets(telemetry, t, self.stabilizer.theta(), self.stabilizer.l() - self.draw_back);
                telemetry.add_data("yPrime", self.stabilizer.y_prime());
                telemetry.add_data("lengthPrime", length_prime);
                telemetry.add_data("thetaPrime", theta_prime);

                self.leave_climb(robot, pressed, LinearSlideState::HangTimeAutomaticAlternate);
            }

            LinearSlideState::HangTimeAutomaticAlternate => {
                self.begin_climb(robot);
                let t = self.stabilizer_timer.seconds();
                self.stabilizer.update(t, &MountHeight::new(robot));
                let desired_theta = self.stabilizer.theta();
                let desired_length = self.stabilizer.l() - self.draw_back;

                let lift = robot.lift_motor_mut();
                lift.set_target_position(self.units.hook_dist_inches_to_lift_ticks(desired_length));
                lift.set_mode(RunMode::RunToPosition);
                lift.set_power(1.0);
                run_pivot_to_position(robot, self.units.radians_to_pivot_ticks(desired_theta), 1.0);

                telemetry.add_line("--- Automatic Hang Time (Alternate ~ Position) ---");
                self.report_targets(telemetry, t, desired_theta, desired_length);

                self.leave_climb(robot, pressed, LinearSlideState::HangTimeAutomatic);
            }

            LinearSlideState::ExitHangTime => {
                self.transition(LinearSlideState::Normal);
            }
        }

        if gamepad.dpad_down {
            // Lower the hand in case it jams.
            robot.hand_motor_mut().set_power(-1.0);
        }

        if gamepad.dpad_right && gamepad.x && (pressed.dpad_right() || pressed.x()) {
            self.transition(LinearSlideState::ResetArm);
        }

        telemetry.add_line("---------- Teleop ---------");
        telemetry.add_data("Run Time", format!("{:.2}", self.run_time.seconds()));
        telemetry.add_data("State", self.state);

        self.previous = gamepad;
    }

    /// First loop of a climb state restarts the stabilizer's clock and history.
    fn begin_climb(&mut self, robot: &ArmRobot) {
        if self.state_initialized {
            return;
        }
        self.stabilizer_timer.reset();
        self.stabilizer.restart();
        self.stabilizer.update(self.stabilizer_timer.seconds(), &MountHeight::new(robot));
        self.state_initialized = true;
    }

    /// Dpad left ends the climb, dpad right re-stabilizes, dpad up switches
    /// to the other climb mode.
    fn leave_climb(&mut self, robot: &mut ArmRobot, pressed: Pressed, other: LinearSlideState) {
        let next = if pressed.dpad_left() {
            LinearSlideState::ExitHangTime
        } else if pressed.dpad_right() {
            LinearSlideState::StabilizeRobot
        } else if pressed.dpad_up() {
            other
        } else {
            return;
        };
        stop_arm(robot);
        self.transition(next);
    }

    fn report_targets(&self, telemetry: &mut Telemetry, t: f64, desired_theta: f64, desired_length: f64) {
        telemetry.add_data("t", format!("{t:.3}"));
        telemetry.add_data("y", self.stabilizer.y());
        telemetry.add_data("deltaY", self.stabilizer.delta_y());
        telemetry.add_data("desiredArmTheta", desired_theta);
        telemetry.add_data("desiredArmLength", desired_length);
    }
}

fn run_pivot_to_position(robot: &mut ArmRobot, target: f64, speed: f64) {
    let pivot = robot.pivot_motor_mut();
    pivot.set_target_position(target);
    pivot.set_mode(RunMode::RunToPosition);
    pivot.set_power(speed);
}

fn stop_arm(robot: &mut ArmRobot) {
    let lift = robot.lift_motor_mut();
    lift.set_mode(RunMode::RunUsingEncoder);
    lift.set_power(0.0);
    let pivot = robot.pivot_motor_mut();
    pivot.set_mode(RunMode::RunUsingEncoder);
    pivot.set_power(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PhysicsEntity;
    use approx::assert_abs_diff_eq;

    const DT: f64 = 1.0 / 60.0;

    fn setup() -> (Teleop, ArmRobot, Telemetry) {
        let config = SimConfig::default();
        (Teleop::new(&config), ArmRobot::new(&config).unwrap(), Telemetry::new())
    }

    #[test]
    fn keys_map_onto_the_gamepad() {
        let gamepad = Gamepad::from_keys([Key::W, Key::D, Key::Shift]);
        assert_eq!(gamepad.right_stick_y, -0.5);
        assert_eq!(gamepad.left_stick_y, 0.5);

        let combo = Gamepad::from_keys([Key::M]);
        assert!(combo.dpad_down && combo.a);
        let reset = Gamepad::from_keys([Key::R]);
        assert!(reset.dpad_right && reset.x);

        let mut cleared = Gamepad::from_keys([Key::Enter, Key::S, Key::Quote, Key::Shift]);
        assert!(cleared.dpad_down);
        assert_eq!(cleared.right_stick_y, 0.25);
        cleared.reset();
        assert_eq!(cleared, Gamepad::default());
    }

    #[test]
    fn stopwatch_counts_from_start() {
        let mut watch = Stopwatch::default();
        watch.update(1.0);
        assert_eq!(watch.seconds(), 0.0);

        watch.start();
        watch.update(2.0);
        watch.update(2.5);
        assert_eq!(watch.seconds(), 0.5);
        watch.reset();
        watch.update(3.0);
        assert_eq!(watch.seconds(), 0.5);
    }

    #[test]
    fn manual_override_drives_both_sticks() {
        let (mut teleop, mut robot, mut telemetry) = setup();
        assert_eq!(teleop.state(), LinearSlideState::ManualOverride);

        teleop.set_gamepad(Gamepad::from_keys([Key::W, Key::D]));
        teleop.run(&mut robot, 0.0, &mut telemetry);
        assert_eq!(robot.lift_motor().power(), 1.0);
        assert_eq!(robot.pivot_motor().power(), 1.0);
        assert_eq!(robot.hand_motor().power(), 0.0);
    }

    #[test]
    fn combo_toggles_once_per_press() {
        let (mut teleop, mut robot, mut telemetry) = setup();

        teleop.set_gamepad(Gamepad::from_keys([Key::M]));
        teleop.run(&mut robot, 0.0, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::Normal);
        // Holding the combo is not a second press; the hand is lowered meanwhile.
        teleop.run(&mut robot, DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::Normal);
        assert_eq!(robot.hand_motor().power(), -1.0);

        teleop.set_gamepad(Gamepad::from_keys([Key::D]));
        teleop.run(&mut robot, 2.0 * DT, &mut telemetry);
        assert_eq!(robot.pivot_motor().power(), 0.0);

        teleop.set_gamepad(Gamepad::from_keys([Key::M]));
        teleop.run(&mut robot, 3.0 * DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::ManualOverride);
    }

    #[test]
    fn stabilize_aims_the_arm_at_the_rung() {
        let (mut teleop, mut robot, mut telemetry) = setup();

        teleop.set_gamepad(Gamepad::from_keys([Key::Left]));
        teleop.run(&mut robot, 0.0, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::StabilizeRobot);

        teleop.set_gamepad(Gamepad::default());
        teleop.run(&mut robot, DT, &mut telemetry);
        assert_abs_diff_eq!(teleop.stabilizer().y(), 6.0, epsilon = 1e-9);

        let units = robot.units();
        let pivot = robot.pivot_motor();
        assert_eq!(pivot.mode(), RunMode::RunToPosition);
        assert_abs_diff_eq!(pivot.target_position(), units.radians_to_pivot_ticks(1.1006799104100196), epsilon = 1e-6);
        let lift = robot.lift_motor();
        assert_eq!(lift.mode(), RunMode::RunToPosition);
        assert_abs_diff_eq!(
            lift.target_position(),
            units.hook_dist_inches_to_lift_ticks(32.63433774416144 - 2.0),
            epsilon = 1e-6
        );
        assert!(telemetry.update(DT));
        assert!(telemetry.published().iter().any(|line| line == "State: STABILIZE_ROBOT"));
    }

    #[test]
    fn stabilize_aborts_and_returns_to_normal() {
        let (mut teleop, mut robot, mut telemetry) = setup();
        teleop.set_gamepad(Gamepad::from_keys([Key::Left]));
        teleop.run(&mut robot, 0.0, &mut telemetry);

        teleop.set_gamepad(Gamepad::from_keys([Key::Right]));
        teleop.run(&mut robot, DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::ExitHangTime);
        assert_eq!(robot.pivot_motor().mode(), RunMode::RunUsingEncoder);
        assert_eq!(robot.pivot_motor().power(), 0.0);

        teleop.run(&mut robot, 2.0 * DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::Normal);
    }

    #[test]
    fn climb_modes_switch_on_dpad_up() {
        let (mut teleop, mut robot, mut telemetry) = setup();
        teleop.set_gamepad(Gamepad::from_keys([Key::Left]));
        teleop.run(&mut robot, 0.0, &mut telemetry);
        teleop.set_gamepad(Gamepad::default());
        teleop.run(&mut robot, DT, &mut telemetry);
        // Skip the alignment.
        teleop.set_gamepad(Gamepad::from_keys([Key::Left]));
        teleop.run(&mut robot, 2.0 * DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::HangTimeAutomatic);

        teleop.set_gamepad(Gamepad::default());
        teleop.run(&mut robot, 3.0 * DT, &mut telemetry);
        assert_eq!(robot.lift_motor().mode(), RunMode::RunUsingEncoder);
        // Robot is not climbing, so the stabilizer asks for no motion.
        assert_eq!(robot.lift_motor().velocity(), 0.0);

        teleop.set_gamepad(Gamepad::from_keys([Key::Up]));
        teleop.run(&mut robot, 4.0 * DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::HangTimeAutomaticAlternate);

        teleop.set_gamepad(Gamepad::default());
        teleop.run(&mut robot, 5.0 * DT, &mut telemetry);
        assert_eq!(robot.pivot_motor().mode(), RunMode::RunToPosition);
        assert_eq!(robot.pivot_motor().power(), 1.0);

        teleop.set_gamepad(Gamepad::from_keys([Key::Left]));
        teleop.run(&mut robot, 6.0 * DT, &mut telemetry);
        assert_eq!(teleop.state(), LinearSlideState::ExitHangTime);
    }

    #[test]
    fn reset_returns_the_arm_to_zero() {
        let (mut teleop, mut robot, mut telemetry) = setup();
        teleop.set_gamepad(Gamepad::from_keys([Key::W, Key::D]));
        for step in 0..30 {
            teleop.run(&mut robot, step as f64 * DT, &mut telemetry);
            robot.update(step as f64 * DT, DT);
        }
        assert!(robot.arm_theta() > 0.0);
        assert!(robot.arm_length() > 10.0);

        teleop.set_gamepad(Gamepad::from_keys([Key::R]));
        let mut step = 30;
        while teleop.state() != LinearSlideState::Normal && step < 300 {
            teleop.run(&mut robot, step as f64 * DT, &mut telemetry);
            robot.update(step as f64 * DT, DT);
            teleop.set_gamepad(Gamepad::default());
            step += 1;
        }
        assert_eq!(teleop.state(), LinearSlideState::Normal);
        assert!(robot.pivot_motor().current_position().abs() <= 3.0);
        assert!(robot.lift_motor().current_position().abs() <= 3.0);
    }

    #[test]
    fn mount_height_undoes_sensor_tilt() {
        let (_, mut robot, _) = setup();
        robot.set_heading(-0.2);
        let expected = robot.body().y();
        assert_abs_diff_eq!(MountHeight::new(&robot).height(), expected, epsilon = 1e-9);
    }
}

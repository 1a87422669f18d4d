//! The hanging robot: a rectangular chassis that swings about the low rung,
//! carrying a pivoting, extending arm with a hook on its end.
//!
//! Positions are computed in the chassis frame (heading zero) and rotated
//! about the pivot into the world. Each [`ArmRobot::update`] runs command
//! intake, rung and chassis contact resolution, then integration, in that
//! order.

pub mod collision;

use std::f64::consts::{PI, TAU};

use crate::arc::Arc;
use crate::body::{PhysicsEntity, RigidBody};
use crate::config::SimConfig;
use crate::error::Result;
use crate::hardware::{ArmUnits, DcMotorEx, DcMotorSimple, DistanceSensor, DistanceUnit};
use crate::library::{clamp, deg};
use crate::pose::Pose2D;
use crate::telemetry::Telemetry;
use crate::vector::Vector2;

/// World-frame primitives for drawing the robot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobotShapes {
    /// Chassis corners in perimeter order
    pub chassis: [Vector2; 4],
    /// Arm mount and arm end
    pub arm: (Vector2, Vector2),
    pub hook: Arc,
    pub center_of_mass: Vector2,
}

#[derive(Clone, Debug)]
pub struct ArmRobot {
    config: SimConfig,
    units: ArmUnits,
    /// Pose of the arm mount and the velocity of the center of mass.
    /// `velocity.theta` is in clockwise revolutions per second.
    body: RigidBody,
    arm_theta: f64,
    arm_length: f64,
    hand_extension: f64,
    pivot_motor: DcMotorEx,
    lift_motor: DcMotorEx,
    hand_motor: DcMotorSimple,
    sensor: DistanceSensor,
    elapsed: f64,
    in_contact: bool,
}

impl ArmRobot {
    /// Builds a robot hanging at rest with the arm retracted, then gives the
    /// center of mass the configured initial velocity, keeping only the part
    /// that swings about the pivot.
    pub fn new(config: &SimConfig) -> Result<ArmRobot> {
        config.validate()?;

        let units = ArmUnits::new(config);
        if config.arm.min_theta > 0.0 || config.arm.max_theta < 0.0 {
            log::warn!(
                "Arm limits [{}, {}] exclude the parked angle, starting clamped",
                config.arm.min_theta,
                config.arm.max_theta
            );
        }
        let mut robot = ArmRobot {
            config: config.clone(),
            units,
            body: RigidBody::default(),
            arm_theta: clamp(config.arm.min_theta, 0.0, config.arm.max_theta),
            arm_length: units.initial_arm_length(),
            hand_extension: 0.0,
            pivot_motor: DcMotorEx::from_config(&config.motors.pivot, 0.0),
            lift_motor: DcMotorEx::from_config(&config.motors.lift, 0.0),
            hand_motor: DcMotorSimple::from_config(&config.motors.hand, 0.0),
            sensor: DistanceSensor::new(),
            elapsed: 0.0,
            in_contact: false,
        };

        let pivot = config.field.pivot;
        let position = robot.to_world(robot.unrotated_position(), 0.0);
        let com = robot.center_of_mass();
        let ang_vel = RigidBody::rotational_vel_from(com, config.physics.initial_velocity, pivot);
        let linear = RigidBody::linear_vel_from(com, ang_vel, pivot);
        robot.body = RigidBody::with_velocity(Pose2D::from_parts(position, 0.0), Pose2D::from_parts(linear, ang_vel));
        robot.sync_encoders();
        robot.update_sensor();

        log::info!(
            "Robot ready: mount at {}, arm length {:.2} in, swing {:.4} rev/s",
            position,
            robot.arm_length,
            ang_vel
        );
        Ok(robot)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn units(&self) -> &ArmUnits {
        &self.units
    }

    /// Chassis heading, radians clockwise.
    pub fn heading(&self) -> f64 {
        self.body.position.theta
    }

    /// Places the chassis at `heading` without touching its velocity.
    pub fn set_heading(&mut self, heading: f64) {
        let position = self.to_world(self.unrotated_position(), heading);
        self.body.position = Pose2D::from_parts(position, heading);
        self.update_sensor();
    }

    /// Swing rate in clockwise revolutions per second.
    pub fn angular_velocity(&self) -> f64 {
        self.body.velocity.theta
    }

    /// Sets the swing rate, giving the center of mass the matching tangential
    /// velocity.
    pub fn set_angular_velocity(&mut self, ang_vel: f64) {
        let linear = RigidBody::linear_vel_from(self.center_of_mass(), ang_vel, self.config.field.pivot);
        self.body.velocity = Pose2D::from_parts(linear, ang_vel);
    }

    pub fn arm_theta(&self) -> f64 {
        self.arm_theta
    }

    pub fn arm_length(&self) -> f64 {
        self.arm_length
    }

    pub fn hand_extension(&self) -> f64 {
        self.hand_extension
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the last update ended with the chassis stopped by the ground
    /// or the barrier.
    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    pub fn pivot_motor(&self) -> &DcMotorEx {
        &self.pivot_motor
    }

    pub fn pivot_motor_mut(&mut self) -> &mut DcMotorEx {
        &mut self.pivot_motor
    }

    pub fn lift_motor(&self) -> &DcMotorEx {
        &self.lift_motor
    }

    pub fn lift_motor_mut(&mut self) -> &mut DcMotorEx {
        &mut self.lift_motor
    }

    pub fn hand_motor(&self) -> &DcMotorSimple {
        &self.hand_motor
    }

    pub fn hand_motor_mut(&mut self) -> &mut DcMotorSimple {
        &mut self.hand_motor
    }

    pub fn sensor(&self) -> &DistanceSensor {
        &self.sensor
    }

    /// Arm mount in the chassis frame.
    fn unrotated_position(&self) -> Vector2 {
        self.unrotated_position_with(self.hand_extension)
    }

    fn unrotated_position_with(&self, hand_extension: f64) -> Vector2 {
        let chassis = &self.config.chassis;
        Vector2::new(
            chassis.mount_gap + chassis.offset_x + chassis.width / 2.0,
            chassis.offset_y + chassis.height / 2.0 + hand_extension,
        )
    }

    fn unrotated_corners(&self, hand_extension: f64) -> [Vector2; 4] {
        let chassis = &self.config.chassis;
        let mount = self.unrotated_position_with(hand_extension);
        let left = mount.x - chassis.offset_x - chassis.width / 2.0;
        let bottom = mount.y - chassis.offset_y - chassis.height / 2.0;
        let (right, top) = (left + chassis.width, bottom + chassis.height);
        [
            Vector2::new(left, bottom),
            Vector2::new(right, bottom),
            Vector2::new(right, top),
            Vector2::new(left, top),
        ]
    }

    /// Unit vector from the mount along the arm, chassis frame.
    fn arm_direction(&self) -> Vector2 {
        Vector2::new(-self.arm_theta.cos(), self.arm_theta.sin())
    }

    fn unrotated_hook_center(&self) -> Vector2 {
        let normal = Vector2::new(self.arm_theta.sin(), self.arm_theta.cos());
        self.unrotated_position() + self.arm_direction().scale(self.arm_length) + normal.scale(self.config.arm.hook_radius)
    }

    fn to_world(&self, point: Vector2, heading: f64) -> Vector2 {
        point.rotate_about(-heading, self.config.field.pivot)
    }

    pub fn chassis_corners(&self) -> [Vector2; 4] {
        self.chassis_corners_at(self.heading(), self.hand_extension)
    }

    fn chassis_corners_at(&self, heading: f64, hand_extension: f64) -> [Vector2; 4] {
        self.unrotated_corners(hand_extension).map(|corner| self.to_world(corner, heading))
    }

    pub fn center_of_mass(&self) -> Vector2 {
        let chassis = &self.config.chassis;
        let offset = Vector2::new(-chassis.offset_x / 2.0, -chassis.offset_y / 2.0);
        self.to_world(self.unrotated_position() + offset, self.heading())
    }

    /// The hook as a half circle curling from its top, around the tip, back
    /// to the end of the arm.
    pub fn hook_arc(&self) -> Arc {
        let heading = self.heading();
        let start = PI / 2.0 - self.arm_theta - heading;
        Arc::new(
            self.config.arm.hook_radius,
            self.to_world(self.unrotated_hook_center(), heading),
            start,
            start + PI,
            true,
        )
    }

    pub fn shapes(&self) -> RobotShapes {
        let heading = self.heading();
        let mount = self.unrotated_position();
        let arm_end = mount + self.arm_direction().scale(self.arm_length);
        RobotShapes {
            chassis: self.chassis_corners(),
            arm: (self.to_world(mount, heading), self.to_world(arm_end, heading)),
            hook: self.hook_arc(),
            center_of_mass: self.center_of_mass(),
        }
    }

    /// Whether the chassis touches the ground or the barrier at `heading`.
    pub fn collides_at(&self, heading: f64) -> bool {
        self.hits_field(&self.chassis_corners_at(heading, self.hand_extension))
    }

    fn hits_field(&self, corners: &[Vector2; 4]) -> bool {
        let field = &self.config.field;
        let ground = (Vector2::new(-field.ground_extent, 0.0), Vector2::new(field.ground_extent, 0.0));
        let barrier = (Vector2::ZERO, Vector2::new(0.0, field.barrier_height));
        collision::box_hits_segment(corners, ground.0, ground.1)
            || collision::box_hits_segment(corners, barrier.0, barrier.1)
    }

    /// Whether the chassis would cross into the ground or the barrier with
    /// the hand at `hand_extension`. Resting on either does not count.
    fn penetrates(&self, heading: f64, hand_extension: f64) -> bool {
        let corners = self.chassis_corners_at(heading, hand_extension);
        let lowest = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let leftmost = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        (lowest < -collision::CONTACT_SLACK || leftmost < -collision::CONTACT_SLACK) && self.hits_field(&corners)
    }

    fn sync_encoders(&mut self) {
        let lift_ticks = self.units.hook_dist_inches_to_lift_ticks(self.arm_length);
        self.pivot_motor.set_current_position(self.units.radians_to_pivot_ticks(self.arm_theta));
        self.lift_motor.set_current_position(lift_ticks);
        self.hand_motor.set_current_position(self.units.inches_to_hand_ticks(self.hand_extension));
    }

    fn update_sensor(&mut self) {
        let reading = self.body.y() / self.heading().cos() + self.config.chassis.height_sensor_offset;
        self.sensor.set_distance(DistanceUnit::Inch, reading);
    }

    /// Adds the robot's state to a telemetry frame.
    pub fn report(&self, telemetry: &mut Telemetry) {
        telemetry.add_data("heading (deg)", format!("{:.2}", deg(self.heading())));
        telemetry.add_data("swing (rev/s)", format!("{:.4}", self.angular_velocity()));
        telemetry.add_data("arm theta (deg)", format!("{:.2}", deg(self.arm_theta)));
        telemetry.add_data("arm length (in)", format!("{:.2}", self.arm_length));
        telemetry.add_data("hand (in)", format!("{:.2}", self.hand_extension));
        telemetry.add_data("height sensor (in)", format!("{:.2}", self.sensor.distance(DistanceUnit::Inch)));
        telemetry.add_data("contact", self.in_contact);
    }
}

impl PhysicsEntity for ArmRobot {
    fn body(&self) -> &RigidBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    fn update(&mut self, elapsed: f64, dt: f64) {
        self.elapsed = elapsed;
        let pivot = self.config.field.pivot;
        let rung = self.config.field.high_rung;
        let rung_radius = self.config.field.rung_diameter / 2.0;
        let arm = &self.config.arm;
        let max_length = self.units.initial_arm_length() + arm.extension_limit;

        // Command intake
        let pivot_ticks = self.pivot_motor.advance(dt);
        let lift_ticks = self.lift_motor.advance(dt);
        let hand_ticks = self.hand_motor.advance(dt);

        let target_theta = clamp(arm.min_theta, self.arm_theta + self.units.pivot_ticks_to_radians(pivot_ticks), arm.max_theta);
        let target_length = clamp(
            self.units.initial_arm_length(),
            self.arm_length + self.units.lift_ticks_to_inches(lift_ticks),
            max_length,
        );
        let mut delta_arm_theta = target_theta - self.arm_theta;
        let mut delta_length = target_length - self.arm_length;
        let delta_actuate = self.units.hand_ticks_to_inches(hand_ticks);
        let mut delta_theta = TAU * self.body.velocity.theta * dt;

        // Rung contact
        let hook = self.hook_arc();
        let sweep = delta_theta + delta_arm_theta;
        if let Some(t) = collision::angular_contact(&hook, pivot, rung, rung_radius, sweep) {
            log::debug!("Hook meets rung after {:.4} of a {:.5} rad sweep", t, sweep);
            // The rung takes up the blocked part of the swing.
            if t < 1.0 {
                self.set_angular_velocity(self.angular_velocity() * t);
            }
            delta_theta *= t;
            delta_arm_theta *= t;
        }

        let direction = self.arm_direction().rotate_about(-self.heading(), Vector2::ZERO);
        if let Some(contact) = collision::linear_contact(&hook, pivot, rung, rung_radius, direction, delta_length) {
            log::debug!(
                "Lift meets rung after {:.4} of {:.4} in, heading nudge {:.6} rad",
                contact.t,
                delta_length,
                contact.nudge
            );
            delta_length *= contact.t;
            delta_theta += contact.nudge;
        }

        // Ground and barrier
        let heading = self.heading();
        let mut new_heading = heading + delta_theta;
        let contact = if delta_theta == 0.0 {
            None
        } else {
            collision::sweep_contact(delta_theta, |f| self.collides_at(heading + f * delta_theta))
        };
        self.in_contact = contact.is_some();
        if let Some(fraction) = contact {
            new_heading = heading + fraction * delta_theta;
            log::debug!("Chassis contact after {:.6} of {:.6} rad", fraction, delta_theta);
            self.body.stop();
        }

        // The hand moves the chassis too, so it stops where the chassis would
        // cross the ground or the barrier.
        let hand = self.hand_extension;
        let mut new_hand = clamp(0.0, hand + delta_actuate, self.config.arm.hand_travel);
        if new_hand != hand && self.penetrates(new_heading, new_hand) {
            let travel = new_hand - hand;
            let fraction = collision::bisect_contact(|f| self.penetrates(new_heading, hand + f * travel));
            log::debug!("Hand blocked after {:.6} of {:.4} in", fraction, travel);
            new_hand = hand + fraction * travel;
        }

        // Integration
        self.hand_extension = new_hand;
        let position = self.to_world(self.unrotated_position(), new_heading);
        self.body.position = Pose2D::from_parts(position, new_heading);

        // The ground carries the chassis for the rest of a tick that ended in contact.
        if !self.in_contact {
            let mut velocity = self.body.velocity.position;
            velocity.y += self.config.physics.gravity * dt;
            let com = self.center_of_mass();
            let ang_vel = RigidBody::rotational_vel_from(com, velocity, pivot);
            let linear = RigidBody::linear_vel_from(com, ang_vel, pivot);
            self.body.velocity = Pose2D::from_parts(linear, ang_vel);
        }

        self.arm_length = clamp(self.units.initial_arm_length(), self.arm_length + delta_length, max_length);
        self.arm_theta = clamp(self.config.arm.min_theta, self.arm_theta + delta_arm_theta, self.config.arm.max_theta);
        self.sync_encoders();
        self.update_sensor();

        log::trace!(
            "t={:.3} heading={:.5} arm=({:.4}, {:.3}) hand={:.3}",
            elapsed,
            new_heading,
            self.arm_theta,
            self.arm_length,
            self.hand_extension
        );
    }
}

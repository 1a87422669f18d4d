//! Simulated robot hardware: encoder motors, the height sensor, and the
//! tick/inch/radian conversions the arm actuators are geared with.
//!
//! Control code talks to these the same way it would talk to the real
//! devices. Only the simulator moves encoder positions and sensor readings,
//! so those setters are crate-private.

pub mod motor;
pub mod sensor;
pub mod units;

pub use motor::{DcMotorEx, DcMotorSimple, RunMode};
pub use sensor::{DistanceSensor, DistanceUnit};
pub use units::ArmUnits;

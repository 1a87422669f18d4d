use crate::vector::Vector2;

/// Position plus heading (radians, clockwise-positive).
///
/// Also used as a "delta pose": a linear velocity paired with an angular one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    pub position: Vector2,
    pub theta: f64,
}

impl Pose2D {
    pub const ZERO: Pose2D = Pose2D {
        position: Vector2::ZERO,
        theta: 0.0,
    };

    pub const fn new(x: f64, y: f64, theta: f64) -> Pose2D {
        Pose2D {
            position: Vector2::new(x, y),
            theta,
        }
    }

    pub const fn from_parts(position: Vector2, theta: f64) -> Pose2D {
        Pose2D { position, theta }
    }

    /// Scales position and heading alike.
    pub fn scale(&self, scalar: f64) -> Pose2D {
        Pose2D::from_parts(self.position.scale(scalar), self.theta * scalar)
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn with_position(&self, position: Vector2) -> Pose2D {
        Pose2D::from_parts(position, self.theta)
    }

    pub fn with_theta(&self, theta: f64) -> Pose2D {
        Pose2D::from_parts(self.position, theta)
    }
}

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::transform::AffineTransform2D;

/// Plain 2D vector. Every method returns a fresh value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Vector2 {
        Vector2 { x, y }
    }

    /// Unit vector pointing at `theta` (counter-clockwise from +x).
    pub fn from_angle(theta: f64) -> Vector2 {
        Vector2::new(theta.cos(), theta.sin())
    }

    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, scalar: f64) -> Vector2 {
        Vector2::new(scalar * self.x, scalar * self.y)
    }

    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product.
    pub fn cross(self, other: Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn sqr_norm(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn arctan(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    pub fn transform(self, matrix: &AffineTransform2D) -> Vector2 {
        matrix.apply(self)
    }

    /// Rotates counter-clockwise by `theta` around `center`.
    pub fn rotate_about(self, theta: f64, center: Vector2) -> Vector2 {
        self.transform(&AffineTransform2D::rotation_about(theta, center))
    }

    /// Undoes [`Vector2::rotate_about`] with the same arguments.
    pub fn unrotate_about(self, theta: f64, center: Vector2) -> Vector2 {
        self.rotate_about(-theta, center)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        self.scale(-1.0)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector<{}, {}>", self.x, self.y)
    }
}

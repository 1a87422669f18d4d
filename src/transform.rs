//! 2×3 affine transform used for every rigid motion in the simulator.
//!
//! The components follow the canvas convention: a point maps to
//! `(a·x + c·y + e, b·x + d·y + f)`. Constructors take their parameters
//! row-major, the way the matrix is written on paper, so
//! `from_params(&[cos, -sin, sin, cos])` is a counter-clockwise rotation.

use crate::error::{Result, SimError};
use crate::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform2D {
    pub const IDENTITY: AffineTransform2D = AffineTransform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Builds a transform from 0 (identity), 4 (linear part), 6 (linear part
    /// and translation) or 9 (row-major 3×3, last row ignored) parameters.
    pub fn from_params(params: &[f64]) -> Result<Self> {
        match *params {
            [] => Ok(Self::IDENTITY),
            [m11, m12, m21, m22] => Ok(Self::linear(m11, m12, m21, m22)),
            [m11, m12, m21, m22, tx, ty] => Ok(Self {
                e: tx,
                f: ty,
                ..Self::linear(m11, m12, m21, m22)
            }),
            [m11, m12, tx, m21, m22, ty, _, _, _] => Ok(Self {
                e: tx,
                f: ty,
                ..Self::linear(m11, m12, m21, m22)
            }),
            _ => Err(SimError::InvalidTransform {
                count: params.len(),
            }),
        }
    }

    /// Linear map `[m11 m12; m21 m22]` without translation.
    pub const fn linear(m11: f64, m12: f64, m21: f64, m22: f64) -> Self {
        Self {
            a: m11,
            b: m21,
            c: m12,
            d: m22,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translation(offset: Vector2) -> Self {
        Self {
            e: offset.x,
            f: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::linear(cos, -sin, sin, cos)
    }

    /// Counter-clockwise rotation about `center`, composed as
    /// translate(center) · rotate · translate(-center).
    pub fn rotation_about(theta: f64, center: Vector2) -> Self {
        Self::translation(center)
            .multiply(&Self::rotation(theta))
            .multiply(&Self::translation(-center))
    }

    /// Matrix product `self · other`: `other` is applied first.
    pub fn multiply(&self, other: &AffineTransform2D) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.a * v.x + self.c * v.y + self.e,
            self.b * v.x + self.d * v.y + self.f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const ABCDEF: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 7.0];

    #[test]
    fn params_are_row_major() {
        let [a, b, c, d, e, f] = ABCDEF;
        assert_eq!(AffineTransform2D::from_params(&[]).unwrap(), AffineTransform2D::IDENTITY);

        let four = AffineTransform2D::from_params(&[a, b, c, d]).unwrap();
        assert_eq!((four.a, four.b, four.c, four.d), (a, c, b, d));
        assert_eq!((four.e, four.f), (0.0, 0.0));

        let six = AffineTransform2D::from_params(&ABCDEF).unwrap();
        assert_eq!((six.a, six.b, six.c, six.d, six.e, six.f), (a, c, b, d, e, f));

        let nine = AffineTransform2D::from_params(&[a, b, e, c, d, f, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(nine, six);
    }

    #[test]
    fn bad_parameter_count_is_rejected() {
        let err = AffineTransform2D::from_params(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SimError::InvalidTransform { count: 3 }));
    }

    #[test]
    fn apply_uses_canvas_layout() {
        let t = AffineTransform2D::from_params(&ABCDEF).unwrap();
        let v = t.apply(Vector2::new(1.0, 1.0));
        // (1·1 + 2·1 + 5, 3·1 + 4·1 + 7)
        assert_eq!(v, Vector2::new(8.0, 14.0));
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let shift = AffineTransform2D::translation(Vector2::new(1.0, 0.0));
        let turn = AffineTransform2D::rotation(PI / 2.0);
        let p = turn.multiply(&shift).apply(Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_about_keeps_center_fixed() {
        let center = Vector2::new(0.0, 18.0);
        let t = AffineTransform2D::rotation_about(0.7, center);
        let c = t.apply(center);
        assert_abs_diff_eq!(c.x, center.x, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, center.y, epsilon = 1e-12);

        let p = t.apply(Vector2::new(0.0, 0.0));
        assert_abs_diff_eq!((p - center).norm(), 18.0, epsilon = 1e-12);
    }
}

//! Circular arcs and the intersection math the collision pipeline is built on.
//!
//! An arc is a circle plus an angular interval `[start_angle, end_angle]`
//! (always stored ordered). When `is_between` is true the arc is the
//! counter-clockwise sweep from start to end; otherwise it is the complement,
//! the clockwise sweep from start to end.
//!
//! Angles are only comparable once normalized, so point queries go through
//! [`Arc::normalize`] first. [`Arc::contains`] on its own is a raw interval test
//! and its result depends on how the arc and the angle are represented.

use std::f64::consts::{PI, TAU};

use crate::error::{Result, SimError};
use crate::library::norm_angle;
use crate::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    center: Vector2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    is_between: bool,
}

impl Arc {
    /// Builds an arc; the two angles are reordered so `start <= end`.
    pub fn new(radius: f64, center: Vector2, start_angle: f64, end_angle: f64, is_between: bool) -> Arc {
        Arc {
            center,
            radius,
            start_angle: start_angle.min(end_angle),
            end_angle: start_angle.max(end_angle),
            is_between,
        }
    }

    /// Like [`Arc::new`] but rejects radii that are not strictly positive.
    pub fn checked(radius: f64, center: Vector2, start_angle: f64, end_angle: f64, is_between: bool) -> Result<Arc> {
        if !(radius > 0.0) {
            return Err(SimError::InvalidGeometry(format!("arc radius must be positive, got {radius}")));
        }
        Ok(Arc::new(radius, center, start_angle, end_angle, is_between))
    }

    /// The whole circle, in the canonical normalized form.
    pub fn full_circle(radius: f64, center: Vector2) -> Arc {
        Arc::new(radius, center, -PI, -PI, false)
    }

    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn is_between(&self) -> bool {
        self.is_between
    }

    pub fn norm_start_angle(&self) -> f64 {
        norm_angle(self.start_angle)
    }

    pub fn norm_end_angle(&self) -> f64 {
        norm_angle(self.end_angle)
    }

    /// Swept angle in radians; multiply by the radius for a path length.
    pub fn arc_length(&self) -> f64 {
        let span = self.end_angle - self.start_angle;
        if self.is_between { span } else { TAU - span }
    }

    /// Point on the underlying circle at `theta`.
    pub fn point_at(&self, theta: f64) -> Vector2 {
        self.center + Vector2::from_angle(theta).scale(self.radius)
    }

    /// Same point set with both angles in `(-PI, PI]`.
    ///
    /// Normalizing can swap the order of the bounds, which flips which side of
    /// the interval the arc covers. Where the midpoint of the input
    /// interval lands decides the new `is_between`.
    pub fn normalize(&self) -> Arc {
        if self.arc_length() >= TAU {
            return Arc::full_circle(self.radius, self.center);
        }

        let start = self.norm_start_angle();
        let end = self.norm_end_angle();
        let mid = norm_angle((self.start_angle + self.end_angle) * 0.5);
        let mid_between = mid >= start.min(end) && mid <= start.max(end);

        Arc::new(self.radius, self.center, start, end, !(self.is_between ^ mid_between))
    }

    /// Raw interval test. Only meaningful when the arc and `theta` share a
    /// representation, e.g. a normalized arc and a normalized angle.
    pub fn contains(&self, theta: f64) -> bool {
        (theta >= self.start_angle && theta <= self.end_angle) == self.is_between
    }

    /// Whether the direction from the center to `point` falls on the arc.
    pub fn sector_contains(&self, point: Vector2) -> bool {
        self.normalize().contains((point - self.center).arctan())
    }

    /// Intersections of the two full circles, ignoring both angular ranges.
    ///
    /// Returns two points when the circles cross, two equal points when they
    /// touch, and nothing otherwise (including concentric circles).
    pub fn circle_intersect(&self, other: &Arc) -> Vec<Vector2> {
        let delta = self.center - other.center;
        let l_sqr = delta.sqr_norm();
        if l_sqr == 0.0 {
            return Vec::new();
        }

        let r1_sqr = self.radius * self.radius;
        let t = 0.5 * (l_sqr + r1_sqr - other.radius * other.radius) / l_sqr;
        let radicand = r1_sqr / l_sqr - t * t;
        if radicand.is_nan() || radicand < 0.0 {
            return Vec::new();
        }

        let perp_offset = delta.perp().scale(radicand.sqrt());
        let foot = self.center - delta.scale(t);
        vec![foot + perp_offset, foot - perp_offset]
    }

    /// Circle intersections that lie on both arcs.
    pub fn arc_intersect(&self, other: &Arc) -> Vec<Vector2> {
        self.circle_intersect(other)
            .into_iter()
            .filter(|&p| self.sector_contains(p) && other.sector_contains(p))
            .collect()
    }

    /// Intersections of the full circle with the line `a·x + b·y = c`.
    ///
    /// The line's direction is `(b, -a)`. Returns nothing for a degenerate
    /// line (`a = b = 0`) or a line that misses the circle.
    pub fn line_intersect_full(&self, a: f64, b: f64, c: f64) -> Vec<Vector2> {
        // Move the circle to the origin.
        let c_prime = c - a * self.center.x - b * self.center.y;
        let sqr_sum = a * a + b * b;
        let discriminant = self.radius * self.radius * sqr_sum - c_prime * c_prime;

        if discriminant < 0.0 || sqr_sum == 0.0 {
            return Vec::new();
        }

        let x_radical = (b * b * discriminant).sqrt() / sqr_sum;
        let y_radical = a * discriminant.sqrt() / sqr_sum;
        let x_addend = a * c_prime / sqr_sum;
        let y_addend = b * c_prime / sqr_sum;

        vec![
            Vector2::new(x_addend + x_radical, y_addend - y_radical) + self.center,
            Vector2::new(x_addend - x_radical, y_addend + y_radical) + self.center,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::rad;
    use approx::assert_abs_diff_eq;

    fn arc_a() -> Arc {
        Arc::new(5.0, Vector2::new(1.0, 3.0), rad(190.0), rad(-40.0), true)
    }

    fn arc_b() -> Arc {
        Arc::new(5.0, Vector2::new(2.0, 2.0), rad(-90.0), rad(90.0), false)
    }

    fn arc_c() -> Arc {
        Arc::new(12.0, Vector2::new(0.0, -12.0), rad(-180.0), rad(45.0), true)
    }

    fn arc_d() -> Arc {
        Arc::new(2.0, Vector2::ZERO, rad(0.0), rad(360.0), true)
    }

    fn assert_near(actual: Vector2, expected: Vector2, epsilon: f64) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = epsilon);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = epsilon);
    }

    /// Unit offset from the arc's center at `theta`.
    fn point_toward(theta: f64, arc: &Arc) -> Vector2 {
        Vector2::from_angle(theta) + arc.center()
    }

    #[test]
    fn constructor_orders_angles() {
        let a = arc_a();
        assert_eq!(a.start_angle(), rad(-40.0));
        assert_eq!(a.end_angle(), rad(190.0));
        assert_eq!(a.radius(), 5.0);
        assert_abs_diff_eq!(a.norm_start_angle(), rad(-40.0), epsilon = 1e-12);
        assert_abs_diff_eq!(a.norm_end_angle(), rad(-170.0), epsilon = 1e-12);
    }

    #[test]
    fn checked_rejects_non_positive_radius() {
        assert!(Arc::checked(0.0, Vector2::ZERO, 0.0, 1.0, true).is_err());
        assert!(Arc::checked(f64::NAN, Vector2::ZERO, 0.0, 1.0, true).is_err());
        assert!(Arc::checked(1.0, Vector2::ZERO, 0.0, 1.0, true).is_ok());
    }

    #[test]
    fn circle_intersections_come_in_order() {
        let (a, b) = (arc_a(), arc_b());
        let ab = a.circle_intersect(&b);
        assert_eq!(ab.len(), 2);
        assert_near(ab[0], Vector2::new(-2.0, -1.0), 1e-4);
        assert_near(ab[1], Vector2::new(5.0, 6.0), 1e-4);

        let ba = b.circle_intersect(&a);
        assert_near(ba[0], Vector2::new(5.0, 6.0), 1e-4);
        assert_near(ba[1], Vector2::new(-2.0, -1.0), 1e-4);

        let ac = a.circle_intersect(&arc_c());
        assert_near(ac[0], Vector2::new(-2.7411, -0.31726), 1e-3);
        assert_near(ac[1], Vector2::new(4.2676, -0.7845), 1e-3);
    }

    #[test]
    fn circle_intersect_misses_and_concentric() {
        let far = Arc::new(1.0, Vector2::new(10.0, 0.0), 0.0, TAU, true);
        assert!(arc_d().circle_intersect(&far).is_empty());

        let inner = Arc::new(0.5, Vector2::new(0.1, 0.0), 0.0, TAU, true);
        assert!(arc_d().circle_intersect(&inner).is_empty());

        let same_center = Arc::new(3.0, Vector2::ZERO, 0.0, TAU, true);
        assert!(arc_d().circle_intersect(&same_center).is_empty());
    }

    #[test]
    fn tangent_circles_give_duplicate_points() {
        let left = Arc::new(1.0, Vector2::ZERO, 0.0, TAU, true);
        let right = Arc::new(1.0, Vector2::new(2.0, 0.0), 0.0, TAU, true);
        let touch = left.circle_intersect(&right);
        assert_eq!(touch.len(), 2);
        assert_near(touch[0], Vector2::new(1.0, 0.0), 1e-12);
        assert_eq!(touch[0], touch[1]);
    }

    #[test]
    fn raw_contains() {
        let (a, b, c, d) = (arc_a(), arc_b(), arc_c(), arc_d());
        assert!(a.contains(rad(60.0)));
        assert!(!a.contains(rad(-135.0)));
        assert!(!b.contains(rad(60.0)));
        assert!(b.contains(rad(-135.0)));
        assert!(!c.contains(rad(60.0)));
        assert!(c.contains(rad(-135.0)));
        assert!(d.contains(rad(60.0)));
        assert!(!d.contains(rad(-135.0)));
    }

    #[test]
    fn normalized_contains() {
        let angles = [norm_angle(rad(60.0)), norm_angle(rad(-135.0))];
        let expected = [
            (arc_a(), [true, false]),
            (arc_b(), [false, true]),
            (arc_c(), [false, true]),
            (arc_d(), [true, true]),
        ];
        for (arc, truth) in expected {
            let normalized = arc.normalize();
            for (theta, want) in angles.iter().zip(truth) {
                assert_eq!(normalized.contains(*theta), want, "{arc:?} at {theta}");
            }
        }
    }

    #[test]
    fn normalize_full_circle_is_canonical() {
        let n = arc_d().normalize();
        assert_eq!(n.start_angle(), -PI);
        assert_eq!(n.end_angle(), -PI);
        assert!(!n.is_between());

        let outside = Arc::new(1.0, Vector2::ZERO, 0.3, 0.3, false);
        assert_eq!(outside.arc_length(), TAU);
        assert_eq!(outside.normalize(), Arc::full_circle(1.0, Vector2::ZERO));
    }

    #[test]
    fn normalize_handles_windows_beyond_one_turn() {
        let arc = Arc::new(1.0, Vector2::ZERO, rad(400.0), rad(450.0), true);
        let n = arc.normalize();
        assert!(n.contains(rad(60.0)));
        assert!(!n.contains(rad(30.0)));
        assert!(!n.contains(rad(100.0)));
    }

    #[test]
    fn arc_length_follows_sweep_side() {
        assert_abs_diff_eq!(arc_b().arc_length(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(arc_a().arc_length(), rad(230.0), epsilon = 1e-12);
    }

    #[test]
    fn sector_contains_uses_normalized_arc() {
        let expected = [
            (arc_a(), [true, false]),
            (arc_b(), [false, true]),
            (arc_c(), [false, true]),
            (arc_d(), [true, true]),
        ];
        for (arc, [at_60, at_neg_135]) in expected {
            assert_eq!(arc.sector_contains(point_toward(rad(60.0), &arc)), at_60);
            assert_eq!(arc.sector_contains(point_toward(rad(-135.0), &arc)), at_neg_135);
        }
    }

    #[test]
    fn arc_intersect_filters_by_both_sectors() {
        let d = arc_d();
        let lower_outside = Arc::new(2.0, Vector2::new(-1.0, 0.0), rad(-180.0), 0.0, false);
        let lower_inside = Arc::new(2.0, Vector2::new(-1.0, 0.0), rad(-180.0), 0.0, true);

        let de = d.arc_intersect(&lower_outside);
        let df = d.arc_intersect(&lower_inside);
        assert_eq!(de.len(), 1);
        assert_eq!(df.len(), 1);
        assert_ne!(de[0], df[0]);
        assert_near(de[0], Vector2::new(-0.5, 15f64.sqrt() / 2.0), 1e-12);
        assert_near(df[0], Vector2::new(-0.5, -(15f64.sqrt()) / 2.0), 1e-12);

        // The a/b crossings are both off the hooked side of a.
        assert!(arc_a().arc_intersect(&arc_b()).is_empty());
    }

    #[test]
    fn line_intersections() {
        let a = arc_a();
        let vertical = a.line_intersect_full(1.0, 0.0, 2.0);
        assert_near(vertical[0], Vector2::new(2.0, -1.9), 1e-2);
        assert_near(vertical[1], Vector2::new(2.0, 7.9), 1e-2);

        let b_vertical = arc_b().line_intersect_full(1.0, 0.0, 2.0);
        assert_near(b_vertical[0], Vector2::new(2.0, -3.0), 1e-9);
        assert_near(b_vertical[1], Vector2::new(2.0, 7.0), 1e-9);

        let slanted = a.line_intersect_full(-2.0, 3.0, 4.0);
        assert_near(slanted[0], Vector2::new(5.5637821, 5.04252), 1e-3);
        assert_near(slanted[1], Vector2::new(-2.640705, -0.427135), 1e-3);

        let shallow = a.line_intersect_full(1.0, 4.0, 5.0);
        assert_near(shallow[0], Vector2::new(5.0, 0.0), 1e-9);
        assert_near(shallow[1], Vector2::new(-3.941175, 2.235294), 1e-3);
    }

    #[test]
    fn line_misses_or_degenerates() {
        assert!(arc_a().line_intersect_full(1.0, 0.0, 100.0).is_empty());
        assert!(arc_a().line_intersect_full(0.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn point_at_sits_on_circle() {
        let a = arc_a();
        let p = a.point_at(1.1);
        assert_abs_diff_eq!((p - a.center()).norm(), 5.0, epsilon = 1e-12);
    }
}

//! Contact tests between the robot and the field.
//!
//! All three tests work on tentative deltas and report how much of the
//! motion can happen before first contact. They never move anything
//! themselves; [`super::ArmRobot`] applies the results.

use std::f64::consts::TAU;

use crate::arc::Arc;
use crate::body::{PIVOT_DEGENERACY_SQR, RigidBody};
use crate::library::{clamp, norm_angle, sign};
use crate::vector::Vector2;

/// Halvings used when searching for the first chassis contact.
pub const BISECTION_ITERATIONS: usize = 100;

/// Widest chassis rotation checked in one piece. Longer sweeps are split so
/// a fast swing cannot step over the ground or the barrier.
pub const MAX_SWEEP_STEP: f64 = 0.02;

/// Depth below which the chassis counts as resting on the field rather
/// than crossing into it.
pub const CONTACT_SLACK: f64 = 1e-12;

/// Slack on the swept-segment bounding box test.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Result of clipping the lift against the rung.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearContact {
    /// Fraction of the length change that happens before contact
    pub t: f64,
    /// Heading change produced by the blocked part of the extension
    pub nudge: f64,
}

/// Fraction of a hook sweep that happens before the hook meets the rung.
///
/// `sweep` is the combined clockwise rotation of the hook (chassis heading
/// change plus arm angle change). In the hook's frame the rung travels
/// counter-clockwise about `pivot` by the same amount; `rung_radius` widens
/// that path on both ends. Returns `None` when nothing is hit.
pub fn angular_contact(hook: &Arc, pivot: Vector2, rung: Vector2, rung_radius: f64, sweep: f64) -> Option<f64> {
    let offset = rung - pivot;
    if sweep == 0.0 || offset.sqr_norm() <= PIVOT_DEGENERACY_SQR {
        return None;
    }

    let rho = offset.norm();
    let start = offset.arctan();
    let s = sign(sweep);
    let thickness = (rung_radius / rho).atan();
    let rung_path = Arc::new(rho, pivot, start - s * thickness, start + sweep + s * thickness, true);

    hook.arc_intersect(&rung_path)
        .into_iter()
        .map(|point| {
            let travelled = s * norm_angle((point - pivot).arctan() - start);
            clamp(0.0, (travelled - thickness) / sweep.abs(), 1.0)
        })
        .reduce(f64::min)
}

/// Clips a change in arm length against the rung.
///
/// `direction` is the unit world direction the arm extends in. The hook moves
/// by `delta_length · direction`, so relative to the hook the rung slides the
/// other way, padded by `rung_radius`. On contact the blocked remainder of
/// the motion pushes the robot back, which shows up as a heading nudge about
/// `pivot`.
pub fn linear_contact(
    hook: &Arc,
    pivot: Vector2,
    rung: Vector2,
    rung_radius: f64,
    direction: Vector2,
    delta_length: f64,
) -> Option<LinearContact> {
    if delta_length == 0.0 {
        return None;
    }

    let a = -direction.y;
    let b = direction.x;
    let c = a * rung.x + b * rung.y;
    let reach = delta_length + sign(delta_length) * rung_radius;
    let end = rung - direction.scale(reach);

    let (contact, t) = hook
        .line_intersect_full(a, b, c)
        .into_iter()
        .filter(|&p| within_bounds(p, rung, end) && hook.sector_contains(p))
        .map(|p| (p, clamp(0.0, ((p - rung).norm() - rung_radius) / delta_length.abs(), 1.0)))
        .reduce(|best, next| if next.1 < best.1 { next } else { best })?;

    let blocked = direction.scale((1.0 - t) * delta_length);
    let nudge = TAU * RigidBody::rotational_vel_from(contact, -blocked, pivot);
    Some(LinearContact { t, nudge })
}

fn within_bounds(p: Vector2, a: Vector2, b: Vector2) -> bool {
    p.x >= a.x.min(b.x) - BOUNDS_EPSILON
        && p.x <= a.x.max(b.x) + BOUNDS_EPSILON
        && p.y >= a.y.min(b.y) - BOUNDS_EPSILON
        && p.y <= a.y.max(b.y) + BOUNDS_EPSILON
}

/// Whether segments `p1-p2` and `q1-q2` share a point. Endpoints count;
/// parallel segments never intersect.
pub fn segments_intersect(p1: Vector2, p2: Vector2, q1: Vector2, q2: Vector2) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.cross(s);
    if denom == 0.0 {
        return false;
    }

    let gap = q1 - p1;
    let t = gap.cross(s) / denom;
    let u = gap.cross(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Whether any edge of the quadrilateral crosses the segment `a-b`.
/// Corners must be listed in perimeter order.
pub fn box_hits_segment(corners: &[Vector2; 4], a: Vector2, b: Vector2) -> bool {
    (0..corners.len()).any(|i| segments_intersect(corners[i], corners[(i + 1) % corners.len()], a, b))
}

/// Largest fraction of a motion known to be contact free, given a predicate
/// that reports contact at a fraction. Assumes the full motion collides.
pub fn bisect_contact<F: Fn(f64) -> bool>(collides: F) -> f64 {
    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if collides(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Fraction of a chassis sweep of `delta` radians that stays contact free,
/// given a predicate that reports contact at a fraction of the sweep.
///
/// The sweep is checked at most [`MAX_SWEEP_STEP`] apart and the first
/// colliding piece is bisected. Returns `None` when every check is clear.
pub fn sweep_contact<F: Fn(f64) -> bool>(delta: f64, collides: F) -> Option<f64> {
    let steps = (delta.abs() / MAX_SWEEP_STEP).ceil().max(1.0) as usize;
    let width = 1.0 / steps as f64;
    (0..steps).find_map(|i| {
        let lo = i as f64 * width;
        let hi = if i + 1 == steps { 1.0 } else { lo + width };
        collides(hi).then(|| lo + (hi - lo) * bisect_contact(|f| collides(lo + (hi - lo) * f)))
    })
}

//! Fixed-step streamline integration.
//!
//! [`trace`] follows a [`VectorField`] from a seed using explicit Euler steps
//! of constant length along the unit field direction. A negative step walks
//! against the field. Tracing stops when the field becomes too weak to give
//! a direction, when the next point would leave the drawing bounds, when it
//! would come too close to a charge (if a keep-clear radius is set), or after
//! `max_steps` steps.
//!
//! The seed itself is never part of the output and every returned point lies
//! inside the bounds.

use glam::DVec2;

use crate::evaluator::VectorField;
use crate::geometry::{Bounds, Polyline};

/// Weak-field cutoff for field lines, in N/C.
pub const FIELD_LINE_MIN_MAGNITUDE: f64 = 1e-4;

/// Weak-field cutoff for equipotentials, in N/C. Looser than the field-line
/// cutoff because the perpendicular direction is unstable near field nulls.
pub const EQUIPOTENTIAL_MIN_MAGNITUDE: f64 = 1e-3;

/// Equipotentials stop this close to a charge center, in display units.
pub const EQUIPOTENTIAL_STOP_RADIUS: f64 = 18.0;

/// Termination conditions for one trace.
#[derive(Debug, Clone, Copy)]
pub struct StopRules<'a> {
    pub bounds: Bounds,
    pub min_magnitude: f64,
    /// Centers the trace must not approach.
    pub keep_clear: &'a [DVec2],
    pub keep_clear_radius: f64,
}

impl<'a> StopRules<'a> {
    /// Rules for field lines: weak-field and off-bounds stops only.
    pub fn field_line(bounds: Bounds) -> Self {
        Self {
            bounds,
            min_magnitude: FIELD_LINE_MIN_MAGNITUDE,
            keep_clear: &[],
            keep_clear_radius: 0.0,
        }
    }

    /// Rules for equipotentials: also stop near any of `charges`.
    pub fn equipotential(bounds: Bounds, charges: &'a [DVec2]) -> Self {
        Self {
            bounds,
            min_magnitude: EQUIPOTENTIAL_MIN_MAGNITUDE,
            keep_clear: charges,
            keep_clear_radius: EQUIPOTENTIAL_STOP_RADIUS,
        }
    }

    fn halts_at(&self, p: DVec2) -> bool {
        !self.bounds.contains(p) || near_any(p, self.keep_clear, self.keep_clear_radius)
    }
}

/// Traces one direction from `seed`. At most `max_steps` points are returned.
pub fn trace<F: VectorField>(
    field: &F,
    seed: DVec2,
    step: f64,
    max_steps: usize,
    rules: &StopRules<'_>,
) -> Vec<DVec2> {
    let mut points = Vec::new();
    let mut p = seed;

    for _ in 0..max_steps {
        let v = field.sample(p);
        let mag = v.length();
        if mag.is_nan() || mag < rules.min_magnitude {
            break;
        }
        p += v / mag * step;
        if rules.halts_at(p) {
            break;
        }
        points.push(p);
    }

    points
}

/// Traces both ways from `seed` and joins the halves into one curve:
/// the backward half reversed, followed by the forward half.
pub fn trace_bidirectional<F: VectorField>(
    field: &F,
    seed: DVec2,
    step: f64,
    max_steps: usize,
    rules: &StopRules<'_>,
) -> Polyline {
    let forward = trace(field, seed, step.abs(), max_steps, rules);
    let mut points = trace(field, seed, -step.abs(), max_steps, rules);
    points.reverse();
    points.extend(forward);
    Polyline::new(points)
}

/// Whether `p` lies strictly within `radius` of any of `centers`.
pub fn near_any(p: DVec2, centers: &[DVec2], radius: f64) -> bool {
    let r2 = radius * radius;
    centers.iter().any(|c| c.distance_squared(p) < r2)
}

//! Electric field and potential of a set of point charges.
//!
//! Positions are in display units; every distance is divided by the
//! [`Scale`] before the Coulomb law is applied, so results are in N/C and
//! volts. A charge exactly coincident with the query point contributes
//! nothing, which keeps the sums finite everywhere.

use glam::DVec2;

use crate::charge::ChargeStore;
use crate::config::Scale;

/// Coulomb constant in N·m²/C².
pub const COULOMB_K: f64 = 8.99e9;

/// A 2D vector field sampled at display-space points.
///
/// The curve tracer is generic over this trait so the same integrator can
/// follow the electric field or the direction perpendicular to it.
pub trait VectorField {
    fn sample(&self, point: DVec2) -> DVec2;
}

/// Evaluates field and potential from a borrowed charge set.
///
/// Borrowing the store for the evaluator's lifetime keeps the charge set
/// read-only for a whole redraw pass.
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator<'a> {
    charges: &'a ChargeStore,
    scale: Scale,
}

impl<'a> FieldEvaluator<'a> {
    pub fn new(charges: &'a ChargeStore, scale: Scale) -> Self {
        Self { charges, scale }
    }

    pub fn charges(&self) -> &'a ChargeStore {
        self.charges
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Electric field vector (Ex, Ey) in N/C at `point`.
    pub fn field_at(&self, point: DVec2) -> DVec2 {
        self.charges
            .iter()
            .filter_map(|c| {
                let d = self.physical_offset(c.position(), point);
                let r2 = d.length_squared();
                if r2 == 0.0 {
                    return None;
                }
                let r = r2.sqrt();
                Some(d / r * (COULOMB_K * c.signed_magnitude() / r2))
            })
            .fold(DVec2::ZERO, |acc, e| acc + e)
    }

    /// Electric potential in volts at `point`.
    pub fn potential_at(&self, point: DVec2) -> f64 {
        self.charges
            .iter()
            .filter_map(|c| {
                let r = self.physical_offset(c.position(), point).length();
                (r != 0.0).then(|| COULOMB_K * c.signed_magnitude() / r)
            })
            .sum()
    }

    /// Vector from `from` to `to` in physical units.
    fn physical_offset(&self, from: DVec2, to: DVec2) -> DVec2 {
        (to - from) / f64::from(self.scale.pixels_per_unit())
    }
}

impl VectorField for FieldEvaluator<'_> {
    fn sample(&self, point: DVec2) -> DVec2 {
        self.field_at(point)
    }
}

/// Rotates another field by +90°: `(x, y) -> (-y, x)`.
///
/// Following this field traces a level set of the potential, since the
/// rotated direction is orthogonal to the potential gradient.
#[derive(Debug, Clone, Copy)]
pub struct Perpendicular<F>(pub F);

impl<F: VectorField> VectorField for Perpendicular<F> {
    fn sample(&self, point: DVec2) -> DVec2 {
        self.0.sample(point).perp()
    }
}

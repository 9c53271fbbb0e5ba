//! Point charges and the store that owns them.
//!
//! A [`ChargeStore`] is a flat, insertion-ordered arena keyed by
//! [`ChargeId`]. Ids are assigned monotonically starting at 1 and are never
//! reused, even after removal or [`ChargeStore::clear`]. Later charges are
//! drawn on top of earlier ones, so hit-testing prefers the most recent.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Magnitude given to newly placed charges, in coulombs.
pub const DEFAULT_MAGNITUDE: f64 = 1e-6;

/// Hit-test radius around a charge center, in display units.
pub const PICK_RADIUS: f64 = 15.0;

/// Smallest and largest exponent accepted for scientific-notation entry.
const EXPONENT_RANGE: std::ops::RangeInclusive<i32> = -12..=12;

/// Stable identity of a charge. Displays as `q{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeId(u64);

impl ChargeId {
    /// Wraps a raw id. Only the store hands out ids for live charges.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The underlying integer.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Polarity of a charge, stored apart from its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `+1.0` or `-1.0`.
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    /// The opposite polarity.
    pub fn flipped(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// A point charge placed in display space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charge {
    id: ChargeId,
    position: DVec2,
    sign: Sign,
    magnitude: f64,
}

impl Charge {
    pub fn id(&self) -> ChargeId {
        self.id
    }

    /// Center in display units.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Unsigned magnitude in coulombs, always finite and positive.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Charge in coulombs with its sign applied.
    pub fn signed_magnitude(&self) -> f64 {
        self.sign.factor() * self.magnitude
    }
}

/// Insertion-ordered collection of charges with removal by identity.
#[derive(Debug, Clone)]
pub struct ChargeStore {
    charges: Vec<Charge>,
    next_id: u64,
}

impl Default for ChargeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargeStore {
    /// Creates an empty store whose first id will be `q1`.
    pub fn new() -> Self {
        Self {
            charges: Vec::new(),
            next_id: 1,
        }
    }

    /// Places a new charge and returns its fresh id.
    ///
    /// Returns `FieldError::NonFinitePosition` or `FieldError::InvalidMagnitude`
    /// without consuming an id when the input is rejected.
    pub fn add(
        &mut self,
        position: DVec2,
        sign: Sign,
        magnitude: f64,
    ) -> Result<ChargeId, FieldError> {
        check_position(position)?;
        check_magnitude(magnitude)?;
        let id = ChargeId(self.next_id);
        self.next_id += 1;
        self.charges.push(Charge {
            id,
            position,
            sign,
            magnitude,
        });
        Ok(id)
    }

    /// Removes a charge, returning it.
    pub fn remove(&mut self, id: ChargeId) -> Result<Charge, FieldError> {
        let idx = self.index_of(id)?;
        Ok(self.charges.remove(idx))
    }

    /// Moves a charge to `position`.
    pub fn set_position(&mut self, id: ChargeId, position: DVec2) -> Result<(), FieldError> {
        check_position(position)?;
        let idx = self.index_of(id)?;
        self.charges[idx].position = position;
        Ok(())
    }

    /// Replaces a charge's unsigned magnitude. The sign is untouched.
    pub fn set_magnitude(&mut self, id: ChargeId, magnitude: f64) -> Result<(), FieldError> {
        check_magnitude(magnitude)?;
        let idx = self.index_of(id)?;
        self.charges[idx].magnitude = magnitude;
        Ok(())
    }

    /// Inverts a charge's polarity, keeping its magnitude.
    pub fn flip_sign(&mut self, id: ChargeId) -> Result<(), FieldError> {
        let idx = self.index_of(id)?;
        let charge = &mut self.charges[idx];
        charge.sign = charge.sign.flipped();
        Ok(())
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    /// Charges in insertion order (bottom to top).
    pub fn iter(&self) -> impl Iterator<Item = &Charge> + '_ {
        self.charges.iter()
    }

    /// Charge centers in insertion order.
    pub fn positions(&self) -> Vec<DVec2> {
        self.charges.iter().map(|c| c.position).collect()
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Removes every charge. Id assignment continues where it left off.
    pub fn clear(&mut self) {
        self.charges.clear();
    }

    /// Topmost charge whose center lies strictly within `radius` of `point`.
    pub fn pick(&self, point: DVec2, radius: f64) -> Option<ChargeId> {
        self.charges
            .iter()
            .rev()
            .find(|c| c.position.distance(point) < radius)
            .map(|c| c.id)
    }

    fn index_of(&self, id: ChargeId) -> Result<usize, FieldError> {
        self.charges
            .iter()
            .position(|c| c.id == id)
            .ok_or(FieldError::UnknownCharge(id))
    }
}

/// The charge currently targeted by a drag or edit gesture.
///
/// Holds only an id; the charge itself stays owned by the store and is
/// looked up on every use, so a removed target simply resolves to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    target: Option<ChargeId>,
}

impl Selection {
    /// Selects the topmost charge under `point`, or clears the selection.
    pub fn grab(&mut self, store: &ChargeStore, point: DVec2) -> Option<ChargeId> {
        self.target = store.pick(point, PICK_RADIUS);
        self.target
    }

    pub fn release(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<ChargeId> {
        self.target
    }

    /// Looks the target up in `store`.
    pub fn resolve<'a>(&self, store: &'a ChargeStore) -> Option<&'a Charge> {
        self.target.and_then(|id| store.get(id))
    }

    /// Moves the selected charge, if it still exists. Returns whether a
    /// charge was moved.
    pub fn drag_to(&self, store: &mut ChargeStore, point: DVec2) -> Result<bool, FieldError> {
        match self.target {
            Some(id) if store.get(id).is_some() => {
                store.set_position(id, point)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Builds a magnitude from `mantissa × 10^exponent`.
///
/// The mantissa must be finite and positive; the exponent must lie in
/// [-12, 12].
pub fn magnitude_from_scientific(mantissa: f64, exponent: i32) -> Result<f64, FieldError> {
    if !EXPONENT_RANGE.contains(&exponent) {
        return Err(FieldError::InvalidExponent(exponent));
    }
    check_magnitude(mantissa)?;
    let magnitude = mantissa * 10f64.powi(exponent);
    check_magnitude(magnitude)?;
    Ok(magnitude)
}

/// Splits a positive magnitude into `(mantissa, exponent)` with the mantissa
/// in [1, 10).
pub fn to_scientific(magnitude: f64) -> (f64, i32) {
    let abs = magnitude.abs();
    if abs == 0.0 || !abs.is_finite() {
        return (abs, 0);
    }
    let mut exponent = abs.log10().floor() as i32;
    let mut mantissa = abs / 10f64.powi(exponent);
    // log10 rounding can land one decade off near exact powers of ten
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    } else if mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }
    (mantissa, exponent)
}

fn check_position(position: DVec2) -> Result<(), FieldError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(FieldError::NonFinitePosition {
            x: position.x,
            y: position.y,
        })
    }
}

fn check_magnitude(magnitude: f64) -> Result<(), FieldError> {
    if magnitude.is_finite() && magnitude > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidMagnitude(magnitude))
    }
}

//! Seed placement on rings around each charge.
//!
//! Field lines start on a small ring whose seed count grows linearly with
//! the field-line density. Equipotentials start on a wider ring of fixed
//! candidate angles, thinned by an angular skip that shrinks as density
//! grows; candidates that start too close to any charge are dropped.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::charge::ChargeStore;
use crate::config::Density;
use crate::tracer::near_any;

/// Ring radius for field-line seeds, in display units.
pub const FIELD_LINE_SEED_RADIUS: f64 = 20.0;

/// Field lines per charge at the lowest density.
pub const MIN_FIELD_LINES: usize = 4;

const FIELD_LINES_PER_LEVEL: usize = 4;

/// Candidate angles per charge before thinning.
pub const EQUIPOTENTIAL_CANDIDATES: usize = 24;

/// Ring radius for equipotential seeds, in display units.
pub const EQUIPOTENTIAL_SEED_RADIUS: f64 = 40.0;

/// Candidates closer than this to any charge are discarded. Must exceed
/// the tracer's equipotential stop radius.
pub const EQUIPOTENTIAL_SEED_CLEARANCE: f64 = 20.0;

/// Field-line seeds per charge: `max(4, 4 × density)`.
pub fn field_line_count(density: Density) -> usize {
    (density.level() as usize * FIELD_LINES_PER_LEVEL).max(MIN_FIELD_LINES)
}

/// Keep every `skip`-th equipotential candidate: `max(1, 11 - density)`.
pub fn angular_skip(density: Density) -> usize {
    11_usize.saturating_sub(density.level() as usize).max(1)
}

/// Integration step for equipotentials; sparse settings take longer strides.
pub fn equipotential_step(density: Density) -> f64 {
    match density.level() {
        0..=3 => 12.0,
        4..=6 => 10.0,
        _ => 8.0,
    }
}

/// `count` points evenly spaced on a circle, starting at angle zero.
pub fn ring(center: DVec2, radius: f64, count: usize) -> impl Iterator<Item = DVec2> {
    (0..count).map(move |i| {
        let angle = i as f64 / count as f64 * TAU;
        center + DVec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Field-line seeds for every charge, grouped by charge in store order.
pub fn field_line_seeds(store: &ChargeStore, density: Density) -> Vec<DVec2> {
    let count = field_line_count(density);
    store
        .iter()
        .flat_map(|c| ring(c.position(), FIELD_LINE_SEED_RADIUS, count))
        .collect()
}

/// Equipotential seeds for every charge, thinned by [`angular_skip`] and
/// cleared of candidates that sit near any charge.
pub fn equipotential_seeds(store: &ChargeStore, density: Density) -> Vec<DVec2> {
    let skip = angular_skip(density);
    let centers = store.positions();
    store
        .iter()
        .flat_map(|c| {
            ring(c.position(), EQUIPOTENTIAL_SEED_RADIUS, EQUIPOTENTIAL_CANDIDATES).step_by(skip)
        })
        .filter(|seed| !near_any(*seed, &centers, EQUIPOTENTIAL_SEED_CLEARANCE))
        .collect()
}

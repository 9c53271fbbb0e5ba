//! Geometry producers: field lines and equipotentials for a whole charge set.
//!
//! Each call recomputes everything from the current store. Per-frame cost
//! is bounded by the step caps below and, for equipotentials, by a global
//! curve cap that holds regardless of charge count or density.

use crate::charge::ChargeStore;
use crate::config::FieldConfig;
use crate::evaluator::{FieldEvaluator, Perpendicular};
use crate::geometry::{Bounds, Polyline};
use crate::seeding::{equipotential_seeds, equipotential_step, field_line_seeds};
use crate::tracer::{trace_bidirectional, StopRules};

/// Field-line step length in display units.
pub const FIELD_LINE_STEP: f64 = 8.0;

/// Field-line step cap per direction.
pub const FIELD_LINE_MAX_STEPS: usize = 2000;

/// Equipotential step cap per direction.
pub const EQUIPOTENTIAL_MAX_STEPS: usize = 1400;

/// Equipotentials shorter than this many points are dropped.
pub const MIN_EQUIPOTENTIAL_POINTS: usize = 6;

/// Upper bound on equipotential curves per call.
pub const MAX_EQUIPOTENTIAL_CURVES: usize = 120;

/// One bidirectional field line per seed; traces with fewer than two points
/// carry no direction and are dropped.
pub fn trace_field_lines(
    store: &ChargeStore,
    config: &FieldConfig,
    bounds: Bounds,
) -> Vec<Polyline> {
    let eval = FieldEvaluator::new(store, config.scale);
    let rules = StopRules::field_line(bounds);
    field_line_seeds(store, config.field_density)
        .into_iter()
        .map(|seed| trace_bidirectional(&eval, seed, FIELD_LINE_STEP, FIELD_LINE_MAX_STEPS, &rules))
        .filter(|line| line.len() >= 2)
        .collect()
}

/// Equipotential curves traced perpendicular to the field from ring seeds,
/// at most [`MAX_EQUIPOTENTIAL_CURVES`] of them.
pub fn trace_equipotentials(
    store: &ChargeStore,
    config: &FieldConfig,
    bounds: Bounds,
) -> Vec<Polyline> {
    let iso = Perpendicular(FieldEvaluator::new(store, config.scale));
    let centers = store.positions();
    let rules = StopRules::equipotential(bounds, &centers);
    let step = equipotential_step(config.equipotential_density);
    equipotential_seeds(store, config.equipotential_density)
        .into_iter()
        .map(|seed| trace_bidirectional(&iso, seed, step, EQUIPOTENTIAL_MAX_STEPS, &rules))
        .filter(|curve| curve.len() >= MIN_EQUIPOTENTIAL_POINTS)
        .take(MAX_EQUIPOTENTIAL_CURVES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::Sign;
    use crate::config::Density;
    use glam::DVec2;

    fn bounds() -> Bounds {
        Bounds::new(600.0, 400.0).unwrap()
    }

    fn dipole() -> ChargeStore {
        let mut store = ChargeStore::new();
        store.add(DVec2::new(200.0, 200.0), Sign::Positive, 1e-6).unwrap();
        store.add(DVec2::new(400.0, 200.0), Sign::Negative, 1e-6).unwrap();
        store
    }

    #[test]
    fn empty_store_produces_no_geometry() {
        let store = ChargeStore::new();
        let config = FieldConfig::default();
        assert!(trace_field_lines(&store, &config, bounds()).is_empty());
        assert!(trace_equipotentials(&store, &config, bounds()).is_empty());
    }

    #[test]
    fn field_lines_one_per_seed_for_dipole() {
        let store = dipole();
        let config = FieldConfig::default();
        let lines = trace_field_lines(&store, &config, bounds());
        assert_eq!(lines.len(), 2 * 16);
        for line in &lines {
            assert!(line.len() >= 2);
            assert!(line.len() <= 2 * FIELD_LINE_MAX_STEPS);
            assert!(line.points().iter().all(|p| bounds().contains(*p)));
        }
    }

    #[test]
    fn field_line_count_tracks_density() {
        let store = dipole();
        let sparse = FieldConfig {
            field_density: Density::MIN,
            ..FieldConfig::default()
        };
        let dense = FieldConfig {
            field_density: Density::MAX,
            ..FieldConfig::default()
        };
        let n_sparse = trace_field_lines(&store, &sparse, bounds()).len();
        let n_dense = trace_field_lines(&store, &dense, bounds()).len();
        assert_eq!(n_sparse, 2 * 4);
        assert_eq!(n_dense, 2 * 40);
    }

    #[test]
    fn equipotentials_are_long_enough_and_avoid_charges() {
        let store = dipole();
        let config = FieldConfig {
            equipotential_density: Density::MAX,
            ..FieldConfig::default()
        };
        let curves = trace_equipotentials(&store, &config, bounds());
        assert!(!curves.is_empty());
        let centers = store.positions();
        for curve in &curves {
            assert!(curve.len() >= MIN_EQUIPOTENTIAL_POINTS);
            assert!(curve.len() <= 2 * EQUIPOTENTIAL_MAX_STEPS);
            for p in curve.points() {
                assert!(centers.iter().all(|c| c.distance(*p) >= 18.0));
            }
        }
    }

    #[test]
    fn equipotential_count_is_capped() {
        let mut store = ChargeStore::new();
        for i in 0..8 {
            for j in 0..4 {
                let sign = if (i + j) % 2 == 0 {
                    Sign::Positive
                } else {
                    Sign::Negative
                };
                let p = DVec2::new(60.0 + 70.0 * f64::from(i), 60.0 + 90.0 * f64::from(j));
                store.add(p, sign, 1e-6).unwrap();
            }
        }
        let config = FieldConfig {
            equipotential_density: Density::MAX,
            ..FieldConfig::default()
        };
        let curves = trace_equipotentials(&store, &config, bounds());
        assert!(curves.len() <= MAX_EQUIPOTENTIAL_CURVES);
    }
}

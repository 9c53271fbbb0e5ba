#![deny(unsafe_code)]
//! Core electrostatics engine for the charge-field sandbox.
//!
//! Holds point charges in a [`ChargeStore`], evaluates their field and
//! potential with a [`FieldEvaluator`], traces field lines and
//! equipotentials with a fixed-step Euler integrator, and samples the
//! potential on a grid for heatmaps and the zero-potential contour.
//!
//! Nothing here draws, stores UI state, or persists anything: callers pass
//! a [`FieldConfig`] and drawing [`Bounds`] in and get plain geometry back.

pub mod charge;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod lines;
pub mod params;
pub mod sampler;
pub mod seeding;
pub mod tracer;

pub use charge::{Charge, ChargeId, ChargeStore, Selection, Sign};
pub use config::{Density, FieldConfig, Scale};
pub use error::FieldError;
pub use evaluator::{FieldEvaluator, Perpendicular, VectorField, COULOMB_K};
pub use geometry::{Bounds, Polyline, Segment};
pub use lines::{trace_equipotentials, trace_field_lines};
pub use sampler::{sample_heatmap, trace_zero_contour, HeatColor, Heatmap};

/// Re-exported so callers can build positions without naming glam directly.
pub use glam::DVec2;

//! Grid sampling of the potential: heatmap values, their color mapping, and
//! the zero-potential contour.
//!
//! Samples sit on a lattice of `stride`-spaced points `(i·s, j·s)` strictly
//! inside the drawing bounds. The zero contour treats neighbouring lattice
//! points as the corners of a cell and linearly interpolates sign changes
//! along each edge. Fragments are emitted per cell and are not stitched into
//! longer polylines.

use glam::DVec2;
use serde::Serialize;

use crate::config::Scale;
use crate::error::FieldError;
use crate::evaluator::FieldEvaluator;
use crate::geometry::{Bounds, Segment};

/// Heatmap stride used by the sandbox, in display units.
pub const DEFAULT_STRIDE: usize = 6;

/// Heatmap overlay opacity.
pub const HEAT_ALPHA: f64 = 0.4;

/// Constant green channel that keeps the overlay off pure black.
pub const HEAT_GREEN: u8 = 60;

const MIN_COLOR_CAP: f64 = 1e3;
const COLOR_CAP_PER_CHARGE: f64 = 5e5;

/// Potential samples on a row-major `cols × rows` lattice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    stride: usize,
    cols: usize,
    rows: usize,
    values: Vec<f64>,
}

impl Heatmap {
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major sample values in volts.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample at a lattice index, or `None` outside the lattice.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        (col < self.cols && row < self.rows).then(|| self.at(col, row))
    }

    fn at(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Display-space position of a lattice point.
    pub fn origin(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new((col * self.stride) as f64, (row * self.stride) as f64)
    }

    /// Iterates `(origin, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| {
            let col = i % self.cols;
            let row = i / self.cols;
            (self.origin(col, row), v)
        })
    }

    /// Zero-potential contour fragments, one or two per crossed cell.
    pub fn zero_contour(&self) -> Vec<Segment> {
        let s = self.stride as f64;
        let mut segments = Vec::new();
        for row in 0..self.rows.saturating_sub(1) {
            for col in 0..self.cols.saturating_sub(1) {
                let corners = [
                    self.at(col, row),
                    self.at(col + 1, row),
                    self.at(col + 1, row + 1),
                    self.at(col, row + 1),
                ];
                cell_segments(self.origin(col, row), s, corners, &mut segments);
            }
        }
        segments
    }
}

/// Samples `potential_at` on the stride lattice covering `bounds`.
///
/// Returns `FieldError::InvalidStride` when `stride` is zero.
pub fn sample_heatmap(
    eval: &FieldEvaluator<'_>,
    bounds: Bounds,
    stride: usize,
) -> Result<Heatmap, FieldError> {
    if stride == 0 {
        return Err(FieldError::InvalidStride);
    }
    let s = stride as f64;
    let cols = (bounds.width() / s).ceil() as usize;
    let rows = (bounds.height() / s).ceil() as usize;
    let values = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .map(|(col, row)| eval.potential_at(DVec2::new(col as f64 * s, row as f64 * s)))
        .collect();
    Ok(Heatmap {
        stride,
        cols,
        rows,
        values,
    })
}

/// Samples the lattice and extracts the zero-potential contour.
pub fn trace_zero_contour(
    eval: &FieldEvaluator<'_>,
    bounds: Bounds,
    stride: usize,
) -> Result<Vec<Segment>, FieldError> {
    Ok(sample_heatmap(eval, bounds, stride)?.zero_contour())
}

/// Appends the contour fragments of one cell.
///
/// `corners` are ordered top-left, top-right, bottom-right, bottom-left, so
/// walking consecutive pairs visits the top, right, bottom and left edges.
/// A corner at exactly zero counts as non-positive.
fn cell_segments(origin: DVec2, s: f64, corners: [f64; 4], out: &mut Vec<Segment>) {
    if corners.iter().all(|&v| v > 0.0) || corners.iter().all(|&v| v < 0.0) {
        return;
    }
    let offsets = [
        DVec2::new(0.0, 0.0),
        DVec2::new(s, 0.0),
        DVec2::new(s, s),
        DVec2::new(0.0, s),
    ];
    let crossings: Vec<DVec2> = (0..4)
        .filter_map(|i| {
            let j = (i + 1) % 4;
            let (va, vb) = (corners[i], corners[j]);
            if (va > 0.0) == (vb > 0.0) {
                return None;
            }
            let t = zero_fraction(va, vb);
            Some(origin + offsets[i].lerp(offsets[j], t))
        })
        .collect();
    out.extend(
        crossings
            .chunks_exact(2)
            .map(|pair| Segment::new(pair[0], pair[1])),
    );
}

/// Fraction of the way from `a` to `b` where a linear interpolant crosses zero.
fn zero_fraction(a: f64, b: f64) -> f64 {
    let total = a.abs() + b.abs();
    if total == 0.0 {
        0.5
    } else {
        a.abs() / total
    }
}

/// Heuristic saturation level for the heatmap: grows with the number of
/// charges and shrinks with the scale, never below 1000 V.
pub fn color_cap(charge_count: usize, scale: Scale) -> f64 {
    (COLOR_CAP_PER_CHARGE * charge_count as f64 / f64::from(scale.pixels_per_unit()))
        .max(MIN_COLOR_CAP)
}

/// Overlay color for one heatmap sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

/// Maps a potential to an overlay color: positive toward red, negative
/// toward blue, saturating at `±cap`.
pub fn heat_color(v: f64, cap: f64) -> HeatColor {
    let norm = if v.is_nan() { 0.0 } else { v.clamp(-cap, cap) / cap };
    HeatColor {
        red: (255.0 * norm.max(0.0)).round() as u8,
        green: HEAT_GREEN,
        blue: (255.0 * (-norm).max(0.0)).round() as u8,
        alpha: HEAT_ALPHA,
    }
}

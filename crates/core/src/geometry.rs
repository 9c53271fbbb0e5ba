//! Drawing bounds and the geometric output handed to renderers.

use glam::DVec2;
use serde::Serialize;

use crate::error::FieldError;

/// The drawing area in display units, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Returns `FieldError::InvalidDimensions` unless both extents are finite
    /// and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, FieldError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(FieldError::InvalidDimensions)
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// An ordered run of points approximating a traced curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<DVec2>,
}

impl Polyline {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of segment lengths.
    pub fn arc_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

impl From<Vec<DVec2>> for Polyline {
    fn from(points: Vec<DVec2>) -> Self {
        Self::new(points)
    }
}

/// A straight contour fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }
}

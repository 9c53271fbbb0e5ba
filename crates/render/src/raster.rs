//! Minimal RGBA8 software rasterizer.
//!
//! Display units map one-to-one onto pixels, with `(0, 0)` at the top-left
//! corner and y growing downward. Every draw call blends source-over onto
//! an opaque buffer, so the alpha channel stays at 255.

use charge_field_core::{Bounds, DVec2, FieldError};

use crate::color::{Rgba, BACKGROUND};

/// Row-major RGBA8 pixel buffer, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Creates an opaque black raster.
    ///
    /// Returns `FieldError::InvalidDimensions` if either side is zero or the
    /// buffer size overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            data: vec![0; len],
        };
        raster.fill(BACKGROUND);
        Ok(raster)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Drawing bounds matching the pixel extent.
    pub fn bounds(&self) -> Result<Bounds, FieldError> {
        Bounds::new(self.width as f64, self.height as f64)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrites every pixel with `color`, ignoring its alpha.
    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Blends `color` over every pixel whose area intersects the rectangle.
    pub fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        let Some((x0, x1)) = span(origin.x, origin.x + size.x, self.width) else {
            return;
        };
        let Some((y0, y1)) = span(origin.y, origin.y + size.y, self.height) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    /// One-pixel line between two points, stepped along the major axis.
    pub fn draw_line(&mut self, from: DVec2, to: DVec2, color: Rgba) {
        if !from.is_finite() || !to.is_finite() {
            return;
        }
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
        // Lines far outside the raster would otherwise walk millions of steps.
        if steps > 4.0 * (self.width + self.height) as f64 {
            return;
        }
        let n = steps as usize;
        for i in 0..=n {
            let p = from.lerp(to, i as f64 / steps);
            self.plot(p, color);
        }
    }

    /// Connects consecutive points with [`Raster::draw_line`].
    pub fn draw_polyline(&mut self, points: &[DVec2], color: Rgba) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
    }

    /// Fills every pixel whose center lies within `radius` of `center`.
    pub fn fill_disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if !center.is_finite() || radius.is_nan() || radius <= 0.0 {
            return;
        }
        let Some((x0, x1)) = span(center.x - radius, center.x + radius, self.width) else {
            return;
        };
        let Some((y0, y1)) = span(center.y - radius, center.y + radius, self.height) else {
            return;
        };
        let r2 = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let c = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if c.distance_squared(center) <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn plot(&mut self, p: DVec2, color: Rgba) {
        let (x, y) = (p.x.floor(), p.y.floor());
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return;
        }
        self.blend(x as usize, y as usize, color);
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * 4;
        let a = color.a.clamp(0.0, 1.0);
        for (dst, src) in self.data[i..i + 3].iter_mut().zip([color.r, color.g, color.b]) {
            let mixed = f64::from(src) * a + f64::from(*dst) * (1.0 - a);
            *dst = mixed.round() as u8;
        }
        self.data[i + 3] = 255;
    }
}

/// Pixel index range `[lo, hi)` covering `[start, end)` clipped to `0..limit`.
fn span(start: f64, end: f64, limit: usize) -> Option<(usize, usize)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let lo = start.floor().max(0.0);
    let hi = end.ceil().min(limit as f64);
    (lo < hi).then(|| (lo as usize, hi as usize))
}

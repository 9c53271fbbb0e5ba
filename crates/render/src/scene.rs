//! Composes a full sandbox frame from core geometry.

use charge_field_core::params::param_bool;
use charge_field_core::sampler::{color_cap, heat_color, DEFAULT_STRIDE};
use charge_field_core::{
    sample_heatmap, trace_equipotentials, trace_field_lines, Bounds, ChargeStore, DVec2,
    FieldConfig, FieldEvaluator, Segment,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::color::{Rgba, Theme};
use crate::error::RenderError;
use crate::raster::Raster;

/// Display radius of a drawn charge.
pub const CHARGE_RADIUS: f64 = 14.0;

/// Arc length between consecutive arrowheads on a field line.
pub const ARROW_SPACING: f64 = 100.0;

/// Length of each arrowhead stroke.
pub const ARROW_SIZE: f64 = 6.0;

const ARROW_HALF_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// Which optional overlays to draw. Charges are always drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layers {
    pub field_lines: bool,
    pub equipotentials: bool,
    pub heatmap: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            field_lines: true,
            equipotentials: true,
            heatmap: false,
        }
    }
}

impl Layers {
    /// Reads the three toggles from a JSON object, defaulting missing keys.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            field_lines: param_bool(params, "field_lines", defaults.field_lines),
            equipotentials: param_bool(params, "equipotentials", defaults.equipotentials),
            heatmap: param_bool(params, "heatmap", defaults.heatmap),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "field_lines": self.field_lines,
            "equipotentials": self.equipotentials,
            "heatmap": self.heatmap,
        })
    }
}

/// Arrowhead strokes along a polyline.
///
/// Arc length accumulates per segment; once it exceeds `spacing` it resets
/// and an arrowhead is placed at the segment's end, pointing along the
/// segment. Each arrowhead is two strokes from the tip back at ±30°.
pub fn arrow_strokes(points: &[DVec2], spacing: f64, size: f64) -> Vec<Segment> {
    let mut strokes = Vec::new();
    let mut travelled = 0.0;
    for pair in points.windows(2) {
        let (prev, tip) = (pair[0], pair[1]);
        let d = tip - prev;
        travelled += d.length();
        if travelled > spacing {
            travelled = 0.0;
            let angle = d.y.atan2(d.x);
            for theta in [angle - ARROW_HALF_ANGLE, angle + ARROW_HALF_ANGLE] {
                let back = DVec2::new(theta.cos(), theta.sin()) * size;
                strokes.push(Segment::new(tip, tip - back));
            }
        }
    }
    strokes
}

/// Draws one frame into a new raster sized to `bounds`.
///
/// Layer order: background, heatmap with its zero contour,
/// equipotentials, field lines with arrowheads, then the charges. Overlays
/// are skipped when the store is empty.
pub fn render_scene(
    store: &ChargeStore,
    config: &FieldConfig,
    layers: Layers,
    theme: &Theme,
    bounds: Bounds,
) -> Result<Raster, RenderError> {
    let mut raster = Raster::new(
        bounds.width().ceil() as usize,
        bounds.height().ceil() as usize,
    )?;
    raster.fill(theme.background);

    if !store.is_empty() {
        if layers.heatmap {
            draw_heatmap(&mut raster, store, config, theme, bounds)?;
        }
        if layers.equipotentials {
            for curve in trace_equipotentials(store, config, bounds) {
                raster.draw_polyline(curve.points(), theme.equipotential);
            }
        }
        if layers.field_lines {
            for line in trace_field_lines(store, config, bounds) {
                raster.draw_polyline(line.points(), theme.field_line);
                for stroke in arrow_strokes(line.points(), ARROW_SPACING, ARROW_SIZE) {
                    raster.draw_line(stroke.start, stroke.end, theme.arrow);
                }
            }
        }
    }

    for charge in store.iter() {
        raster.fill_disc(charge.position(), CHARGE_RADIUS, theme.charge(charge.sign()));
    }
    Ok(raster)
}

fn draw_heatmap(
    raster: &mut Raster,
    store: &ChargeStore,
    config: &FieldConfig,
    theme: &Theme,
    bounds: Bounds,
) -> Result<(), RenderError> {
    let eval = FieldEvaluator::new(store, config.scale);
    let heatmap = sample_heatmap(&eval, bounds, DEFAULT_STRIDE)?;
    let cap = color_cap(store.len(), config.scale);
    let cell = DVec2::splat(heatmap.stride() as f64);
    for (origin, v) in heatmap.iter() {
        raster.fill_rect(origin, cell, Rgba::from(heat_color(v, cap)));
    }
    for seg in heatmap.zero_contour() {
        raster.draw_line(seg.start, seg.end, theme.zero_contour);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use charge_field_core::Sign;

    fn bounds(w: f64, h: f64) -> Bounds {
        Bounds::new(w, h).unwrap()
    }

    fn render(store: &ChargeStore, layers: Layers) -> Raster {
        let config = FieldConfig::default();
        render_scene(store, &config, layers, &Theme::default(), bounds(400.0, 200.0)).unwrap()
    }

    fn dipole() -> ChargeStore {
        let mut store = ChargeStore::new();
        store
            .add(DVec2::new(100.0, 100.0), Sign::Positive, 1e-6)
            .unwrap();
        store
            .add(DVec2::new(300.0, 100.0), Sign::Negative, 1e-6)
            .unwrap();
        store
    }

    #[test]
    fn layers_default_matches_sandbox_startup() {
        let layers = Layers::default();
        assert!(layers.field_lines);
        assert!(layers.equipotentials);
        assert!(!layers.heatmap);
    }

    #[test]
    fn layers_from_json_reads_toggles() {
        let layers = Layers::from_json(&json!({"heatmap": true, "field_lines": false}));
        assert!(!layers.field_lines);
        assert!(layers.equipotentials);
        assert!(layers.heatmap);
        assert_eq!(Layers::from_json(&layers.to_json()), layers);
    }

    #[test]
    fn layers_from_json_ignores_wrong_types() {
        let layers = Layers::from_json(&json!({"heatmap": "yes"}));
        assert_eq!(layers, Layers::default());
    }

    #[test]
    fn arrows_on_short_line_are_absent() {
        let points = [DVec2::ZERO, DVec2::new(50.0, 0.0)];
        assert!(arrow_strokes(&points, ARROW_SPACING, ARROW_SIZE).is_empty());
    }

    #[test]
    fn arrows_point_back_along_travel() {
        let points: Vec<DVec2> = (0..=30).map(|i| DVec2::new(i as f64 * 8.0, 0.0)).collect();
        let strokes = arrow_strokes(&points, ARROW_SPACING, ARROW_SIZE);
        // 240 units of travel, reset after 104: arrows at x = 104 and x = 208.
        assert_eq!(strokes.len(), 4);
        assert!((strokes[0].start.x - 104.0).abs() < 1e-9);
        assert!((strokes[2].start.x - 208.0).abs() < 1e-9);
        for s in &strokes {
            let back = s.end - s.start;
            assert!((back.length() - ARROW_SIZE).abs() < 1e-9);
            assert!(back.x < 0.0, "arrowhead should trail the tip");
            assert!((back.y.abs() - ARROW_SIZE * 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_store_renders_black_frame() {
        let raster = render_scene(
            &ChargeStore::new(),
            &FieldConfig::default(),
            Layers {
                heatmap: true,
                ..Layers::default()
            },
            &Theme::default(),
            bounds(40.0, 30.0),
        )
        .unwrap();
        assert_eq!(raster.width(), 40);
        assert_eq!(raster.height(), 30);
        assert!(raster.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn charges_are_drawn_on_top() {
        let store = dipole();
        let raster = render_scene(
            &store,
            &FieldConfig::default(),
            Layers::default(),
            &Theme::default(),
            bounds(400.0, 200.0),
        )
        .unwrap();
        assert_eq!(raster.pixel(100, 100), Some([0xff, 0x44, 0x44, 255]));
        assert_eq!(raster.pixel(300, 100), Some([0x44, 0x88, 0xff, 255]));
    }

    #[test]
    fn theme_recolors_background_and_charges() {
        let store = dipole();
        let theme = Theme::from_json(&json!({"background": "#202020", "negative": "#00ff00"}))
            .unwrap();
        let layers = Layers {
            field_lines: false,
            equipotentials: false,
            heatmap: false,
        };
        let config = FieldConfig::default();
        let raster = render_scene(&store, &config, layers, &theme, bounds(400.0, 200.0)).unwrap();
        assert_eq!(raster.pixel(0, 0), Some([0x20, 0x20, 0x20, 255]));
        assert_eq!(raster.pixel(300, 100), Some([0, 255, 0, 255]));
        assert_eq!(raster.pixel(100, 100), Some([0xff, 0x44, 0x44, 255]));
    }

    #[test]
    fn field_lines_leave_marks_between_charges() {
        let store = dipole();
        let layers = Layers {
            field_lines: true,
            equipotentials: false,
            heatmap: false,
        };
        let raster = render(&store, layers);
        // The axis line runs straight from one charge to the other.
        let lit = (130..270).any(|x| raster.pixel(x, 100) != Some([0, 0, 0, 255]));
        assert!(lit);
    }

    #[test]
    fn heatmap_tints_positive_side_red() {
        let store = dipole();
        let layers = Layers {
            field_lines: false,
            equipotentials: false,
            heatmap: true,
        };
        let raster = render(&store, layers);
        let [r, _, b, _] = raster.pixel(60, 40).unwrap();
        assert!(r > b, "expected red tint, got r={r} b={b}");
        let [r, _, b, _] = raster.pixel(340, 40).unwrap();
        assert!(b > r, "expected blue tint, got r={r} b={b}");
    }

    #[test]
    fn heatmap_draws_zero_contour_on_bisector() {
        let store = dipole();
        let layers = Layers {
            field_lines: false,
            equipotentials: false,
            heatmap: true,
        };
        let raster = render(&store, layers);
        let neon = (190..=210).any(|x| raster.pixel(x, 40) == Some([0, 255, 100, 255]));
        assert!(neon, "zero contour missing near x = 200");
    }
}

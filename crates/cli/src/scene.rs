//! JSON scene files.
//!
//! ```json
//! {
//!   "width": 800, "height": 600,
//!   "pixels_per_unit": 100, "field_density": 4, "equipotential_density": 4,
//!   "layers": { "field_lines": true, "equipotentials": true, "heatmap": false },
//!   "colors": { "background": "#101018", "positive": "#ff8800" },
//!   "charges": [ { "x": 300, "y": 300, "sign": "positive", "magnitude": 2e-6 } ]
//! }
//! ```
//!
//! Config keys and layer toggles are lenient (missing means default). Color
//! overrides must be hex strings. The charge list is strict: every entry
//! needs `x`, `y` and `sign`.

use std::path::Path;

use charge_field_core::charge::DEFAULT_MAGNITUDE;
use charge_field_core::{Bounds, ChargeStore, DVec2, FieldConfig, Sign};
use charge_field_render::{Layers, Theme};
use serde::Deserialize;
use serde_json::Value;

use crate::error::CliError;

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

/// Largest accepted canvas side, in display units.
pub const MAX_EXTENT: f64 = 16384.0;

/// A loaded, validated scene.
pub struct Scene {
    pub bounds: Bounds,
    pub config: FieldConfig,
    pub layers: Layers,
    pub theme: Theme,
    pub store: ChargeStore,
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default)]
    charges: Vec<ChargeEntry>,
}

#[derive(Deserialize)]
struct ChargeEntry {
    x: f64,
    y: f64,
    sign: Sign,
    #[serde(default = "default_magnitude")]
    magnitude: f64,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_magnitude() -> f64 {
    DEFAULT_MAGNITUDE
}

/// Parses and validates a scene from JSON text.
pub fn parse_scene(text: &str) -> Result<Scene, CliError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CliError::Input(format!("invalid scene JSON: {e}")))?;
    let file = SceneFile::deserialize(&value)
        .map_err(|e| CliError::Input(format!("invalid scene: {e}")))?;

    if file.width > MAX_EXTENT || file.height > MAX_EXTENT {
        return Err(CliError::Input(format!(
            "canvas {}x{} exceeds the maximum side of {MAX_EXTENT}",
            file.width, file.height
        )));
    }

    let config = FieldConfig::from_json(&value)?;
    let layers = Layers::from_json(value.get("layers").unwrap_or(&Value::Null));
    let theme = Theme::from_json(value.get("colors").unwrap_or(&Value::Null))?;
    let bounds = Bounds::new(file.width, file.height)?;

    let mut store = ChargeStore::new();
    for entry in &file.charges {
        store.add(DVec2::new(entry.x, entry.y), entry.sign, entry.magnitude)?;
    }

    Ok(Scene {
        bounds,
        config,
        layers,
        theme,
        store,
    })
}

/// Reads and parses a scene file.
pub fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse_scene(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scene_uses_defaults() {
        let scene = parse_scene("{}").unwrap();
        assert_eq!(scene.bounds.width(), DEFAULT_WIDTH);
        assert_eq!(scene.bounds.height(), DEFAULT_HEIGHT);
        assert_eq!(scene.config, FieldConfig::default());
        assert_eq!(scene.layers, Layers::default());
        assert_eq!(scene.theme, Theme::default());
        assert!(scene.store.is_empty());
    }

    #[test]
    fn charges_load_in_order_with_default_magnitude() {
        let scene = parse_scene(
            r#"{"charges": [
                {"x": 10, "y": 20, "sign": "positive"},
                {"x": 30, "y": 40, "sign": "negative", "magnitude": 3e-6}
            ]}"#,
        )
        .unwrap();
        let charges: Vec<_> = scene.store.iter().collect();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].position(), DVec2::new(10.0, 20.0));
        assert_eq!(charges[0].magnitude(), DEFAULT_MAGNITUDE);
        assert_eq!(charges[1].sign(), Sign::Negative);
        assert_eq!(charges[1].magnitude(), 3e-6);
    }

    #[test]
    fn config_and_layers_are_read() {
        let scene = parse_scene(
            r#"{"pixels_per_unit": 50, "field_density": 2,
                "layers": {"heatmap": true, "equipotentials": false}}"#,
        )
        .unwrap();
        assert_eq!(scene.config.scale.pixels_per_unit(), 50);
        assert_eq!(scene.config.field_density.level(), 2);
        assert!(scene.layers.heatmap);
        assert!(!scene.layers.equipotentials);
    }

    #[test]
    fn colors_override_theme() {
        let scene = parse_scene(r##"{"colors": {"background": "#102030"}}"##).unwrap();
        assert_eq!(scene.theme.background.r, 0x10);
        assert_eq!(scene.theme.background.b, 0x30);
        assert_eq!(scene.theme.positive, Theme::default().positive);
    }

    #[test]
    fn bad_color_is_input_error() {
        let err = parse_scene(r##"{"colors": {"arrow": "#xyz"}}"##).err().unwrap();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn malformed_json_is_input_error() {
        let err = parse_scene("{not json").err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn unknown_sign_is_input_error() {
        let err = parse_scene(r#"{"charges": [{"x": 0, "y": 0, "sign": "neutral"}]}"#)
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn out_of_range_scale_is_field_error() {
        let err = parse_scene(r#"{"pixels_per_unit": 9000}"#).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn non_positive_magnitude_is_field_error() {
        let text = r#"{"charges": [{"x": 0, "y": 0, "sign": "positive", "magnitude": 0}]}"#;
        let err = parse_scene(text).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn zero_width_is_field_error() {
        let err = parse_scene(r#"{"width": 0}"#).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn oversized_canvas_is_input_error() {
        let err = parse_scene(r#"{"width": 1e8, "height": 1e8}"#).err().unwrap();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("maximum"));
        let err = parse_scene(r#"{"width": 100, "height": 16385}"#).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn canvas_at_maximum_side_is_accepted() {
        let scene = parse_scene(r#"{"width": 16384, "height": 16384}"#).unwrap();
        assert_eq!(scene.bounds.width(), MAX_EXTENT);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene(&dir.path().join("absent.json")).err().unwrap();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn load_scene_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 200, "height": 100}"#).unwrap();
        let scene = load_scene(&path).unwrap();
        assert_eq!(scene.bounds.width(), 200.0);
    }
}

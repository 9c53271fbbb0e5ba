//! Validated tuning parameters threaded into every evaluator, tracer and
//! sampler call.
//!
//! Nothing here is global: a [`FieldConfig`] is built by the caller and
//! passed by reference. Range checks happen once, at construction.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FieldError;
use crate::params::param_u64;

const MIN_SCALE: u32 = 1;
const MAX_SCALE: u32 = 500;
const DEFAULT_SCALE: u32 = 100;

const MIN_DENSITY: u32 = 1;
const MAX_DENSITY: u32 = 10;
const DEFAULT_DENSITY: u32 = 4;

/// Display units per physical unit (pixels per meter), in [1, 500].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Scale(u32);

impl Scale {
    pub fn new(pixels_per_unit: u32) -> Result<Self, FieldError> {
        if (MIN_SCALE..=MAX_SCALE).contains(&pixels_per_unit) {
            Ok(Self(pixels_per_unit))
        } else {
            Err(FieldError::ScaleOutOfRange(pixels_per_unit))
        }
    }

    pub fn pixels_per_unit(self) -> u32 {
        self.0
    }

    /// Converts a display-space length to physical units.
    pub fn to_physical(self, display: f64) -> f64 {
        display / f64::from(self.0)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

impl TryFrom<u32> for Scale {
    type Error = FieldError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scale> for u32 {
    fn from(scale: Scale) -> u32 {
        scale.0
    }
}

/// A 1 (sparse) to 10 (dense) line-density control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Density(u32);

impl Density {
    pub const MIN: Density = Density(MIN_DENSITY);
    pub const MAX: Density = Density(MAX_DENSITY);

    pub fn new(level: u32) -> Result<Self, FieldError> {
        if (MIN_DENSITY..=MAX_DENSITY).contains(&level) {
            Ok(Self(level))
        } else {
            Err(FieldError::DensityOutOfRange(level))
        }
    }

    pub fn level(self) -> u32 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(DEFAULT_DENSITY)
    }
}

impl TryFrom<u32> for Density {
    type Error = FieldError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Density> for u32 {
    fn from(density: Density) -> u32 {
        density.0
    }
}

/// Scale and density settings for one redraw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub scale: Scale,
    pub field_density: Density,
    pub equipotential_density: Density,
}

impl FieldConfig {
    /// Reads `pixels_per_unit`, `field_density` and `equipotential_density`
    /// from a JSON object.
    ///
    /// Missing or non-integer keys take their defaults; integers outside the
    /// allowed range are errors.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        Ok(Self {
            scale: Scale::new(read_u32(params, "pixels_per_unit", DEFAULT_SCALE))?,
            field_density: Density::new(read_u32(params, "field_density", DEFAULT_DENSITY))?,
            equipotential_density: Density::new(read_u32(
                params,
                "equipotential_density",
                DEFAULT_DENSITY,
            ))?,
        })
    }

    /// Current values as a JSON object, the inverse of [`FieldConfig::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "pixels_per_unit": self.scale.pixels_per_unit(),
            "field_density": self.field_density.level(),
            "equipotential_density": self.equipotential_density.level(),
        })
    }

    /// Schema describing each key's type, range and default.
    pub fn schema() -> Value {
        json!({
            "pixels_per_unit": {
                "type": "integer",
                "default": DEFAULT_SCALE,
                "min": MIN_SCALE,
                "max": MAX_SCALE,
                "description": "Display units per physical unit (pixels per meter)"
            },
            "field_density": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": MIN_DENSITY,
                "max": MAX_DENSITY,
                "description": "Field lines per charge, in steps of four"
            },
            "equipotential_density": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": MIN_DENSITY,
                "max": MAX_DENSITY,
                "description": "Equipotential seeding density around each charge"
            }
        })
    }
}

/// Saturates to `u32::MAX` so oversized values still fail the range check.
fn read_u32(params: &Value, name: &str, default: u32) -> u32 {
    let raw = param_u64(params, name, u64::from(default));
    u32::try_from(raw).unwrap_or(u32::MAX)
}

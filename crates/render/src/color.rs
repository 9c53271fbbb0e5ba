//! Straight-alpha RGBA colors and the sandbox's fixed color scheme.

use charge_field_core::{HeatColor, Sign};
use serde_json::Value;

use crate::error::RenderError;

/// An 8-bit RGB color with a floating-point opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive) as an opaque color.
    pub fn from_hex(hex: &str) -> Result<Self, RenderError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(RenderError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| RenderError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Self::opaque(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Same color with a different opacity, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<HeatColor> for Rgba {
    fn from(c: HeatColor) -> Self {
        Self::new(c.red, c.green, c.blue, c.alpha)
    }
}

pub const BACKGROUND: Rgba = Rgba::opaque(0, 0, 0);
pub const FIELD_LINE: Rgba = Rgba::new(255, 180, 80, 0.7);
pub const ARROW: Rgba = Rgba::new(255, 255, 255, 0.8);
pub const EQUIPOTENTIAL: Rgba = Rgba::new(90, 190, 255, 0.45);
pub const ZERO_CONTOUR: Rgba = Rgba::opaque(0, 255, 100);
pub const POSITIVE_CHARGE: Rgba = Rgba::opaque(0xff, 0x44, 0x44);
pub const NEGATIVE_CHARGE: Rgba = Rgba::opaque(0x44, 0x88, 0xff);

/// Colors for every element of a frame.
///
/// Overrides are given as hex strings; each keeps the opacity of the
/// element's default color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub field_line: Rgba,
    pub arrow: Rgba,
    pub equipotential: Rgba,
    pub zero_contour: Rgba,
    pub positive: Rgba,
    pub negative: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            field_line: FIELD_LINE,
            arrow: ARROW,
            equipotential: EQUIPOTENTIAL,
            zero_contour: ZERO_CONTOUR,
            positive: POSITIVE_CHARGE,
            negative: NEGATIVE_CHARGE,
        }
    }
}

impl Theme {
    /// Reads hex overrides from a JSON object. Missing or null keys keep
    /// their defaults; anything other than a valid hex string is an error.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        let d = Self::default();
        Ok(Self {
            background: hex_override(params, "background", d.background)?,
            field_line: hex_override(params, "field_line", d.field_line)?,
            arrow: hex_override(params, "arrow", d.arrow)?,
            equipotential: hex_override(params, "equipotential", d.equipotential)?,
            zero_contour: hex_override(params, "zero_contour", d.zero_contour)?,
            positive: hex_override(params, "positive", d.positive)?,
            negative: hex_override(params, "negative", d.negative)?,
        })
    }

    /// Disc color for a charge of the given polarity.
    pub fn charge(&self, sign: Sign) -> Rgba {
        match sign {
            Sign::Positive => self.positive,
            Sign::Negative => self.negative,
        }
    }
}

fn hex_override(params: &Value, name: &str, default: Rgba) -> Result<Rgba, RenderError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(hex)) => Ok(Rgba::from_hex(hex)?.with_alpha(default.a)),
        Some(other) => Err(RenderError::InvalidColor(format!(
            "{name}: expected a hex string, got {other}"
        ))),
    }
}

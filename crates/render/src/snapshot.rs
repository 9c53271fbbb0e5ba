//! PNG output for a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so the rasterizer can be used
//! without pulling in the `image` crate.

use std::path::Path;

use charge_field_core::FieldError;

use crate::error::RenderError;
use crate::raster::Raster;

/// Writes a raster as an 8-bit RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `RenderError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), RenderError> {
    let w = u32::try_from(raster.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| RenderError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| RenderError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::POSITIVE_CHARGE;
    use charge_field_core::DVec2;

    #[test]
    fn write_png_round_trip() {
        let mut raster = Raster::new(32, 16).unwrap();
        raster.fill_disc(DVec2::new(8.0, 8.0), 4.0, POSITIVE_CHARGE);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(8, 8).0, [0xff, 0x44, 0x44, 255]);
        assert_eq!(img.get_pixel(31, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn write_png_into_missing_directory_is_io_error() {
        let raster = Raster::new(4, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.png");
        assert!(matches!(write_png(&raster, &path), Err(RenderError::Io(_))));
    }
}

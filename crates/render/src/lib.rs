#![deny(unsafe_code)]
//! CPU-side rendering of charge-field scenes.
//!
//! Turns the geometry produced by `charge-field-core` into an RGBA8
//! [`Raster`] using the sandbox's layer order and colors, and optionally
//! writes it as a PNG (`png` feature, on by default).

pub mod color;
pub mod error;
pub mod raster;
pub mod scene;

#[cfg(feature = "png")]
pub mod snapshot;

pub use color::{Rgba, Theme};
pub use error::RenderError;
pub use raster::Raster;
pub use scene::{arrow_strokes, render_scene, Layers};

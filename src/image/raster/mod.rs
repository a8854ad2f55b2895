//! SVG rasterization backends.
//!
//! Every backend turns SVG markup into a square RGBA buffer. The source is
//! scaled to cover the square and centered, so non-square artwork is
//! cropped on its long axis rather than letterboxed.

mod builtin;
mod magick;

pub use builtin::Builtin;
pub use magick::Magick;

use anyhow::Result;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Renders SVG markup into square RGBA buffers.
pub trait Rasterizer {
    /// Short backend name for log output.
    fn name(&self) -> &'static str;

    /// Render `svg` into a `size` x `size` buffer.
    fn render(&self, svg: &[u8], size: u32) -> Result<RgbaImage>;
}

/// SVG conversion backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Converter {
    /// Use built-in Rust libraries (resvg).
    #[default]
    Builtin,
    /// Use ImageMagick (`magick` command).
    Magick,
}

impl Converter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Magick => "magick",
        }
    }

    /// Acquire the backend.
    ///
    /// `magick` is the program looked up on `PATH` for [`Converter::Magick`];
    /// `dpi` is the density ImageMagick rasterizes at before resizing.
    pub fn rasterizer(
        &self,
        magick: &str,
        dpi: f32,
    ) -> Result<Box<dyn Rasterizer>, RasterizerUnavailable> {
        match self {
            Self::Builtin => Ok(Box::new(Builtin)),
            Self::Magick => Ok(Box::new(Magick::locate(magick, dpi)?)),
        }
    }
}

/// The selected backend cannot be used on this machine.
///
/// Raised before any file is written. `main` reports it as install
/// instructions instead of a failure.
#[derive(Debug, Error)]
#[error("`{program}` not found (required by the `{converter}` converter)")]
pub struct RasterizerUnavailable {
    pub converter: Converter,
    pub program: String,
}

impl std::fmt::Display for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Rasterization through ImageMagick.
//!
//! The SVG is piped to `magick` on stdin and a PNG is read back from stdout:
//!
//! ```text
//! magick -background none -density <dpi> svg:- \
//!        -resize <n>x<n>^ -gravity center -extent <n>x<n> png32:-
//! ```
//!
//! `-resize WxH^` fills the box and `-extent` crops the overflow, which
//! gives the same cover fit as the builtin backend.

use super::{Converter, Rasterizer, RasterizerUnavailable};
use crate::utils::exec::Cmd;
use anyhow::{Context, Result, ensure};
use image::{ImageFormat, RgbaImage};
use std::path::PathBuf;

/// ImageMagick backend bound to a resolved executable.
#[derive(Debug, Clone)]
pub struct Magick {
    program: PathBuf,
    dpi: f32,
}

impl Magick {
    /// Resolve `program` on `PATH`.
    pub fn locate(program: &str, dpi: f32) -> Result<Self, RasterizerUnavailable> {
        let program = which::which(program).map_err(|_| RasterizerUnavailable {
            converter: Converter::Magick,
            program: program.to_string(),
        })?;
        Ok(Self { program, dpi })
    }

    fn args(&self, size: u32) -> Vec<String> {
        let geometry = format!("{size}x{size}");
        vec![
            "-background".into(),
            "none".into(),
            "-density".into(),
            self.dpi.to_string(),
            "svg:-".into(),
            "-resize".into(),
            format!("{geometry}^"),
            "-gravity".into(),
            "center".into(),
            "-extent".into(),
            geometry,
            "png32:-".into(),
        ]
    }
}

impl Rasterizer for Magick {
    fn name(&self) -> &'static str {
        "magick"
    }

    fn render(&self, svg: &[u8], size: u32) -> Result<RgbaImage> {
        let output = Cmd::new(&self.program)
            .args(self.args(size))
            .stdin(svg)
            .run()
            .context("ImageMagick conversion failed")?;

        let img = image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .context("ImageMagick returned an unreadable PNG")?
            .to_rgba8();

        ensure!(
            img.dimensions() == (size, size),
            "ImageMagick returned {}x{} instead of {size}x{size}",
            img.width(),
            img.height()
        );
        Ok(img)
    }
}

//! Icon composition: maskable padding and PNG encoding.

use super::Rasterizer;
use crate::icon::{ACCENT, IconSpec};
use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use std::io::Cursor;

/// Render one icon of the set.
///
/// Maskable icons render the artwork at [`IconSpec::inner_size`] and
/// extend it with an [`ACCENT`] border of [`IconSpec::padding`] pixels.
/// Other icons render straight at the full size.
pub fn render_icon(
    rasterizer: &dyn Rasterizer,
    svg: &[u8],
    spec: &IconSpec,
) -> Result<RgbaImage> {
    if !spec.maskable {
        return rasterizer
            .render(svg, spec.size)
            .with_context(|| format!("Failed to render {}", spec.name));
    }

    let inner = rasterizer
        .render(svg, spec.inner_size())
        .with_context(|| format!("Failed to render {}", spec.name))?;
    Ok(extend(&inner, spec.padding(), ACCENT))
}

/// Add a solid `background` border of `padding` pixels on every side.
///
/// Pixels of `image` are copied as-is, transparent ones included; only the
/// new border is filled.
pub fn extend(image: &RgbaImage, padding: u32, background: Rgba<u8>) -> RgbaImage {
    let width = image.width() + 2 * padding;
    let height = image.height() + 2 * padding;

    let mut canvas = RgbaImage::from_pixel(width, height, background);
    imageops::replace(&mut canvas, image, i64::from(padding), i64::from(padding));
    canvas
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

//! Rasterization with `usvg` + `resvg` on a `tiny-skia` pixmap.
//!
//! `<text>` is shaped with the system fonts, loaded once per process.
//! Generic families (`serif`, `sans-serif`, `monospace`) that have no
//! installed match fall back to the first installed face.

use super::Rasterizer;
use anyhow::{Context, Result, bail};
use image::RgbaImage;
use quick_xml::{Reader, events::Event};
use std::sync::{Arc, LazyLock};
use tiny_skia::{Pixmap, Transform};
use usvg::fontdb::{Database, Family, Query};

/// usvg's family for text without a `font-family`.
const DEFAULT_FAMILY: &str = "Times New Roman";

struct SystemFonts {
    db: Arc<Database>,
    default_family: String,
}

static SYSTEM_FONTS: LazyLock<SystemFonts> = LazyLock::new(load_system_fonts);

fn load_system_fonts() -> SystemFonts {
    let mut db = Database::new();
    db.load_system_fonts();

    let fallback = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());

    let mut default_family = DEFAULT_FAMILY.to_string();
    if let Some(fallback) = fallback {
        if !has_family(&db, Family::Name(DEFAULT_FAMILY)) {
            default_family = fallback.clone();
        }
        if !has_family(&db, Family::Serif) {
            db.set_serif_family(fallback.clone());
        }
        if !has_family(&db, Family::SansSerif) {
            db.set_sans_serif_family(fallback.clone());
        }
        if !has_family(&db, Family::Monospace) {
            db.set_monospace_family(fallback);
        }
    }

    SystemFonts {
        db: Arc::new(db),
        default_family,
    }
}

fn has_family(db: &Database, family: Family<'_>) -> bool {
    let families = [family];
    db.query(&Query {
        families: &families,
        ..Query::default()
    })
    .is_some()
}

/// Whether the markup has a `<text>` element.
fn has_text(svg: &[u8]) -> bool {
    let mut reader = Reader::from_reader(svg);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"text" => {
                return true;
            }
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}

/// In-process renderer. Always available since it is linked statically.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtin;

impl Rasterizer for Builtin {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn render(&self, svg: &[u8], size: u32) -> Result<RgbaImage> {
        let fonts = &*SYSTEM_FONTS;
        if fonts.db.len() == 0 && has_text(svg) {
            bail!(
                "SVG contains <text> but no system fonts were found; \
                 install a font or convert the text to paths"
            );
        }

        let options = usvg::Options {
            font_family: fonts.default_family.clone(),
            fontdb: Arc::clone(&fonts.db),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_data(svg, &options).context("Failed to parse SVG")?;

        let mut pixmap = Pixmap::new(size, size)
            .with_context(|| format!("Failed to allocate {size}x{size} pixmap"))?;

        let transform = cover_transform(tree.size(), size)?;
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap_to_rgba(&pixmap)
    }
}

/// Scale the SVG viewport to cover a `size` square, centered.
#[allow(clippy::cast_precision_loss)]
fn cover_transform(svg_size: usvg::Size, size: u32) -> Result<Transform> {
    let (width, height) = (svg_size.width(), svg_size.height());
    if width <= 0.0 || height <= 0.0 {
        bail!("Invalid SVG dimensions: {width}x{height}");
    }

    let target = size as f32;
    let scale = (target / width).max(target / height);
    let tx = (target - width * scale) / 2.0;
    let ty = (target - height * scale) / 2.0;

    Ok(Transform::from_row(scale, 0.0, 0.0, scale, tx, ty))
}

/// Convert a premultiplied pixmap into straight-alpha RGBA.
fn pixmap_to_rgba(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .context("Pixmap buffer does not match its dimensions")
}

//! Icon generation.
//!
//! Reads the SVG source once, then renders every entry of
//! [`ICON_SET`] followed by the favicon, strictly in order. The first
//! failure aborts the run; files written before it stay on disk.

use crate::{
    config::IconGenConfig,
    debug,
    icon::{FAVICON, ICON_SET, IconSpec},
    image::{Rasterizer, RasterizerUnavailable, encode_png, render_icon},
    log, logger,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files written by a successful run, in write order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
}

/// Render the whole icon set described by `config`.
///
/// Fails with [`RasterizerUnavailable`] (inside the `anyhow` error) when the
/// configured converter cannot be used. That check happens after the source
/// is read and before anything is written.
pub fn generate_all(config: &IconGenConfig) -> Result<GenerateReport> {
    let source = config.source_path();
    let svg =
        fs::read(&source).with_context(|| format!("Failed to read `{}`", source.display()))?;
    debug!("icons"; "read {} ({} bytes)", source.display(), svg.len());

    let rasterizer = config
        .icons
        .converter
        .rasterizer(&config.icons.magick, config.icons.dpi)?;

    generate_with(rasterizer.as_ref(), &svg, &config.output_dir())
}

/// Render the icon set from in-memory SVG bytes into `output_dir`.
pub fn generate_with(
    rasterizer: &dyn Rasterizer,
    svg: &[u8],
    output_dir: &Path,
) -> Result<GenerateReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create `{}`", output_dir.display()))?;
    debug!("icons"; "rendering with the {} converter", rasterizer.name());

    let mut report = GenerateReport::default();

    for spec in ICON_SET {
        report.written.push(write_icon(rasterizer, svg, spec, output_dir)?);
        logger::success(&format!(
            "Generated {} ({}x{})",
            spec.name, spec.size, spec.size
        ));
    }

    report
        .written
        .push(write_icon(rasterizer, svg, &FAVICON, output_dir)?);
    logger::success(&format!("Generated {}", FAVICON.name));

    log!("done"; "All icons generated successfully!");
    Ok(report)
}

/// Render, encode and write one icon, replacing any existing file.
fn write_icon(
    rasterizer: &dyn Rasterizer,
    svg: &[u8],
    spec: &IconSpec,
    output_dir: &Path,
) -> Result<PathBuf> {
    let image = render_icon(rasterizer, svg, spec)?;
    let bytes = encode_png(&image).with_context(|| format!("Failed to encode {}", spec.name))?;

    let path = output_dir.join(spec.name);
    fs::write(&path, &bytes).with_context(|| format!("Failed to write `{}`", path.display()))?;
    debug!("icons"; "{} bytes -> {}", bytes.len(), path.display());
    Ok(path)
}

/// Instructions shown when the configured converter is missing.
pub fn install_instructions(missing: &RasterizerUnavailable) -> Vec<String> {
    vec![
        format!("ImageMagick not installed (`{}` not found).", missing.program),
        String::new(),
        "To generate PNG icons:".to_string(),
        format!(
            "  install ImageMagick and rerun `icongen --converter {}`",
            missing.converter
        ),
        "  or use the built-in renderer: `icongen --converter builtin`".to_string(),
        String::new(),
        "Or open generate-icons.html in a browser.".to_string(),
    ]
}

/// Print [`install_instructions`] to stdout.
pub fn report_unavailable(missing: &RasterizerUnavailable) {
    for line in install_instructions(missing) {
        logger::plain(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::IconsConfig,
        icon::{ACCENT, all_outputs},
        image::{Converter, raster::Builtin},
    };
    use image::ImageFormat;
    use tempfile::TempDir;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
        <rect width="64" height="64" fill="#ff0000"/>
        <circle cx="32" cy="32" r="16" fill="#ffffff"/>
    </svg>"##;

    /// Project with `icons/icon.svg` and a config rooted at it.
    fn project(converter: Converter, magick: &str) -> (TempDir, IconGenConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/icon.svg"), ICON_SVG).unwrap();

        let config = IconGenConfig {
            root: dir.path().to_path_buf(),
            icons: IconsConfig {
                converter,
                magick: magick.to_string(),
                ..IconsConfig::default()
            },
        };
        (dir, config)
    }

    fn png_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .filter(|name| name != "icon.svg")
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[test]
    fn writes_exactly_the_icon_set() {
        let (dir, config) = project(Converter::Builtin, "magick");
        let report = generate_all(&config).unwrap();

        let mut expected: Vec<_> = all_outputs().map(|s| s.name.to_string()).collect();
        expected.sort();
        assert_eq!(png_files(&dir.path().join("icons")), expected);
        assert_eq!(report.written.len(), 7);
        assert_eq!(report.written.last(), Some(&dir.path().join("icons/favicon.ico")));
    }

    #[test]
    fn outputs_have_declared_dimensions() {
        let (dir, config) = project(Converter::Builtin, "magick");
        generate_all(&config).unwrap();

        for spec in all_outputs() {
            // decode as PNG regardless of extension; favicon.ico holds PNG data
            let bytes = fs::read(dir.path().join("icons").join(spec.name)).unwrap();
            let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
                .unwrap_or_else(|e| panic!("{} is not a PNG: {e}", spec.name));
            assert_eq!(
                (img.width(), img.height()),
                (spec.size, spec.size),
                "{}",
                spec.name
            );
        }
    }

    #[test]
    fn maskable_outputs_have_accent_border() {
        let (dir, config) = project(Converter::Builtin, "magick");
        generate_all(&config).unwrap();

        for spec in ICON_SET.iter().filter(|s| s.maskable) {
            let img = image::open(dir.path().join("icons").join(spec.name))
                .unwrap()
                .to_rgba8();
            let pad = spec.padding();
            let last = spec.size - 1;
            for (x, y) in [(0, 0), (last, last), (pad - 1, spec.size / 2), (last - pad + 1, 0)] {
                assert_eq!(*img.get_pixel(x, y), ACCENT, "{} ({x}, {y})", spec.name);
            }
            // red corner of the artwork
            assert_eq!(img.get_pixel(pad, pad).0, [255, 0, 0, 255], "{}", spec.name);
        }
    }

    #[test]
    fn plain_outputs_have_no_accent() {
        let (dir, config) = project(Converter::Builtin, "magick");
        generate_all(&config).unwrap();

        let img = image::open(dir.path().join("icons/Icon-512.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert!(img.pixels().all(|p| *p != ACCENT));
    }

    #[test]
    fn favicon_ico_is_png_encoded() {
        let (dir, config) = project(Converter::Builtin, "magick");
        generate_all(&config).unwrap();

        let bytes = fs::read(dir.path().join("icons/favicon.ico")).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));
        // same render as the 32px favicon
        assert_eq!(bytes, fs::read(dir.path().join("icons/favicon-32x32.png")).unwrap());
    }

    #[test]
    fn reruns_are_byte_identical() {
        let (dir, config) = project(Converter::Builtin, "magick");
        generate_all(&config).unwrap();
        let first: Vec<_> = all_outputs()
            .map(|s| fs::read(dir.path().join("icons").join(s.name)).unwrap())
            .collect();

        generate_all(&config).unwrap();
        let second: Vec<_> = all_outputs()
            .map(|s| fs::read(dir.path().join("icons").join(s.name)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn overwrites_existing_files() {
        let (dir, config) = project(Converter::Builtin, "magick");
        let stale = dir.path().join("icons/Icon-192.png");
        fs::write(&stale, b"stale").unwrap();

        generate_all(&config).unwrap();
        assert!(fs::read(&stale).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("web/icons");
        generate_with(&Builtin, ICON_SVG.as_bytes(), &output).unwrap();
        assert_eq!(png_files(&output).len(), 7);
    }

    #[test]
    fn missing_source_writes_nothing() {
        let (dir, config) = project(Converter::Builtin, "magick");
        fs::remove_file(dir.path().join("icons/icon.svg")).unwrap();

        let err = generate_all(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert!(png_files(&dir.path().join("icons")).is_empty());
    }

    #[test]
    fn unavailable_converter_writes_nothing() {
        let (dir, config) = project(Converter::Magick, "icongen-no-such-magick");

        let err = generate_all(&config).unwrap_err();
        let missing = err
            .downcast_ref::<RasterizerUnavailable>()
            .expect("missing converter must be reported as unavailable");
        assert_eq!(missing.program, "icongen-no-such-magick");
        assert!(png_files(&dir.path().join("icons")).is_empty());
    }

    #[test]
    fn malformed_svg_aborts() {
        let (dir, config) = project(Converter::Builtin, "magick");
        fs::write(dir.path().join("icons/icon.svg"), "<svg").unwrap();

        let err = generate_all(&config).unwrap_err();
        assert!(err.downcast_ref::<RasterizerUnavailable>().is_none());
        assert!(format!("{err:#}").contains("favicon-16x16.png"));
    }

    #[test]
    fn instructions_mention_both_fallbacks() {
        let missing = RasterizerUnavailable {
            converter: Converter::Magick,
            program: "magick".to_string(),
        };
        let text = install_instructions(&missing).join("\n");
        assert!(text.starts_with("ImageMagick not installed"));
        assert!(text.contains("icongen --converter magick"));
        assert!(text.contains("icongen --converter builtin"));
        assert!(text.contains("generate-icons.html"));
    }
}

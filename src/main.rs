//! icongen - PWA icons and favicons from a single SVG.

mod cli;
mod config;
mod icon;
mod image;
mod logger;
mod utils;

use crate::image::RasterizerUnavailable;
use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{
    Cli,
    generate::{generate_all, report_unavailable},
};
use config::IconGenConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = IconGenConfig::load(&cli)?;

    match generate_all(&config) {
        Ok(report) => {
            debug!("done"; "{} files in {}", report.written.len(), config.output_dir().display());
            Ok(())
        }
        // A missing converter is reported, not failed on.
        Err(err) => match err.downcast_ref::<RasterizerUnavailable>() {
            Some(missing) => {
                report_unavailable(missing);
                Ok(())
            }
            None => Err(err),
        },
    }
}

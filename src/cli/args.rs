//! Command-line interface definitions.

use crate::image::Converter;
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Generate PWA icons and favicons from a single SVG
///
/// Without arguments, renders `icons/icon.svg` into the `icons/` directory.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: icongen.toml, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// SVG source file (default: icons/icon.svg)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output directory (default: icons)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Rasterization backend
    #[arg(long, value_enum)]
    pub converter: Option<Converter>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

//! Image processing utilities.
//!
//! # Modules
//!
//! - [`raster`]: SVG rasterization backends (builtin resvg, ImageMagick)
//! - [`compose`]: maskable padding and PNG encoding
//!
//! # Architecture
//!
//! ```text
//! SVG bytes + IconSpec
//!         │
//!         ▼
//!    ┌────────┐
//!    │ raster │ ──► RGBA buffer at inner size (builtin/magick)
//!    └───┬────┘
//!        │
//!        ▼
//!    ┌─────────┐
//!    │ compose │ ──► accent border for maskable icons, PNG bytes
//!    └─────────┘
//! ```

pub mod compose;
pub mod raster;

pub use compose::{encode_png, render_icon};
pub use raster::{Converter, Rasterizer, RasterizerUnavailable};

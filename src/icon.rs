//! The fixed icon set generated from the SVG source.
//!
//! | file                    | size | maskable |
//! |-------------------------|------|----------|
//! | `favicon-16x16.png`     | 16   |          |
//! | `favicon-32x32.png`     | 32   |          |
//! | `Icon-192.png`          | 192  |          |
//! | `Icon-512.png`          | 512  |          |
//! | `Icon-maskable-192.png` | 192  | yes      |
//! | `Icon-maskable-512.png` | 512  | yes      |
//! | `favicon.ico`           | 32   |          |
//!
//! `favicon.ico` holds PNG bytes. Browsers accept PNG data behind an
//! `.ico` name, and the file is kept that way on purpose.

use image::Rgba;

/// Background painted around maskable icons (Tailwind `blue-500`).
pub const ACCENT: Rgba<u8> = Rgba([59, 130, 246, 255]);

/// One output file of the icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    /// File name inside the output directory.
    pub name: &'static str,
    /// Width and height of the output in pixels.
    pub size: u32,
    /// Render with a safe-area border on an [`ACCENT`] background.
    pub maskable: bool,
}

impl IconSpec {
    const fn plain(name: &'static str, size: u32) -> Self {
        Self {
            name,
            size,
            maskable: false,
        }
    }

    const fn maskable(name: &'static str, size: u32) -> Self {
        Self {
            name,
            size,
            maskable: true,
        }
    }

    /// Border width on each side: 10% of the size (rounded down) for
    /// maskable icons, zero otherwise.
    pub const fn padding(&self) -> u32 {
        if self.maskable { self.size / 10 } else { 0 }
    }

    /// Edge length of the rendered artwork inside the padding.
    pub const fn inner_size(&self) -> u32 {
        self.size - 2 * self.padding()
    }
}

/// PNG outputs, rendered in this order.
pub const ICON_SET: &[IconSpec] = &[
    IconSpec::plain("favicon-16x16.png", 16),
    IconSpec::plain("favicon-32x32.png", 32),
    IconSpec::plain("Icon-192.png", 192),
    IconSpec::plain("Icon-512.png", 512),
    IconSpec::maskable("Icon-maskable-192.png", 192),
    IconSpec::maskable("Icon-maskable-512.png", 512),
];

/// Rendered after [`ICON_SET`].
pub const FAVICON: IconSpec = IconSpec::plain("favicon.ico", 32);

/// Every file a successful run writes, in write order.
pub fn all_outputs() -> impl Iterator<Item = &'static IconSpec> {
    ICON_SET.iter().chain(std::iter::once(&FAVICON))
}

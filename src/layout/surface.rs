//! Drawing capability injected into the compositor and the guide renderer
//!
//! Layout and guide code only talk to [`Surface`], so their geometry can be
//! exercised against a recording implementation without any pixels.
//! [`RasterSurface`] is the in-memory RGBA implementation used for real output.

use crate::layout::geometry::CellRect;
use image::{Rgba, RgbaImage};

/// Axis-aligned one pixel wide line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Horizontal segment at row `y` covering `x0..=x1`
    Horizontal {
        /// Row of the segment
        y: u32,
        /// First column (inclusive)
        x0: u32,
        /// Last column (inclusive)
        x1: u32,
    },
    /// Vertical segment at column `x` covering `y0..=y1`
    Vertical {
        /// Column of the segment
        x: u32,
        /// First row (inclusive)
        y0: u32,
        /// Last row (inclusive)
        y1: u32,
    },
}

/// Minimal set of drawing primitives
///
/// Implementations clip everything to their bounds; drawing outside is a
/// silent no-op.
pub trait Surface {
    /// Surface size as `(width, height)`
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Rgba<u8>);

    /// Fill `rect` with `color`
    fn fill_rect(&mut self, rect: CellRect, color: Rgba<u8>);

    /// Draw a one pixel line
    fn draw_line(&mut self, line: Line, color: Rgba<u8>);

    /// Alpha-blend `image` with its top-left corner at `(x, y)`
    fn draw_image(&mut self, image: &RgbaImage, x: u32, y: u32);

    /// Outline `rect` with one pixel lines on its inner edge
    fn stroke_rect(&mut self, rect: CellRect, color: Rgba<u8>) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }

        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        self.draw_line(
            Line::Horizontal {
                y: rect.y,
                x0: rect.x,
                x1: right,
            },
            color,
        );
        self.draw_line(
            Line::Horizontal {
                y: bottom,
                x0: rect.x,
                x1: right,
            },
            color,
        );
        self.draw_line(
            Line::Vertical {
                x: rect.x,
                y0: rect.y,
                y1: bottom,
            },
            color,
        );
        self.draw_line(
            Line::Vertical {
                x: right,
                y0: rect.y,
                y1: bottom,
            },
            color,
        );
    }
}

/// In-memory RGBA drawing surface
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Borrow the pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take ownership of the pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = color;
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn fill_rect(&mut self, rect: CellRect, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        for y in rect.y..rect.bottom().min(height) {
            for x in rect.x..rect.right().min(width) {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn draw_line(&mut self, line: Line, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        match line {
            Line::Horizontal { y, x0, x1 } => {
                for x in x0..=x1.min(width.saturating_sub(1)) {
                    self.set_pixel(x, y, color);
                }
            }
            Line::Vertical { x, y0, y1 } => {
                for y in y0..=y1.min(height.saturating_sub(1)) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: u32, y: u32) {
        image::imageops::overlay(&mut self.image, image, i64::from(x), i64::from(y));
    }
}

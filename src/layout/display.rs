//! Mapping of composite coordinates onto the working canvas
//!
//! Results and guides are shown scaled to fit the viewport but never enlarged,
//! and centred. The mapping is computed separately from the composite so that
//! displaying a result never touches its pixels.

use crate::io::configuration::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::io::error::{GridError, invalid_input};
use crate::layout::geometry::CellRect;
use std::fmt;
use std::str::FromStr;

/// Size of the working canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .to_ascii_lowercase()
            .split_once('x')
            .map(|(w, h)| (w.trim().parse::<u32>(), h.trim().parse::<u32>()))
            .ok_or_else(|| invalid_input(&format!("viewport '{s}' must look like WIDTHxHEIGHT")))?;

        match (width, height) {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok(Self { width, height }),
            _ => Err(invalid_input(&format!(
                "viewport '{s}' needs two positive integers"
            ))),
        }
    }
}

/// Scaled and centred position of content on the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPlacement {
    /// Left edge on the viewport
    pub x: u32,
    /// Top edge on the viewport
    pub y: u32,
    /// Displayed width
    pub width: u32,
    /// Displayed height
    pub height: u32,
    /// Scale from content to viewport pixels, at most 1
    pub scale: f64,
}

impl DisplayPlacement {
    /// Fit content of the given size into `viewport`
    ///
    /// Returns `None` when either the content or the viewport is empty.
    pub fn fit(viewport: Viewport, content_width: u32, content_height: u32) -> Option<Self> {
        if content_width == 0 || content_height == 0 || viewport.width == 0 || viewport.height == 0
        {
            return None;
        }

        let scale = (f64::from(viewport.width) / f64::from(content_width))
            .min(f64::from(viewport.height) / f64::from(content_height))
            .min(1.0);

        // Flooring keeps the displayed size inside the viewport
        let width = ((f64::from(content_width) * scale).floor() as u32).clamp(1, viewport.width);
        let height =
            ((f64::from(content_height) * scale).floor() as u32).clamp(1, viewport.height);

        Some(Self {
            x: (viewport.width - width) / 2,
            y: (viewport.height - height) / 2,
            width,
            height,
            scale,
        })
    }

    /// Viewport x coordinate of a content x coordinate
    pub fn map_x(&self, x: f64) -> f64 {
        f64::from(self.x) + x * self.scale
    }

    /// Viewport y coordinate of a content y coordinate
    pub fn map_y(&self, y: f64) -> f64 {
        f64::from(self.y) + y * self.scale
    }

    /// Viewport rectangle covering a content rectangle
    pub fn map_rect(&self, rect: CellRect) -> CellRect {
        let left = self.map_x(f64::from(rect.x)).floor() as u32;
        let top = self.map_y(f64::from(rect.y)).floor() as u32;
        let right = (self.map_x(f64::from(rect.right())).floor() as u32).min(self.x + self.width);
        let bottom = (self.map_y(f64::from(rect.bottom())).floor() as u32).min(self.y + self.height);

        CellRect {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Rectangle occupied on the viewport
    pub const fn frame(&self) -> CellRect {
        CellRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

//! Grid parameters and their text representation
//!
//! A [`ParameterSet`] is produced fresh by [`parser::parse`] on every edit and
//! never mutated afterwards. Its canonical text form (see
//! [`ParameterSet::stringify`]) parses back to an equal set.

/// Background colour directive handling
pub mod color;
/// Free-text parameter parsing with per-field defaults
pub mod parser;

pub use parser::{DEFAULT_STRING, parse};

use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_COLUMNS,
    DEFAULT_FILE_NAME, DEFAULT_GAP, DEFAULT_ROWS,
};
use image::Rgba;
use std::fmt;

/// Validated grid configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    /// Number of cell rows (0 is representable but not generatable)
    pub rows: u32,
    /// Number of cell columns (0 is representable but not generatable)
    pub columns: u32,
    /// Width of every cell in pixels
    pub cell_width: u32,
    /// Height of every cell in pixels
    pub cell_height: u32,
    /// Spacing between adjacent cells in pixels
    pub gap: u32,
    /// Colour painted behind and between cells
    pub background: Rgba<u8>,
    /// Name of the exported image file
    pub file_name: String,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            gap: DEFAULT_GAP,
            background: Rgba(DEFAULT_BACKGROUND),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ParameterSet {
    /// Total number of cells in the grid
    pub const fn cell_count(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }

    /// Whether a generation may run with these parameters
    pub const fn is_generatable(&self) -> bool {
        self.cell_count() >= 1
    }

    /// Canonical text form accepted by [`parse`]
    pub fn stringify(&self) -> String {
        format!(
            "rows {}\ncolumns {}\ncell_width {}\ncell_height {}\ngap {}\nbackground {}\nfile {}",
            self.rows,
            self.columns,
            self.cell_width,
            self.cell_height,
            self.gap,
            color::format_color(self.background),
            self.file_name
        )
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

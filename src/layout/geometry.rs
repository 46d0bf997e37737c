//! Cell geometry shared by compositing and the guide
//!
//! All coordinates are in composite pixels. The composite has no border
//! padding: `width = columns * cell_width + (columns - 1) * gap` and the same
//! for height with rows. An axis with zero cells has zero extent.

use crate::io::configuration::{MAX_CELL_SIZE, MAX_GAP, MAX_GRID_CELLS_PER_AXIS};
use crate::params::ParameterSet;

/// Pixel rectangle of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CellRect {
    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Centre pixel, rounded towards the top-left
    pub const fn center(&self) -> (u32, u32) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }
}

/// Where a scaled image lands inside its cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlacement {
    /// Absolute left edge of the scaled image
    pub x: u32,
    /// Absolute top edge of the scaled image
    pub y: u32,
    /// Scaled width
    pub width: u32,
    /// Scaled height
    pub height: u32,
    /// Applied scale factor, never above 1
    pub scale: f64,
}

/// Grid geometry derived from a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    rows: u32,
    columns: u32,
    cell_width: u32,
    cell_height: u32,
    gap: u32,
}

impl GridGeometry {
    /// Derive the geometry for the given parameters
    pub const fn new(params: &ParameterSet) -> Self {
        Self {
            rows: params.rows,
            columns: params.columns,
            cell_width: params.cell_width,
            cell_height: params.cell_height,
            gap: params.gap,
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.columns as usize)
    }

    /// Size of the composite as `(width, height)`
    pub const fn output_size(&self) -> (u32, u32) {
        (
            axis_extent(self.columns, self.cell_width, self.gap),
            axis_extent(self.rows, self.cell_height, self.gap),
        )
    }

    /// Whether every dimension lies inside the ranges parameter text accepts
    ///
    /// Inside these ranges no coordinate can overflow and the cell count stays
    /// small enough to draw.
    pub const fn within_limits(&self) -> bool {
        self.rows <= MAX_GRID_CELLS_PER_AXIS
            && self.columns <= MAX_GRID_CELLS_PER_AXIS
            && self.cell_width <= MAX_CELL_SIZE
            && self.cell_height <= MAX_CELL_SIZE
            && self.gap <= MAX_GAP
    }

    /// Rectangle of the cell at `(row, column)`
    pub const fn cell_rect_at(&self, row: u32, column: u32) -> Option<CellRect> {
        if row >= self.rows || column >= self.columns {
            return None;
        }

        Some(CellRect {
            x: column.saturating_mul(self.cell_width.saturating_add(self.gap)),
            y: row.saturating_mul(self.cell_height.saturating_add(self.gap)),
            width: self.cell_width,
            height: self.cell_height,
        })
    }

    /// Rectangle of the cell at a row-major index
    pub const fn cell_rect(&self, index: usize) -> Option<CellRect> {
        if self.columns == 0 || index >= self.cell_count() {
            return None;
        }

        let columns = self.columns as usize;
        self.cell_rect_at((index / columns) as u32, (index % columns) as u32)
    }

    /// All cell rectangles in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellRect> + '_ {
        (0..self.cell_count()).filter_map(|index| self.cell_rect(index))
    }

    /// X coordinates of the `columns - 1` vertical division lines
    ///
    /// Each line sits in the middle of the gap between two adjacent columns,
    /// which is the shared cell edge when the gap is zero.
    pub fn vertical_divisions(&self) -> Vec<f64> {
        division_positions(self.columns, self.cell_width, self.gap)
    }

    /// Y coordinates of the `rows - 1` horizontal division lines
    pub fn horizontal_divisions(&self) -> Vec<f64> {
        division_positions(self.rows, self.cell_height, self.gap)
    }

    /// Scale an image of the given size into `cell` without enlarging it
    ///
    /// Returns `None` for images with a zero dimension.
    pub fn fit(cell: CellRect, image_width: u32, image_height: u32) -> Option<FitPlacement> {
        if image_width == 0 || image_height == 0 || cell.width == 0 || cell.height == 0 {
            return None;
        }

        let scale = (f64::from(cell.width) / f64::from(image_width))
            .min(f64::from(cell.height) / f64::from(image_height))
            .min(1.0);

        let width = scaled_extent(image_width, scale, cell.width);
        let height = scaled_extent(image_height, scale, cell.height);

        Some(FitPlacement {
            x: cell.x.saturating_add((cell.width - width) / 2),
            y: cell.y.saturating_add((cell.height - height) / 2),
            width,
            height,
            scale,
        })
    }
}

const fn axis_extent(count: u32, size: u32, gap: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    count
        .saturating_mul(size)
        .saturating_add((count - 1).saturating_mul(gap))
}

fn division_positions(count: u32, size: u32, gap: u32) -> Vec<f64> {
    (1..count)
        .map(|i| f64::from(i) * (f64::from(size) + f64::from(gap)) - f64::from(gap) / 2.0)
        .collect()
}

fn scaled_extent(extent: u32, scale: f64, limit: u32) -> u32 {
    ((f64::from(extent) * scale).round() as u32).clamp(1, limit)
}

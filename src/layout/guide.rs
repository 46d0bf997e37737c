//! Schematic preview of the grid a generation would produce
//!
//! The guide uses [`GridGeometry`] for every coordinate it draws and maps them
//! onto the surface with the same [`DisplayPlacement`] used to show finished
//! composites, so the preview lines up with the eventual result.

use crate::io::configuration::{
    GUIDE_CELL_COLOR, GUIDE_LABEL_COLOR, GUIDE_LABEL_INSET, GUIDE_LINE_COLOR,
};
use crate::layout::display::{DisplayPlacement, Viewport};
use crate::layout::geometry::{CellRect, GridGeometry};
use crate::layout::glyphs::{GLYPH_HEIGHT, draw_number, number_width};
use crate::layout::surface::{Line, Surface};
use crate::params::ParameterSet;
use image::Rgba;

/// What a guide draw put on the surface, in surface coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideReport {
    /// Area covered by the grid, `None` for degenerate parameters
    pub frame: Option<CellRect>,
    /// X positions of the vertical division lines
    pub division_x: Vec<f64>,
    /// Y positions of the horizontal division lines
    pub division_y: Vec<f64>,
    /// Number of cells that received an index label
    pub labelled: usize,
}

/// Draw the guide for `params` onto `surface`
///
/// Degenerate parameters (no cells) and grids outside the accepted
/// dimension ranges produce only the background and the surface border.
pub fn draw_guide<S: Surface + ?Sized>(surface: &mut S, params: &ParameterSet) -> GuideReport {
    surface.clear(params.background);

    let (surface_width, surface_height) = surface.size();
    let bounds = CellRect {
        x: 0,
        y: 0,
        width: surface_width,
        height: surface_height,
    };

    let geometry = GridGeometry::new(params);
    let (width, height) = geometry.output_size();
    let viewport = Viewport {
        width: surface_width,
        height: surface_height,
    };

    let placement = if params.is_generatable() && geometry.within_limits() {
        DisplayPlacement::fit(viewport, width, height)
    } else {
        None
    };

    let Some(placement) = placement else {
        surface.stroke_rect(bounds, Rgba(GUIDE_LINE_COLOR));
        return GuideReport::default();
    };

    let frame = placement.frame();
    let mut labelled = 0;

    for (index, cell) in geometry.cells().enumerate() {
        let mapped = placement.map_rect(cell);
        surface.stroke_rect(mapped, Rgba(GUIDE_CELL_COLOR));

        let label = index + 1;
        let fits_label = mapped.width >= number_width(label) + 2 * GUIDE_LABEL_INSET
            && mapped.height >= GLYPH_HEIGHT + 2 * GUIDE_LABEL_INSET;
        if fits_label {
            draw_number(
                &mut *surface,
                mapped.x + GUIDE_LABEL_INSET,
                mapped.y + GUIDE_LABEL_INSET,
                label,
                Rgba(GUIDE_LABEL_COLOR),
            );
            labelled += 1;
        }
    }

    let division_x: Vec<f64> = geometry
        .vertical_divisions()
        .into_iter()
        .map(|x| placement.map_x(x))
        .collect();
    let division_y: Vec<f64> = geometry
        .horizontal_divisions()
        .into_iter()
        .map(|y| placement.map_y(y))
        .collect();

    for &x in &division_x {
        surface.draw_line(
            Line::Vertical {
                x: x.floor() as u32,
                y0: frame.y,
                y1: frame.bottom() - 1,
            },
            Rgba(GUIDE_LINE_COLOR),
        );
    }
    for &y in &division_y {
        surface.draw_line(
            Line::Horizontal {
                y: y.floor() as u32,
                x0: frame.x,
                x1: frame.right() - 1,
            },
            Rgba(GUIDE_LINE_COLOR),
        );
    }

    surface.stroke_rect(frame, Rgba(GUIDE_LINE_COLOR));

    GuideReport {
        frame: Some(frame),
        division_x,
        division_y,
        labelled,
    }
}

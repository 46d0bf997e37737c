//! Composites a list of images into a single grid bitmap

use crate::io::configuration::MAX_OUTPUT_DIMENSION;
use crate::io::error::{GridError, Result, invalid_parameter};
use crate::layout::geometry::GridGeometry;
use crate::layout::surface::{RasterSurface, Surface};
use crate::params::ParameterSet;
use image::imageops::FilterType;
use image::RgbaImage;
use std::borrow::Borrow;

/// Finished composite
///
/// A flat bitmap with no further structure. It is replaced wholesale by the
/// next generation and never modified in place.
#[derive(Debug, Clone)]
pub struct GridImage {
    image: RgbaImage,
    file_name: String,
    placed: usize,
}

impl GridImage {
    /// Composite pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Composite width
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Composite height
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// File name the composite is exported under
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of cells holding an image
    pub const fn placed(&self) -> usize {
        self.placed
    }
}

/// Paint the grid described by `params` onto `surface`
///
/// Fills the background, then places images row-major into the cells, each
/// scaled to fit without enlargement and centred. Images with a zero dimension
/// are skipped without taking a cell. Images beyond the cell count are ignored;
/// cells beyond the image count stay background only. Returns the number of
/// images placed.
pub fn compose<S, I>(surface: &mut S, images: &[I], params: &ParameterSet) -> usize
where
    S: Surface + ?Sized,
    I: Borrow<RgbaImage>,
{
    surface.clear(params.background);

    let geometry = GridGeometry::new(params);
    if images.len() > geometry.cell_count() {
        log::debug!(
            "Ignoring {} images beyond the {} available cells",
            images.len() - geometry.cell_count(),
            geometry.cell_count()
        );
    }

    let usable = images
        .iter()
        .map(<I as Borrow<RgbaImage>>::borrow)
        .filter(|image| {
            let has_pixels = image.width() > 0 && image.height() > 0;
            if !has_pixels {
                log::debug!("Skipping empty image");
            }
            has_pixels
        });

    let mut placed = 0;
    for (cell, image) in geometry.cells().zip(usable) {
        let Some(fit) = GridGeometry::fit(cell, image.width(), image.height()) else {
            log::debug!("Skipping empty cell at ({}, {})", cell.x, cell.y);
            continue;
        };

        if fit.width == image.width() && fit.height == image.height() {
            surface.draw_image(image, fit.x, fit.y);
        } else {
            let scaled = image::imageops::resize(image, fit.width, fit.height, FilterType::Triangle);
            surface.draw_image(&scaled, fit.x, fit.y);
        }
        placed += 1;
    }

    placed
}

/// Lay out `images` into a new composite sized from `params`
///
/// # Errors
///
/// Returns an error if:
/// - The parameters describe a grid without cells
/// - A count, cell size or gap lies outside the accepted ranges
/// - The composite would exceed the maximum output dimension
pub fn layout<I: Borrow<RgbaImage>>(images: &[I], params: &ParameterSet) -> Result<GridImage> {
    if !params.is_generatable() {
        return Err(GridError::DegenerateParameters {
            rows: params.rows,
            columns: params.columns,
        });
    }

    let geometry = GridGeometry::new(params);
    if !geometry.within_limits() {
        return Err(invalid_parameter(
            "grid",
            &format!(
                "{}x{} cells of {}x{} with gap {}",
                params.rows, params.columns, params.cell_width, params.cell_height, params.gap
            ),
            &"outside the accepted dimension ranges",
        ));
    }

    let (width, height) = geometry.output_size();
    if width > MAX_OUTPUT_DIMENSION || height > MAX_OUTPUT_DIMENSION {
        return Err(invalid_parameter(
            "output size",
            &format!("{width}x{height}"),
            &format!("exceeds the {MAX_OUTPUT_DIMENSION} pixel limit"),
        ));
    }

    let mut surface = RasterSurface::new(width, height);
    let placed = compose(&mut surface, images, params);

    Ok(GridImage {
        image: surface.into_image(),
        file_name: params.file_name.clone(),
        placed,
    })
}

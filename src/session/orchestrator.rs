//! Session context driving sampling, loading, compositing and display
//!
//! Generation runs through `Idle -> Loading -> Compositing -> Idle`, or
//! `Idle -> Loading -> Idle` when nothing could be loaded. The processing flag
//! is raised for the whole sequence; requests arriving while it is up are
//! dropped rather than queued.

use crate::io::configuration::{BUSY_BACKGROUND, GUIDE_DEBOUNCE_MS};
use crate::io::error::Result;
use crate::io::export::save_grid_image;
use crate::layout::compositor::{GridImage, layout};
use crate::layout::display::{DisplayPlacement, Viewport};
use crate::layout::guide::{GuideReport, draw_guide};
use crate::layout::surface::{RasterSurface, Surface};
use crate::params::{DEFAULT_STRING, ParameterSet, parse};
use crate::session::loader::{ImageHandle, ImageLoader, LoadOptions, PendingLoad};
use crate::session::pool::{ImagePool, ImageSource, Selection};
use crate::session::refresh::GuideRefresh;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Phase of the generation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    /// No generation in flight
    Idle,
    /// Waiting for the selection to decode
    Loading,
    /// Building and displaying the composite
    Compositing,
}

/// Outcome of a generate request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateRequest {
    /// A generation started with this many selected sources
    Started {
        /// Size of the selection handed to the loader
        selected: usize,
    },
    /// Another generation is in flight; the request was dropped
    Busy,
    /// Parameters describe a grid without cells; nothing changed
    Degenerate,
}

/// How a generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationEvent {
    /// A new composite replaced the previous one
    Completed {
        /// Number of cells holding an image
        placed: usize,
    },
    /// No image loaded; nothing was composited
    Empty,
    /// The composite could not be built
    Failed,
}

struct InFlight {
    load: PendingLoad,
    params: ParameterSet,
}

/// Single-session state shared by every user action
pub struct Orchestrator<L: ImageLoader> {
    loader: L,
    pool: ImagePool,
    parameter_text: String,
    grid_image: Option<GridImage>,
    processing: bool,
    state: GenerationState,
    in_flight: Option<InFlight>,
    guide_mode: bool,
    refresh: GuideRefresh,
    working: RasterSurface,
    viewport: Viewport,
    display: Option<DisplayPlacement>,
    rng: StdRng,
}

impl<L: ImageLoader> Orchestrator<L> {
    /// Create a session with an empty pool and the default parameter text
    ///
    /// A fixed `seed` makes selections reproducible; otherwise the generator
    /// is seeded from the operating system.
    pub fn new(loader: L, viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let mut working = RasterSurface::new(viewport.width, viewport.height);
        working.clear(Rgba(BUSY_BACKGROUND));

        Self {
            loader,
            pool: ImagePool::new(),
            parameter_text: DEFAULT_STRING.to_string(),
            grid_image: None,
            processing: false,
            state: GenerationState::Idle,
            in_flight: None,
            guide_mode: false,
            refresh: GuideRefresh::new(Duration::from_millis(GUIDE_DEBOUNCE_MS)),
            working,
            viewport,
            display: None,
            rng,
        }
    }

    /// Append a file to the image pool
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        let source = ImageSource::new(path);
        log::debug!("Added {} to the pool", source.path().display());
        self.pool.push(source);
    }

    /// Replace the parameter text, scheduling a guide redraw
    pub fn edit_parameters(&mut self, text: &str, now: Instant) {
        text.clone_into(&mut self.parameter_text);
        self.refresh.edit(text, now);
    }

    /// Current parameter text
    pub fn parameter_text(&self) -> &str {
        &self.parameter_text
    }

    /// Parameters parsed from the current text
    pub fn parameters(&self) -> ParameterSet {
        parse(&self.parameter_text)
    }

    /// Turn guide mode on or off
    ///
    /// Entering guide mode draws the guide immediately; leaving it puts the
    /// last result (or a blank canvas) back on the working canvas.
    pub fn set_guide_mode(&mut self, enabled: bool) {
        if self.guide_mode == enabled {
            return;
        }

        self.guide_mode = enabled;
        if enabled {
            self.draw_guide();
        } else {
            self.refresh.force();
            self.show_result();
        }
    }

    /// Whether the guide is currently shown
    pub const fn guide_mode(&self) -> bool {
        self.guide_mode
    }

    /// Redraw the guide if a debounced edit has become due
    pub fn tick(&mut self, now: Instant) -> Option<GuideReport> {
        let text = self.refresh.due(now, self.guide_mode)?;
        Some(draw_guide(&mut self.working, &parse(&text)))
    }

    /// Draw the guide for the current parameter text right away
    pub fn draw_guide(&mut self) -> GuideReport {
        self.refresh.mark_drawn(&self.parameter_text);
        draw_guide(&mut self.working, &parse(&self.parameter_text))
    }

    /// Ask for a new composite
    ///
    /// Dropped while another generation is in flight. Parameters without
    /// cells leave the session untouched.
    pub fn request_generate(&mut self) -> GenerateRequest {
        if self.processing {
            log::debug!("Generation already in progress; request dropped");
            return GenerateRequest::Busy;
        }

        let params = parse(&self.parameter_text);
        if !params.is_generatable() {
            log::warn!(
                "Grid of {}x{} has no cells; nothing to generate",
                params.rows,
                params.columns
            );
            return GenerateRequest::Degenerate;
        }

        self.processing = true;
        self.working.clear(Rgba(BUSY_BACKGROUND));

        let count = usize::try_from(params.cell_count()).unwrap_or(usize::MAX);
        let selection = Selection::sample(&self.pool, count, &mut self.rng);
        let selected = selection.len();
        log::debug!(
            "Loading {selected} of {} pooled images for a {}x{} grid",
            self.pool.len(),
            params.rows,
            params.columns
        );

        let options = LoadOptions {
            warn_on_fail: true,
            max_dimension: Some(params.cell_width.max(params.cell_height)),
        };
        let load = self.loader.load(selection.into_sources(), options);

        self.state = GenerationState::Loading;
        self.in_flight = Some(InFlight { load, params });

        GenerateRequest::Started { selected }
    }

    /// Finish the in-flight generation if its images have loaded
    pub fn poll(&mut self) -> Option<GenerationEvent> {
        let handles = self.in_flight.as_ref()?.load.try_complete()?;
        let in_flight = self.in_flight.take()?;
        Some(self.finish(&in_flight.params, &handles))
    }

    /// Block until the in-flight generation finishes
    pub fn wait(&mut self) -> Option<GenerationEvent> {
        let in_flight = self.in_flight.take()?;
        let handles = in_flight.load.wait();
        Some(self.finish(&in_flight.params, &handles))
    }

    // Only a completed composite repaints the working canvas
    fn finish(&mut self, params: &ParameterSet, handles: &[ImageHandle]) -> GenerationEvent {
        let event = if handles.is_empty() {
            log::info!("No images loaded; nothing to composite");
            GenerationEvent::Empty
        } else {
            self.state = GenerationState::Compositing;
            match layout(handles, params) {
                Ok(grid) => {
                    let placed = grid.placed();
                    log::info!(
                        "Composited {placed} images into a {}x{} grid image",
                        grid.width(),
                        grid.height()
                    );
                    self.grid_image = Some(grid);
                    self.refresh_working();
                    GenerationEvent::Completed { placed }
                }
                Err(err) => {
                    log::warn!("{err}");
                    GenerationEvent::Failed
                }
            }
        };

        self.processing = false;
        self.state = GenerationState::Idle;
        event
    }

    fn refresh_working(&mut self) {
        if self.guide_mode {
            self.draw_guide();
        } else {
            self.show_result();
        }
    }

    // Puts the current composite on the working canvas without touching it
    fn show_result(&mut self) {
        self.working.clear(Rgba(BUSY_BACKGROUND));
        self.display = None;

        let Some(grid) = self.grid_image.as_ref() else {
            return;
        };
        let Some(placement) = DisplayPlacement::fit(self.viewport, grid.width(), grid.height())
        else {
            return;
        };

        let shown = if placement.width == grid.width() && placement.height == grid.height() {
            Cow::Borrowed(grid.image())
        } else {
            Cow::Owned(image::imageops::resize(
                grid.image(),
                placement.width,
                placement.height,
                FilterType::Triangle,
            ))
        };
        self.working.draw_image(&shown, placement.x, placement.y);
        self.display = Some(placement);
    }

    /// Save the current composite into `dir` under its parameter file name
    ///
    /// Returns `Ok(None)` when nothing has been generated yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the image
    /// cannot be encoded
    pub fn save(&self, dir: &Path) -> Result<Option<PathBuf>> {
        self.grid_image
            .as_ref()
            .map(|grid| save_grid_image(grid, dir, grid.file_name()))
            .transpose()
    }

    /// Save the current composite into `dir` under an explicit file name
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the image
    /// cannot be encoded
    pub fn save_as(&self, dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
        self.grid_image
            .as_ref()
            .map(|grid| save_grid_image(grid, dir, file_name))
            .transpose()
    }

    /// Images added so far
    pub const fn pool(&self) -> &ImagePool {
        &self.pool
    }

    /// Latest composite, if any
    pub const fn grid_image(&self) -> Option<&GridImage> {
        self.grid_image.as_ref()
    }

    /// Whether a generation is in flight
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Current phase of the generation sequence
    pub const fn state(&self) -> GenerationState {
        self.state
    }

    /// Working canvas pixels
    pub const fn working_canvas(&self) -> &RgbaImage {
        self.working.image()
    }

    /// Where the latest composite is shown on the working canvas
    pub const fn display(&self) -> Option<DisplayPlacement> {
        self.display
    }

    /// Size of the working canvas
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }
}

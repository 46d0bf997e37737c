/// Composites images into a single grid bitmap
pub mod compositor;
/// Viewport fitting for results and guides
pub mod display;
/// Cell geometry shared by compositing and the guide
pub mod geometry;
/// Digit glyphs for guide labels
pub mod glyphs;
/// Grid preview renderer
pub mod guide;
/// Drawing capability and raster implementation
pub mod surface;

pub use compositor::{GridImage, compose, layout};
pub use display::{DisplayPlacement, Viewport};
pub use geometry::{CellRect, FitPlacement, GridGeometry};
pub use guide::{GuideReport, draw_guide};
pub use surface::{Line, RasterSurface, Surface};

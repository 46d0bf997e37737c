//! Parameter defaults, safety limits and runtime configuration constants

// Parameter defaults used whenever a directive is missing or unparsable
/// Default number of grid rows
pub const DEFAULT_ROWS: u32 = 3;
/// Default number of grid columns
pub const DEFAULT_COLUMNS: u32 = 3;
/// Default cell width in pixels
pub const DEFAULT_CELL_WIDTH: u32 = 256;
/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: u32 = 256;
/// Default spacing between adjacent cells in pixels
pub const DEFAULT_GAP: u32 = 8;
/// Default background colour (opaque white)
pub const DEFAULT_BACKGROUND: [u8; 4] = [255, 255, 255, 255];
/// Default name of the exported grid image
pub const DEFAULT_FILE_NAME: &str = "grid-image.png";

// Safety limits to prevent excessive memory allocation
/// Maximum rows or columns accepted by the parser
pub const MAX_GRID_CELLS_PER_AXIS: u32 = 64;
/// Maximum cell width or height accepted by the parser
pub const MAX_CELL_SIZE: u32 = 4096;
/// Maximum gap accepted by the parser
pub const MAX_GAP: u32 = 1024;
/// Maximum composite width or height
pub const MAX_OUTPUT_DIMENSION: u32 = 32_768;

/// File extensions accepted into the image pool (lowercase)
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

// Working canvas
/// Default working canvas width
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
/// Default working canvas height
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;
/// Colour the working canvas is cleared to while a generation is in flight
pub const BUSY_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

// Guide rendering
/// Debounce window between a parameter edit and the guide redraw
pub const GUIDE_DEBOUNCE_MS: u64 = 100;
/// Colour of the outer border and division lines
pub const GUIDE_LINE_COLOR: [u8; 4] = [32, 32, 32, 255];
/// Colour of individual cell outlines
pub const GUIDE_CELL_COLOR: [u8; 4] = [160, 160, 160, 255];
/// Colour of the cell index labels
pub const GUIDE_LABEL_COLOR: [u8; 4] = [96, 96, 96, 255];
/// Inset of cell index labels from the cell corner
pub const GUIDE_LABEL_INSET: u32 = 4;

// Output settings
/// Directory grids are saved into when none is given
pub const DEFAULT_OUTPUT_DIR: &str = ".";
/// Suffix separator for batch generations beyond the first
pub const BATCH_SUFFIX_SEPARATOR: &str = "-";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

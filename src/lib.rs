//! Random image grid composition with live layout guides
//!
//! A free-text parameter description is parsed into a grid layout, a random
//! selection of pooled images is decoded and scaled into the grid's cells, and
//! the resulting composite is shown and exported. A schematic guide of the
//! same geometry can be drawn at any time to preview parameter edits.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Grid geometry, compositing and guide rendering
pub mod layout;
/// Parameter sets and their text representation
pub mod params;
/// Image pool, loading and the generation state machine
pub mod session;

pub use io::error::{GridError, Result};

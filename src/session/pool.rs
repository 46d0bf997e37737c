//! Append-only image pool and random selection

use crate::io::configuration::SUPPORTED_EXTENSIONS;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// Opaque reference to an image file that has not been decoded yet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageSource {
    path: PathBuf,
}

impl ImageSource {
    /// Wrap a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file extension names a decodable image format
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                SUPPORTED_EXTENSIONS.contains(&ext.as_str())
            })
    }
}

/// Ordered collection of every image added during a session
///
/// Only ever appended to; sampling reads it without modification.
#[derive(Debug, Clone, Default)]
pub struct ImagePool {
    sources: Vec<ImageSource>,
}

impl ImagePool {
    /// Create an empty pool
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source
    pub fn push(&mut self, source: ImageSource) {
        self.sources.push(source);
    }

    /// Number of sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source has been added yet
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ImageSource> {
        self.sources.iter()
    }

    /// Sources in insertion order
    pub fn as_slice(&self) -> &[ImageSource] {
        &self.sources
    }
}

/// Random subset of the pool used for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    sources: Vec<ImageSource>,
}

impl Selection {
    /// Draw up to `count` sources in random order
    ///
    /// Shuffles a copy of the whole pool with Fisher-Yates, so every
    /// permutation is equally likely, then keeps the first `count`.
    pub fn sample<R: Rng + ?Sized>(pool: &ImagePool, count: usize, rng: &mut R) -> Self {
        let mut sources = pool.sources.clone();
        sources.shuffle(rng);
        sources.truncate(count);
        Self { sources }
    }

    /// Number of selected sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Selected sources in draw order
    pub fn sources(&self) -> &[ImageSource] {
        &self.sources
    }

    /// Take the selected sources
    pub fn into_sources(self) -> Vec<ImageSource> {
        self.sources
    }
}

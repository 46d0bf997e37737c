//! Asynchronous image decoding behind a swappable loader interface
//!
//! A load request returns a [`PendingLoad`] immediately. The orchestrator
//! checks it from its own thread, so the only suspension point in a generation
//! is the wait for decoding to finish. Files that fail to decode are dropped
//! from the result; a request never fails as a whole.

use crate::io::error::{GridError, Result};
use crate::session::pool::ImageSource;
use image::RgbaImage;
use rayon::prelude::*;
use std::borrow::Borrow;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// How a load request treats its files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Log files that fail to decode
    pub warn_on_fail: bool,
    /// Downscale decoded images so neither side exceeds this
    pub max_dimension: Option<u32>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            warn_on_fail: true,
            max_dimension: None,
        }
    }
}

/// Decoded image ready for compositing
#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: ImageSource,
    image: Arc<RgbaImage>,
}

impl ImageHandle {
    /// Pair decoded pixels with the source they came from
    pub fn new(source: ImageSource, image: RgbaImage) -> Self {
        Self {
            source,
            image: Arc::new(image),
        }
    }

    /// Source file
    pub const fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Decoded pixels
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Borrow<RgbaImage> for ImageHandle {
    fn borrow(&self) -> &RgbaImage {
        &self.image
    }
}

/// Completion side of a [`PendingLoad`]
pub struct LoadCompleter {
    sender: Sender<Vec<ImageHandle>>,
}

impl LoadCompleter {
    /// Deliver the successfully decoded images
    pub fn complete(self, handles: Vec<ImageHandle>) {
        // Receiver gone means the session ended; nobody is waiting
        if self.sender.send(handles).is_err() {
            log::debug!("Load finished after its session was dropped");
        }
    }
}

/// In-flight load whose result arrives later
pub struct PendingLoad {
    receiver: Receiver<Vec<ImageHandle>>,
}

impl PendingLoad {
    /// Create a pending load and the handle that completes it
    pub fn channel() -> (LoadCompleter, Self) {
        let (sender, receiver) = mpsc::channel();
        (LoadCompleter { sender }, Self { receiver })
    }

    /// Create a load that has already finished
    pub fn ready(handles: Vec<ImageHandle>) -> Self {
        let (completer, pending) = Self::channel();
        completer.complete(handles);
        pending
    }

    /// Return the result if the load has finished, without blocking
    ///
    /// A loader that disappears without completing counts as a load in which
    /// every file failed.
    pub fn try_complete(&self) -> Option<Vec<ImageHandle>> {
        match self.receiver.try_recv() {
            Ok(handles) => Some(handles),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("Image loader stopped without reporting a result");
                Some(Vec::new())
            }
        }
    }

    /// Block until the load finishes
    pub fn wait(&self) -> Vec<ImageHandle> {
        self.receiver.recv().unwrap_or_else(|_| {
            log::warn!("Image loader stopped without reporting a result");
            Vec::new()
        })
    }
}

/// Capability that turns image sources into decoded images
pub trait ImageLoader {
    /// Start decoding `files`; the result keeps their order
    fn load(&self, files: Vec<ImageSource>, options: LoadOptions) -> PendingLoad;
}

/// Loader that decodes files from disk on a worker thread
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl FsImageLoader {
    /// Create a filesystem loader
    pub const fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, files: Vec<ImageSource>, options: LoadOptions) -> PendingLoad {
        let (completer, pending) = PendingLoad::channel();

        thread::spawn(move || {
            let handles = decode_all(&files, options);
            completer.complete(handles);
        });

        pending
    }
}

/// Decode every file in parallel, dropping the ones that fail
pub fn decode_all(files: &[ImageSource], options: LoadOptions) -> Vec<ImageHandle> {
    files
        .par_iter()
        .filter_map(|source| match decode_image(source, options.max_dimension) {
            Ok(handle) => Some(handle),
            Err(err) => {
                if options.warn_on_fail {
                    log::warn!("{err}");
                }
                None
            }
        })
        .collect()
}

/// Decode a single file, downscaling it to `max_dimension` if given
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn decode_image(source: &ImageSource, max_dimension: Option<u32>) -> Result<ImageHandle> {
    let mut image = image::open(source.path()).map_err(|e| GridError::ImageLoad {
        path: source.path().to_path_buf(),
        source: e,
    })?;

    if let Some(max) = max_dimension
        && (image.width() > max || image.height() > max)
    {
        image = image.thumbnail(max, max);
    }

    Ok(ImageHandle::new(source.clone(), image.to_rgba8()))
}

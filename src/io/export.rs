//! Export of finished composites to image files

use crate::io::configuration::BATCH_SUFFIX_SEPARATOR;
use crate::io::error::{GridError, Result, WithPath};
use crate::layout::compositor::GridImage;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Save `grid` as `dir/file_name`, creating `dir` if needed
///
/// The encoder is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The output directory cannot be created
/// - The extension names no supported format or encoding fails
pub fn save_grid_image(grid: &GridImage, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    save_canvas(grid.image(), &path)?;

    log::info!(
        "Saved {}x{} grid image to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(path)
}

/// File name for the `index`-th grid of a batch
///
/// The first grid keeps `file_name`; later ones get `-2`, `-3`, ... before the
/// extension.
pub fn batch_file_name(file_name: &str, index: usize) -> String {
    if index == 0 {
        return file_name.to_string();
    }

    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let number = index + 1;
    match path.extension() {
        Some(ext) => format!(
            "{stem}{BATCH_SUFFIX_SEPARATOR}{number}.{}",
            ext.to_string_lossy()
        ),
        None => format!("{stem}{BATCH_SUFFIX_SEPARATOR}{number}"),
    }
}

/// Write any canvas (guide or preview) to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or encoding
/// fails
pub fn save_canvas(canvas: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    canvas.save(path).map_err(|e| GridError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

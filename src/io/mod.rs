//! I/O layer: image decoding for the CLI and batch helpers, debug sinks for
//! intermediate analysis images, and `writers` for JPEG output.
use std::path::Path;

use image::DynamicImage;

use crate::error::Result;

pub mod debug_sink;
pub use debug_sink::{DebugSink, DirectorySink, MemorySink};

pub mod writers;

/// File extensions the batch helpers try to decode.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Saves `img` with the format implied by the file extension. JPEG has no
/// alpha channel, so those outputs are flattened to RGB first.
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);
    if is_jpeg && img.color().has_alpha() {
        DynamicImage::ImageRgb8(img.to_rgb8()).save(path)?;
    } else {
        img.save(path)?;
    }
    Ok(())
}

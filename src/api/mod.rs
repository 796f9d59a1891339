//! High-level, ergonomic library API: find the best crop of an image, cut it
//! out, and batch-crop whole directories. Prefer these entrypoints over the
//! low-level processing modules when integrating smartcrop.
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use tracing::{info, warn};

use crate::core::params::CropSettings;
use crate::core::processing::pipeline::{self, CropAnalysis};
use crate::core::processing::resize::{height_for_width, resize_rgba_exact};
use crate::error::{Error, Result};
use crate::io::{DebugSink, has_image_extension, load_image, save_image};
use crate::logging::{CropLog, TracingLog};
use crate::types::{Rect, ResampleMethod};

/// Finds the best crop of an image for a target size.
pub trait Analyzer {
    /// Returns the crop rectangle in `img` coordinates. At least one of
    /// `width` and `height` must be non-zero; a zero axis is unconstrained.
    fn find_best_crop(&self, img: &DynamicImage, width: u32, height: u32) -> Result<Rect>;
}

/// The content-aware analyzer: edge, skin and saturation features scored
/// under a centre / rule-of-thirds importance map.
#[derive(Clone)]
pub struct SmartCropAnalyzer {
    settings: CropSettings,
    log: Arc<dyn CropLog>,
    sink: Option<Arc<dyn DebugSink>>,
}

impl Default for SmartCropAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SmartCropAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartCropAnalyzer")
            .field("settings", &self.settings)
            .field("debug_sink", &self.sink.is_some())
            .finish()
    }
}

impl SmartCropAnalyzer {
    /// Analyzer with default settings, logging through `tracing`.
    pub fn new() -> Self {
        Self::with_settings(CropSettings::default())
    }

    pub fn with_settings(settings: CropSettings) -> Self {
        Self {
            settings,
            log: Arc::new(TracingLog),
            sink: None,
        }
    }

    pub fn with_logger<L: CropLog + 'static>(mut self, log: L) -> Self {
        self.log = Arc::new(log);
        self
    }

    /// Sink for intermediate images; only used while `debug_mode` is on.
    pub fn with_debug_sink<S: DebugSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn settings(&self) -> &CropSettings {
        &self.settings
    }

    pub fn analyze_rgba(&self, img: &RgbaImage, width: u32, height: u32) -> Result<CropAnalysis> {
        pipeline::find_best_crop(
            img,
            width,
            height,
            &self.settings,
            self.log.as_ref(),
            self.sink.as_deref(),
        )
    }

    /// Full analysis report: crop, score, scale context and stage timings.
    pub fn analyze(&self, img: &DynamicImage, width: u32, height: u32) -> Result<CropAnalysis> {
        let rgba: Cow<'_, RgbaImage> = match img.as_rgba8() {
            Some(rgba) => Cow::Borrowed(rgba),
            None => Cow::Owned(img.to_rgba8()),
        };
        self.analyze_rgba(&rgba, width, height)
    }
}

impl Analyzer for SmartCropAnalyzer {
    fn find_best_crop(&self, img: &DynamicImage, width: u32, height: u32) -> Result<Rect> {
        Ok(self.analyze(img, width, height)?.crop)
    }
}

/// Best crop of `img` for `width x height` using default settings.
pub fn smart_crop(img: &DynamicImage, width: u32, height: u32) -> Result<Rect> {
    SmartCropAnalyzer::new().find_best_crop(img, width, height)
}

/// Cuts `rect` out of `img`.
pub fn crop_image(img: &DynamicImage, rect: &Rect) -> DynamicImage {
    img.crop_imm(rect.min_x, rect.min_y, rect.width(), rect.height())
}

/// Resamples a cropped image to the target size. A zero target axis follows
/// the crop's aspect ratio.
pub fn resize_to_target(
    cropped: &DynamicImage,
    width: u32,
    height: u32,
    method: ResampleMethod,
) -> Result<DynamicImage> {
    let (cw, ch) = (cropped.width(), cropped.height());
    let (tw, th) = match (width, height) {
        (0, 0) => return Err(Error::InvalidDimensions),
        (0, h) => (height_for_width(ch, cw, h), h),
        (w, 0) => (w, height_for_width(cw, ch, w)),
        (w, h) => (w, h),
    };
    let resized = resize_rgba_exact(&cropped.to_rgba8(), tw, th, method)?;
    Ok(DynamicImage::ImageRgba8(resized))
}

/// Finds the best crop and cuts it out, optionally resampling it to the
/// target size.
pub fn crop_to_size(
    analyzer: &SmartCropAnalyzer,
    img: &DynamicImage,
    width: u32,
    height: u32,
    resize: bool,
) -> Result<DynamicImage> {
    let rect = analyzer.find_best_crop(img, width, height)?;
    let cropped = crop_image(img, &rect);
    if !resize {
        return Ok(cropped);
    }
    resize_to_target(&cropped, width, height, analyzer.settings().resample)
}

/// Counters returned by [`crop_directory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Sorted listing of `input_dir` split into image files and the number of
/// other entries (directories, unknown extensions).
fn list_entries(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut images = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        } else {
            info!("Skipping non-image entry: {:?}", path);
            skipped += 1;
        }
    }
    images.sort();
    Ok((images, skipped))
}

/// Return an iterator over the image files directly inside `input_dir`, sorted by name
pub fn iterate_images(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    Ok(list_entries(input_dir)?.0.into_iter())
}

/// Crops every image listed by [`iterate_images`] into `output_dir`, keeping
/// file names. Other entries are counted as skipped.
pub fn crop_directory(
    input_dir: &Path,
    output_dir: &Path,
    width: u32,
    height: u32,
    analyzer: &SmartCropAnalyzer,
    resize: bool,
    continue_on_error: bool,
) -> Result<BatchReport> {
    if width == 0 && height == 0 {
        return Err(Error::InvalidDimensions);
    }
    std::fs::create_dir_all(output_dir)?;

    let (images, skipped) = list_entries(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    for path in images {
        let Some(name) = path.file_name() else {
            report.skipped += 1;
            continue;
        };
        let output_path = output_dir.join(name);
        info!("Cropping: {:?} -> {:?}", path, output_path);

        let result = load_image(&path)
            .and_then(|img| crop_to_size(analyzer, &img, width, height, resize))
            .and_then(|out| save_image(&out, &output_path));
        match result {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("Error cropping {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch cropping complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

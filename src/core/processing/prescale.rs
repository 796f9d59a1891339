//! Pre-scale / rescale controller: picks the working resolution, derives the
//! crop size to search for in working-image pixels, and maps the winner back
//! to the source image.
use serde::{Deserialize, Serialize};

use crate::core::params::AnalysisParams;
use crate::error::{Error, Result};
use crate::types::{Crop, Rect};

/// Per-call constants of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub source_width: u32,
    pub source_height: u32,
    /// Largest factor that fits the target into the source
    pub scale: f64,
    /// Source -> working image factor, never above 1
    pub prescale_factor: f64,
    /// Target crop size in working-image pixels; 0 leaves the axis free
    pub crop_width: f64,
    pub crop_height: f64,
    /// Lower bound of the candidate scale search
    pub min_scale: f64,
}

impl AnalysisContext {
    pub fn new(
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
        params: &AnalysisParams,
    ) -> Result<Self> {
        if target_width == 0 && target_height == 0 {
            return Err(Error::InvalidDimensions);
        }

        let (sw, sh) = (source_width as f64, source_height as f64);
        let (tw, th) = (target_width as f64, target_height as f64);
        // x / 0 is +inf, so a zero target axis never constrains the scale
        let scale = (sw / tw).min(sh / th);

        let mut prescale_factor = 1.0;
        if params.prescale {
            let f = params.prescale_min / sw.min(sh);
            if f < 1.0 {
                prescale_factor = f;
            }
        }

        let crop_width = chop(tw * scale * prescale_factor);
        let crop_height = chop(th * scale * prescale_factor);
        let min_scale = params.max_scale.min((1.0 / scale).max(params.min_scale));

        Ok(Self {
            source_width,
            source_height,
            scale,
            prescale_factor,
            crop_width,
            crop_height,
            min_scale,
        })
    }

    /// Width to request from the resampler; the height follows the aspect ratio.
    pub fn working_width(&self) -> u32 {
        ((self.source_width as f64 * self.prescale_factor) as u32).max(1)
    }

    /// Copy of the context with the crop size clamped to the actual working
    /// image, which can be a pixel short after the resampler rounds.
    pub fn fit_to_working(&self, width: u32, height: u32) -> Self {
        Self {
            crop_width: self.crop_width.min(width as f64),
            crop_height: self.crop_height.min(height as f64),
            ..*self
        }
    }

    /// Maps a working-image crop back to source coordinates.
    pub fn rescale(&self, crop: &Crop) -> Rect {
        let r = crop.to_rect();
        let p = self.prescale_factor;
        let back = |v: u32, limit: u32| (chop(v as f64 / p) as u32).min(limit);
        Rect::new(
            back(r.min_x, self.source_width),
            back(r.min_y, self.source_height),
            back(r.max_x, self.source_width),
            back(r.max_y, self.source_height),
        )
        .canon()
    }
}

/// Rounds toward zero.
pub fn chop(x: f64) -> f64 {
    if x < 0.0 { x.ceil() } else { x.floor() }
}

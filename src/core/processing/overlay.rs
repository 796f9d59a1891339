use image::{Rgba, RgbaImage};

use crate::core::params::AnalysisParams;
use crate::core::processing::importance::importance;
use crate::types::Crop;

/// Tints `base` with the importance field of `crop`: positive weights push
/// green up, negative ones push red up.
pub fn draw_importance_overlay(
    base: &RgbaImage,
    crop: &Crop,
    params: &AnalysisParams,
) -> RgbaImage {
    RgbaImage::from_fn(base.width(), base.height(), |x, y| {
        let [r, g, b, _] = base.get_pixel(x, y).0;
        let (mut r, mut g) = (r as f64, g as f64);
        let imp = importance(params, crop, x, y);
        if imp > 0.0 {
            g += imp * 32.0;
        } else if imp < 0.0 {
            r += imp * -64.0;
        }
        Rgba([r.clamp(0.0, 255.0) as u8, g.clamp(0.0, 255.0) as u8, b, 255])
    })
}

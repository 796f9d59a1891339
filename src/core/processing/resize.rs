use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ResampleMethod;

fn resize_alg(method: ResampleMethod) -> ResizeAlg {
    match method {
        ResampleMethod::Nearest => ResizeAlg::Nearest,
        ResampleMethod::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleMethod::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleMethod::Mitchell => ResizeAlg::Convolution(FilterType::Mitchell),
        ResampleMethod::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// Height that keeps the source aspect ratio at `target_width`, at least 1.
pub fn height_for_width(original_width: u32, original_height: u32, target_width: u32) -> u32 {
    if original_width == 0 {
        return original_height.max(1);
    }
    let h = original_height as f64 * target_width as f64 / original_width as f64;
    (h.round() as u32).max(1)
}

/// Resamples an RGBA image to exactly `target_width x target_height`.
/// Same-size requests return a copy without resampling.
pub fn resize_rgba_exact(
    img: &RgbaImage,
    target_width: u32,
    target_height: u32,
    method: ResampleMethod,
) -> Result<RgbaImage> {
    let (original_width, original_height) = img.dimensions();
    if (original_width, original_height) == (target_width, target_height) {
        return Ok(img.clone());
    }
    if target_width == 0 || target_height == 0 {
        return Err(Error::Resize(format!(
            "target size {}x{} has a zero dimension",
            target_width, target_height
        )));
    }

    debug!(
        "Resampling {}x{} -> {}x{} ({})",
        original_width, original_height, target_width, target_height, method
    );

    let resize_options = ResizeOptions::new().resize_alg(resize_alg(method));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_width,
        original_height,
        img.as_raw().to_vec(),
        PixelType::U8x4,
    )
    .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resampled buffer has an unexpected length".to_string()))
}

/// Resamples to `target_width`, deriving the height from the aspect ratio.
pub fn resize_rgba(
    img: &RgbaImage,
    target_width: u32,
    method: ResampleMethod,
) -> Result<RgbaImage> {
    let (w, h) = img.dimensions();
    let target_height = height_for_width(w, h, target_width);
    resize_rgba_exact(img, target_width, target_height, method)
}

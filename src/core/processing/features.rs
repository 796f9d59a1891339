//! Per-pixel feature extraction: edge/detail, skin likelihood and saturation.
//!
//! Each detector is an independent full-image pass over the working image that
//! writes one plane of the [`FeatureMap`]. The passes never read each other's
//! output, so they can run concurrently.
use std::time::{Duration, Instant};

use image::{Rgba, RgbaImage};
use ndarray::{Array2, Zip};

use crate::core::params::AnalysisParams;

/// Channels of the feature map, in the order they are packed into RGBA.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeatureChannel {
    Skin,
    Detail,
    Saturation,
}

/// Feature planes of one working image, indexed `[[y, x]]`.
///
/// Packed as an image, R holds skin likelihood, G edge/detail magnitude and
/// B saturation likelihood; alpha is always opaque.
#[derive(Debug, Clone)]
pub struct FeatureMap {
    skin: Array2<u8>,
    detail: Array2<u8>,
    saturation: Array2<u8>,
}

impl FeatureMap {
    pub fn new(skin: Array2<u8>, detail: Array2<u8>, saturation: Array2<u8>) -> Self {
        debug_assert_eq!(skin.dim(), detail.dim());
        debug_assert_eq!(skin.dim(), saturation.dim());
        Self {
            skin,
            detail,
            saturation,
        }
    }

    pub fn width(&self) -> u32 {
        self.detail.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.detail.nrows() as u32
    }

    pub fn skin(&self) -> &Array2<u8> {
        &self.skin
    }

    pub fn detail(&self) -> &Array2<u8> {
        &self.detail
    }

    pub fn saturation(&self) -> &Array2<u8> {
        &self.saturation
    }

    /// Packed RGBA value of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.skin[[y, x]],
            self.detail[[y, x]],
            self.saturation[[y, x]],
            255,
        ]
    }

    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            Rgba(self.pixel(x as usize, y as usize))
        })
    }

    /// Image with only one feature channel populated.
    pub fn channel_image(&self, channel: FeatureChannel) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let [r, g, b, a] = self.pixel(x as usize, y as usize);
            match channel {
                FeatureChannel::Skin => Rgba([r, 0, 0, a]),
                FeatureChannel::Detail => Rgba([0, g, 0, a]),
                FeatureChannel::Saturation => Rgba([0, 0, b, a]),
            }
        })
    }
}

/// Wall-clock time spent in each feature pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassTimings {
    pub luma: Duration,
    pub edge: Duration,
    pub skin: Duration,
    pub saturation: Duration,
}

/// Lightness used by every detector. The weights are applied in B,G,R order.
#[inline]
pub fn luma(px: &Rgba<u8>) -> f64 {
    0.5126 * px[2] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[0] as f64
}

/// HSL saturation in [0, 1]; 0 for achromatic pixels.
pub fn saturation(px: &Rgba<u8>) -> f64 {
    let c_max = px[0].max(px[1]).max(px[2]);
    let c_min = px[0].min(px[1]).min(px[2]);
    if c_max == c_min {
        return 0.0;
    }
    let maximum = c_max as f64 / 255.0;
    let minimum = c_min as f64 / 255.0;
    let l = (maximum + minimum) / 2.0;
    let d = maximum - minimum;
    if l > 0.5 {
        d / (2.0 - maximum - minimum)
    } else {
        d / (maximum + minimum)
    }
}

/// `1 - distance` between the pixel's normalised colour and the reference
/// skin tone. Black pixels have no direction and get `f64::MIN`.
pub fn skin_color_score(px: &Rgba<u8>, reference: &[f64; 3]) -> f64 {
    let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
    let mag = (r * r + g * g + b * b).sqrt();
    if mag == 0.0 {
        return f64::MIN;
    }
    let rd = r / mag - reference[0];
    let gd = g / mag - reference[1];
    let bd = b / mag - reference[2];
    1.0 - (rd * rd + gd * gd + bd * bd).sqrt()
}

#[inline]
fn clamp_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

fn fill_plane<F>(plane: &mut Array2<u8>, parallel: bool, f: F)
where
    F: Fn(usize, usize) -> u8 + Sync + Send,
{
    if parallel {
        Zip::indexed(plane).par_for_each(|(y, x), v| *v = f(y, x));
    } else {
        Zip::indexed(plane).for_each(|(y, x), v| *v = f(y, x));
    }
}

/// Luma of every pixel, computed once and shared by the passes.
pub fn luma_plane(img: &RgbaImage) -> Array2<f64> {
    let (w, h) = img.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
        luma(img.get_pixel(x as u32, y as u32))
    })
}

/// Clamped discrete Laplacian of the luma plane. Border pixels are 0.
pub fn edge_pass(luma: &Array2<f64>, parallel: bool) -> Array2<u8> {
    let (h, w) = luma.dim();
    let mut out = Array2::<u8>::zeros((h, w));
    fill_plane(&mut out, parallel, |y, x| {
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return 0;
        }
        clamp_u8(
            luma[[y, x]] * 4.0
                - luma[[y - 1, x]]
                - luma[[y, x - 1]]
                - luma[[y, x + 1]]
                - luma[[y + 1, x]],
        )
    });
    out
}

pub fn skin_pass(
    img: &RgbaImage,
    luma: &Array2<f64>,
    params: &AnalysisParams,
    parallel: bool,
) -> Array2<u8> {
    let mut out = Array2::<u8>::zeros(luma.dim());
    let gain = 255.0 / (1.0 - params.skin_threshold);
    fill_plane(&mut out, parallel, |y, x| {
        let px = img.get_pixel(x as u32, y as u32);
        let lightness = luma[[y, x]] / 255.0;
        let skin = skin_color_score(px, &params.skin_color);
        if skin > params.skin_threshold
            && lightness >= params.skin_brightness_min
            && lightness <= params.skin_brightness_max
        {
            clamp_u8((skin - params.skin_threshold) * gain)
        } else {
            0
        }
    });
    out
}

pub fn saturation_pass(
    img: &RgbaImage,
    luma: &Array2<f64>,
    params: &AnalysisParams,
    parallel: bool,
) -> Array2<u8> {
    let mut out = Array2::<u8>::zeros(luma.dim());
    let gain = 255.0 / (1.0 - params.saturation_threshold);
    fill_plane(&mut out, parallel, |y, x| {
        let px = img.get_pixel(x as u32, y as u32);
        let lightness = luma[[y, x]] / 255.0;
        let sat = saturation(px);
        if sat > params.saturation_threshold
            && lightness >= params.saturation_brightness_min
            && lightness <= params.saturation_brightness_max
        {
            clamp_u8((sat - params.saturation_threshold) * gain)
        } else {
            0
        }
    });
    out
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let now = Instant::now();
    let out = f();
    (out, now.elapsed())
}

/// Runs the three detectors over `img` and packs their planes.
pub fn extract_features(
    img: &RgbaImage,
    params: &AnalysisParams,
    parallel: bool,
) -> (FeatureMap, PassTimings) {
    let (luma, luma_time) = timed(|| luma_plane(img));

    let ((detail, edge_time), ((skin, skin_time), (sat, sat_time))) = if parallel {
        rayon::join(
            || timed(|| edge_pass(&luma, true)),
            || {
                rayon::join(
                    || timed(|| skin_pass(img, &luma, params, true)),
                    || timed(|| saturation_pass(img, &luma, params, true)),
                )
            },
        )
    } else {
        (
            timed(|| edge_pass(&luma, false)),
            (
                timed(|| skin_pass(img, &luma, params, false)),
                timed(|| saturation_pass(img, &luma, params, false)),
            ),
        )
    };

    let timings = PassTimings {
        luma: luma_time,
        edge: edge_time,
        skin: skin_time,
        saturation: sat_time,
    };
    (FeatureMap::new(skin, detail, sat), timings)
}

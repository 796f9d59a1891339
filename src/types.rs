//! Shared types used across smartcrop.
//! Includes `ResampleMethod`, the crop rectangles (`Crop`, `Rect`) and the
//! per-candidate `Score`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Interpolation used by the pre-scale resampler. Only affects speed and
/// working-image quality, never the shape of the search.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMethod {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
    Mitchell,
    Lanczos3,
}

impl std::fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResampleMethod::Nearest => "Nearest",
            ResampleMethod::Bilinear => "Bilinear",
            ResampleMethod::Bicubic => "Bicubic",
            ResampleMethod::Mitchell => "Mitchell",
            ResampleMethod::Lanczos3 => "Lanczos3",
        };
        write!(f, "{}", s)
    }
}

/// Composite score of one crop candidate.
///
/// `detail`, `saturation` and `skin` are raw importance-weighted
/// accumulators; `total` is normalised by the candidate area and is the only
/// value that is comparable between candidates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub detail: f64,
    pub saturation: f64,
    pub skin: f64,
    pub total: f64,
}

/// Candidate rectangle in analysis-image pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Crop {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when `(x, y)` falls inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A candidate together with the score it was given.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCrop {
    pub crop: Crop,
    pub score: Score,
}

/// Edge-based rectangle `[min_x, max_x) × [min_y, max_y)`, the shape returned
/// to callers in original-image coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Swaps coordinates where needed so that `min <= max` on both axes.
    pub fn canon(self) -> Self {
        Self {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
